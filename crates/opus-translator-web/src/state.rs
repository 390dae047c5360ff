use anyhow::{Context, Result};
use opus_translator_core::{AppConfig, TranslationService};

/// Global application state
///
/// Read-only after startup; requests share it without locking.
pub struct AppState {
    pub service: TranslationService,
    /// Configuration the service was built from
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let service = TranslationService::from_config(&config)
            .context("Failed to create translation service")?;

        Ok(Self { service, config })
    }

    /// Wrap an already built service (used by tests with stub backends)
    #[cfg(test)]
    pub const fn with_service(service: TranslationService, config: AppConfig) -> Self {
        Self { service, config }
    }
}
