mod huggingface;
mod openai;
mod registry;
mod traits;

pub use huggingface::{HuggingFaceProvider, InferenceTranslator};
pub use openai::{OpenAiProvider, OpenAiTranslator};
pub use registry::ModelRegistry;
pub use traits::{ModelProvider, ProviderInfo, Translator};

use crate::config::{BackendConfig, BackendKind};
use crate::error::{Error, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the HTTP client shared by every capability a provider hands out
pub fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::ConfigInvalid {
            field: "backend".to_string(),
            reason: format!("failed to create HTTP client: {e}"),
        })
}

/// Create a model provider from configuration
pub fn create_provider(
    config: &BackendConfig,
    registry: Arc<ModelRegistry>,
) -> Result<Arc<dyn ModelProvider>> {
    let client = http_client(config.timeout_secs)?;

    let provider: Arc<dyn ModelProvider> = match config.kind {
        BackendKind::HuggingFace => Arc::new(HuggingFaceProvider::new(client, config, registry)),
        BackendKind::OpenAi => Arc::new(OpenAiProvider::new(client, config, registry)),
    };

    Ok(provider)
}
