//! Opus Translator Core Library
//!
//! Detects the language of a text and translates it with a pretrained model
//! resolved for the `(source, target)` pair:
//! - Language detection (lingua)
//! - Model registry of OPUS-MT language pairs
//! - Inference backends (Hugging Face Inference API, OpenAI-compatible APIs)
//! - The request handler tying them together

pub mod config;
pub mod detect;
pub mod error;
pub mod request;
pub mod translator;
pub mod util;

pub use config::{AppConfig, BackendConfig, BackendKind, Lang, ModelEntry, ServerConfig, TargetLang};
pub use detect::{DetectedLanguage, LanguageDetector, LinguaDetector};
pub use error::{Error, Result};
pub use request::{Translation, TranslationRequest, TranslationResponse};
pub use translator::{ModelProvider, ModelRegistry, Translator, create_provider};

use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handles translation requests: detect, guard, resolve, translate.
///
/// Holds no per-request state. Every call resolves its own capability and
/// drops it when done, so concurrent requests never share a model.
pub struct TranslationService {
    detector: Arc<dyn LanguageDetector>,
    provider: Arc<dyn ModelProvider>,
}

impl TranslationService {
    pub fn new(detector: Arc<dyn LanguageDetector>, provider: Arc<dyn ModelProvider>) -> Self {
        Self { detector, provider }
    }

    /// Create the service described by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let registry = Arc::new(ModelRegistry::from_entries(&config.models));
        debug!("Model registry holds {} language pairs", registry.len());

        let provider = create_provider(&config.backend, registry)?;
        Ok(Self::new(Arc::new(LinguaDetector::new()), provider))
    }

    /// Translate `text` into `target`, detecting the source language.
    pub async fn translate(&self, text: &str, target: TargetLang) -> Result<Translation> {
        let detected = self.detector.detect(text)?;
        let source = detected.code;

        if source == target {
            debug!("Detected language {} equals target", source);
            return Err(Error::SameLanguage);
        }

        let translator = self.provider.resolve(&source, target).await?;

        info!(
            "Translating {} chars from {} to {} with {}",
            text.chars().count(),
            source,
            target,
            translator.model_id()
        );

        let translated_text = translator.translate(text).await?;

        Ok(Translation {
            original_language: source,
            translated_text,
            model_id: translator.model_id().to_string(),
        })
    }

    /// Run a request and turn every outcome into a response body
    pub async fn handle(&self, request: &TranslationRequest) -> TranslationResponse {
        let result = self.translate(&request.text, request.target_lang).await;

        if let Err(ref e) = result {
            match e {
                Error::SameLanguage | Error::ModelUnavailable { .. } => {
                    info!("Rejected translation request: {}", e);
                }
                _ => warn!(
                    "Translation of \"{}\" failed: {}",
                    util::preview(&request.text, 40),
                    e
                ),
            }
        }

        result.into()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
