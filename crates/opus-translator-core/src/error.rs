use thiserror::Error;

/// Unified error type for opus-translator-core
///
/// Covers every failure a translation request can run into:
/// - Request handling (same language, unavailable model pair)
/// - Language detection
/// - Inference calls against the model backend
/// - Configuration loading at startup
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Request Errors
    // ==========================================================================
    /// Detected source language equals the requested target language
    #[error("Source and target languages cannot be the same.")]
    SameLanguage,

    /// No model exists (or could be loaded) for the language pair
    #[error("Translation model not available for {source_lang} to {target_lang}")]
    ModelUnavailable {
        source_lang: String,
        target_lang: String,
    },

    // ==========================================================================
    // Detection Errors
    // ==========================================================================
    /// The detector could not determine a language for the input
    #[error("Unable to detect the language of the input text.")]
    DetectionFailed,

    // ==========================================================================
    // Inference Errors
    // ==========================================================================
    /// Inference request failed (transport error or non-success status)
    #[error("translation failed: {0}")]
    Inference(String),

    /// Backend answered with a body we could not use
    #[error("translation failed: invalid backend response: {0}")]
    InferenceInvalidResponse(String),

    /// Inference request timed out
    #[error("translation failed: backend request timed out")]
    InferenceTimeout,

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::ModelUnavailable`] for a language pair.
    pub fn model_unavailable(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            source_lang: source.into(),
            target_lang: target.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::InferenceTimeout
        } else if e.is_decode() {
            Self::InferenceInvalidResponse(e.to_string())
        } else {
            Self::Inference(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
