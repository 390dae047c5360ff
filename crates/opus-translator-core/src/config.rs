use serde::{Deserialize, Serialize};
use std::fmt;

/// Language code as produced by the detector (ISO 639-1 where one exists)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Languages a request may ask to translate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLang {
    En,
    Fr,
    Es,
    De,
}

impl TargetLang {
    pub const ALL: [Self; 4] = [Self::En, Self::Fr, Self::Es, Self::De];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Es => "es",
            Self::De => "de",
        }
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<TargetLang> for Lang {
    fn eq(&self, other: &TargetLang) -> bool {
        self.as_str() == other.as_str()
    }
}

/// HTTP listener and CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call the API from a browser
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Which inference backend serves the resolved models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hugging Face Inference-compatible endpoint running the Marian models
    #[default]
    HuggingFace,
    /// OpenAI-compatible chat completions endpoint
    OpenAi,
}

impl BackendKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "huggingface" | "hugging-face" | "hf" => Some(Self::HuggingFace),
            "openai" | "open-ai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

/// Translation backend configuration.
///
/// `api_base` points at the inference server. For the Hugging Face backend
/// models are addressed as `{api_base}/models/{model_id}`; for the OpenAI
/// backend requests go to `{api_base}/chat/completions` with `model`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model hub queried to confirm a model exists before using it
    #[serde(default = "default_hub_url")]
    pub hub_url: String,

    pub api_key: Option<String>,

    /// Chat model name (OpenAI backend only)
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Probe the hub for the model artifact on every resolution
    #[serde(default = "default_true")]
    pub verify_models: bool,
}

fn default_api_base() -> String {
    "https://router.huggingface.co/hf-inference".to_string()
}

fn default_hub_url() -> String {
    "https://huggingface.co".to_string()
}

fn default_model() -> String {
    "default_model".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            api_base: default_api_base(),
            hub_url: default_hub_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            verify_models: true,
        }
    }
}

/// An extra model registry entry from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub source: Lang,
    pub target: TargetLang,
    pub model: String,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Additional language pairs on top of the built-in registry
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::Error> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::error::Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            crate::error::Error::ConfigLoad(format!("Failed to parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations (~/.config/opus-translator/config.toml, ./config.toml)
    pub fn load() -> Self {
        // Try user config
        if let Some(config_dir) = crate::util::config_dir() {
            let user_config = config_dir.join("opus-translator").join("config.toml");
            if user_config.exists() {
                match Self::from_file(&user_config) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", user_config.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Try local config
        let local_config = std::path::PathBuf::from("config.toml");
        if local_config.exists() {
            match Self::from_file(&local_config) {
                Ok(config) => {
                    tracing::debug!("Loaded config from ./config.toml");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("Failed to load ./config.toml: {}", e);
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    /// Reject values that would only fail later at request time
    pub fn validate(&self) -> Result<(), crate::error::Error> {
        if self.backend.api_base.trim().is_empty() {
            return Err(crate::error::Error::ConfigInvalid {
                field: "backend.api_base".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(crate::error::Error::ConfigInvalid {
                field: "backend.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if let Some(entry) = self.models.iter().find(|m| m.model.trim().is_empty()) {
            return Err(crate::error::Error::ConfigInvalid {
                field: "models".to_string(),
                reason: format!("empty model id for {} to {}", entry.source, entry.target),
            });
        }
        Ok(())
    }
}
