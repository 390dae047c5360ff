use async_trait::async_trait;

use crate::config::{Lang, TargetLang};
use crate::error::Result;

/// Information about a model provider backend
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Human-readable name
    pub name: &'static str,
}

/// A resolved, ready-to-use translation capability for one language pair.
///
/// Instances are created per request by [`ModelProvider::resolve`] and dropped
/// once the response is produced.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Identifier of the model backing this capability
    fn model_id(&self) -> &str;

    /// Translate text from the pair's source language into its target language
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Trait for backends that turn a language pair into a [`Translator`]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Get information about this backend
    fn info(&self) -> ProviderInfo;

    /// Get the backend name (convenience method)
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Resolve a capability for `source -> target`.
    ///
    /// A pair the backend cannot serve yields [`crate::Error::ModelUnavailable`].
    async fn resolve(&self, source: &Lang, target: TargetLang) -> Result<Box<dyn Translator>>;
}
