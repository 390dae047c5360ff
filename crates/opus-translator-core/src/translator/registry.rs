//! Known translation models keyed by language pair.

use std::collections::HashMap;

use crate::config::{Lang, ModelEntry, TargetLang};

/// Published Marian models from the Helsinki-NLP OPUS-MT collection.
const DEFAULT_MODELS: &[(&str, TargetLang, &str)] = &[
    // Between the four target languages
    ("en", TargetLang::Fr, "Helsinki-NLP/opus-mt-en-fr"),
    ("en", TargetLang::Es, "Helsinki-NLP/opus-mt-en-es"),
    ("en", TargetLang::De, "Helsinki-NLP/opus-mt-en-de"),
    ("fr", TargetLang::En, "Helsinki-NLP/opus-mt-fr-en"),
    ("fr", TargetLang::Es, "Helsinki-NLP/opus-mt-fr-es"),
    ("fr", TargetLang::De, "Helsinki-NLP/opus-mt-fr-de"),
    ("es", TargetLang::En, "Helsinki-NLP/opus-mt-es-en"),
    ("es", TargetLang::Fr, "Helsinki-NLP/opus-mt-es-fr"),
    ("es", TargetLang::De, "Helsinki-NLP/opus-mt-es-de"),
    ("de", TargetLang::En, "Helsinki-NLP/opus-mt-de-en"),
    ("de", TargetLang::Fr, "Helsinki-NLP/opus-mt-de-fr"),
    ("de", TargetLang::Es, "Helsinki-NLP/opus-mt-de-es"),
    // Other sources
    ("it", TargetLang::En, "Helsinki-NLP/opus-mt-it-en"),
    ("it", TargetLang::Fr, "Helsinki-NLP/opus-mt-it-fr"),
    ("nl", TargetLang::En, "Helsinki-NLP/opus-mt-nl-en"),
    ("nl", TargetLang::Fr, "Helsinki-NLP/opus-mt-nl-fr"),
    ("ru", TargetLang::En, "Helsinki-NLP/opus-mt-ru-en"),
    ("ru", TargetLang::Fr, "Helsinki-NLP/opus-mt-ru-fr"),
    ("ru", TargetLang::Es, "Helsinki-NLP/opus-mt-ru-es"),
    ("ca", TargetLang::En, "Helsinki-NLP/opus-mt-ca-en"),
    ("ca", TargetLang::Es, "Helsinki-NLP/opus-mt-ca-es"),
    ("pl", TargetLang::En, "Helsinki-NLP/opus-mt-pl-en"),
    ("cs", TargetLang::En, "Helsinki-NLP/opus-mt-cs-en"),
    ("uk", TargetLang::En, "Helsinki-NLP/opus-mt-uk-en"),
    ("sv", TargetLang::En, "Helsinki-NLP/opus-mt-sv-en"),
    ("da", TargetLang::En, "Helsinki-NLP/opus-mt-da-en"),
    ("fi", TargetLang::En, "Helsinki-NLP/opus-mt-fi-en"),
    ("tr", TargetLang::En, "Helsinki-NLP/opus-mt-tr-en"),
    ("ar", TargetLang::En, "Helsinki-NLP/opus-mt-ar-en"),
    ("hi", TargetLang::En, "Helsinki-NLP/opus-mt-hi-en"),
    ("vi", TargetLang::En, "Helsinki-NLP/opus-mt-vi-en"),
    ("zh", TargetLang::En, "Helsinki-NLP/opus-mt-zh-en"),
    ("ja", TargetLang::En, "Helsinki-NLP/opus-mt-ja-en"),
    ("ko", TargetLang::En, "Helsinki-NLP/opus-mt-ko-en"),
];

/// Explicit mapping from `(source, target)` to a model identifier.
///
/// A missing pair is a normal outcome: [`ModelRegistry::lookup`] returns `None`.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<(Lang, TargetLang), String>,
}

impl ModelRegistry {
    /// Registry with no models at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in OPUS-MT table
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for &(source, target, model) in DEFAULT_MODELS {
            registry.register(source, target, model);
        }
        registry
    }

    /// Built-in table plus configured entries (configured entries win)
    pub fn from_entries(entries: &[ModelEntry]) -> Self {
        let mut registry = Self::with_defaults();
        for entry in entries {
            registry.register(entry.source.clone(), entry.target, entry.model.clone());
        }
        registry
    }

    /// Add or replace the model for a pair
    pub fn register(&mut self, source: impl Into<Lang>, target: TargetLang, model: impl Into<String>) {
        self.models.insert((source.into(), target), model.into());
    }

    pub fn lookup(&self, source: &Lang, target: TargetLang) -> Option<&str> {
        self.models
            .get(&(source.clone(), target))
            .map(String::as_str)
    }

    pub fn contains(&self, source: &Lang, target: TargetLang) -> bool {
        self.lookup(source, target).is_some()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
