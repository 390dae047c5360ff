//! Request and response bodies of the translation endpoint.

use serde::{Deserialize, Serialize};

use crate::config::{Lang, TargetLang};
use crate::error::Result;

/// Incoming translation request.
///
/// Deserialization fails (and the request never reaches the handler) when a
/// field is missing, `target_lang` is not a supported code, or `text` is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTranslationRequest")]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: TargetLang,
}

#[derive(Deserialize)]
struct RawTranslationRequest {
    text: String,
    target_lang: TargetLang,
}

impl TryFrom<RawTranslationRequest> for TranslationRequest {
    type Error = String;

    fn try_from(raw: RawTranslationRequest) -> std::result::Result<Self, Self::Error> {
        if raw.text.trim().is_empty() {
            return Err("text must not be empty".to_string());
        }
        Ok(Self {
            text: raw.text,
            target_lang: raw.target_lang,
        })
    }
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: TargetLang) -> Self {
        Self {
            text: text.into(),
            target_lang,
        }
    }
}

/// A successful translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Detected source language
    pub original_language: Lang,
    pub translated_text: String,
    /// Model that produced the text
    pub model_id: String,
}

/// Response body: either the translation or a structured error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationResponse {
    Success {
        original_language: String,
        translated_text: String,
    },
    Failure {
        error: String,
    },
}

impl TranslationResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }
}

impl From<Translation> for TranslationResponse {
    fn from(translation: Translation) -> Self {
        Self::Success {
            original_language: translation.original_language.0,
            translated_text: translation.translated_text,
        }
    }
}

impl From<Result<Translation>> for TranslationResponse {
    fn from(result: Result<Translation>) -> Self {
        match result {
            Ok(translation) => translation.into(),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_request_accepts_supported_target() {
        let request: TranslationRequest =
            serde_json::from_value(json!({"text": "Hello, how are you?", "target_lang": "fr"}))
                .unwrap();
        assert_eq!(request, TranslationRequest::new("Hello, how are you?", TargetLang::Fr));
    }

    #[test]
    fn test_request_rejects_bad_bodies() {
        for body in [
            json!({"text": "Hello", "target_lang": "it"}),
            json!({"text": "Hello", "target_lang": "EN"}),
            json!({"text": "Hello"}),
            json!({"target_lang": "en"}),
            json!({"text": "   ", "target_lang": "en"}),
        ] {
            assert!(
                serde_json::from_value::<TranslationRequest>(body.clone()).is_err(),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn test_response_shapes() {
        let ok = TranslationResponse::from(Translation {
            original_language: Lang::new("en"),
            translated_text: "Bonjour".to_string(),
            model_id: "Helsinki-NLP/opus-mt-en-fr".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"original_language": "en", "translated_text": "Bonjour"})
        );

        let err = TranslationResponse::from(Err::<Translation, _>(Error::SameLanguage));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"error": "Source and target languages cannot be the same."})
        );
    }
}
