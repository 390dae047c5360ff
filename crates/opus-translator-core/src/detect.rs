//! Source language detection.

use lingua::LanguageDetectorBuilder;
use tracing::debug;

use crate::config::Lang;
use crate::error::{Error, Result};

/// Outcome of running the detector on a text
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    /// ISO 639-1 language code
    pub code: Lang,
    /// Detector confidence in 0.0..=1.0 (informational only)
    pub confidence: f64,
}

/// Trait for language detectors
pub trait LanguageDetector: Send + Sync {
    /// Detect the language `text` is written in
    fn detect(&self, text: &str) -> Result<DetectedLanguage>;
}

/// N-gram detector backed by `lingua`, reliable on single words and short
/// phrases.
///
/// Language models are loaded lazily on first use and shared afterwards.
pub struct LinguaDetector {
    inner: lingua::LanguageDetector,
}

impl LinguaDetector {
    /// Detector over every language `lingua` knows
    pub fn new() -> Self {
        Self {
            inner: LanguageDetectorBuilder::from_all_languages().build(),
        }
    }
}

impl Default for LinguaDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Result<DetectedLanguage> {
        let language = self
            .inner
            .detect_language_of(text)
            .ok_or(Error::DetectionFailed)?;
        let confidence = self.inner.compute_language_confidence(text, language);
        let code = language.iso_code_639_1().to_string();

        debug!(
            "Detected {:?} ({}) with confidence {:.2}",
            language, code, confidence
        );

        Ok(DetectedLanguage {
            code: Lang::new(code),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_code(detector: &LinguaDetector, text: &str) -> String {
        detector.detect(text).unwrap().code.0
    }

    #[test]
    fn test_detects_short_greetings() {
        let detector = LinguaDetector::new();
        assert_eq!(detect_code(&detector, "Hello, how are you?"), "en");
        assert_eq!(detect_code(&detector, "Bonjour"), "fr");
        assert_eq!(detect_code(&detector, "你好"), "zh");
    }

    #[test]
    fn test_detects_sentences() {
        let detector = LinguaDetector::new();
        assert_eq!(
            detect_code(
                &detector,
                "Bonjour tout le monde, je suis très heureux de vous voir aujourd'hui."
            ),
            "fr"
        );
        assert_eq!(
            detect_code(&detector, "¿Dónde está la estación de tren más cercana?"),
            "es"
        );
        assert_eq!(
            detect_code(&detector, "Ich habe heute keine Zeit, weil ich arbeiten muss."),
            "de"
        );
    }

    #[test]
    fn test_confidence_is_a_probability() {
        let detected = LinguaDetector::new().detect("Hello, how are you?").unwrap();
        assert!((0.0..=1.0).contains(&detected.confidence));
    }

    #[test]
    fn test_symbols_only_fail_detection() {
        let err = LinguaDetector::new().detect("!!! ??? ...").unwrap_err();
        assert!(matches!(err, Error::DetectionFailed));
    }
}
