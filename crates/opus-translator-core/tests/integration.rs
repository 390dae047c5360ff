//! Integration tests for opus-translator-core
//!
//! These tests verify the end-to-end request flow:
//! - Detection, same-language guard, model resolution, translation
//! - Structured error responses for every failure path
//! - The HTTP backends against a local stand-in server

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};
use opus_translator_core::{
    BackendConfig, BackendKind, DetectedLanguage, Error, Lang, LanguageDetector, ModelProvider,
    ModelRegistry, Result, TargetLang, TranslationRequest, TranslationResponse, TranslationService,
    Translator, LinguaDetector, create_provider, translator::ProviderInfo,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// Mocks
// =============================================================================

/// Detector that always reports the same language.
struct FixedDetector(&'static str);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Result<DetectedLanguage> {
        Ok(DetectedLanguage {
            code: Lang::new(self.0),
            confidence: 1.0,
        })
    }
}

/// Detector that never finds a language.
struct FailingDetector;

impl LanguageDetector for FailingDetector {
    fn detect(&self, _text: &str) -> Result<DetectedLanguage> {
        Err(Error::DetectionFailed)
    }
}

/// Provider backed by the built-in registry that counts resolutions.
struct MockProvider {
    registry: ModelRegistry,
    resolutions: AtomicUsize,
    should_fail: bool,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            registry: ModelRegistry::with_defaults(),
            resolutions: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "mock",
        }
    }

    async fn resolve(&self, source: &Lang, target: TargetLang) -> Result<Box<dyn Translator>> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        let model_id = self
            .registry
            .lookup(source, target)
            .ok_or_else(|| Error::model_unavailable(source.as_str(), target.as_str()))?;

        Ok(Box::new(MockTranslator {
            model_id: model_id.to_string(),
            target,
            should_fail: self.should_fail,
        }))
    }
}

struct MockTranslator {
    model_id: String,
    target: TargetLang,
    should_fail: bool,
}

#[async_trait]
impl Translator for MockTranslator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn translate(&self, text: &str) -> Result<String> {
        if self.should_fail {
            return Err(Error::Inference("Mock inference failure".to_string()));
        }
        Ok(format!("[{}] {}", self.target, text))
    }
}

fn service_with(detected: &'static str, provider: Arc<MockProvider>) -> TranslationService {
    TranslationService::new(Arc::new(FixedDetector(detected)), provider)
}

// =============================================================================
// Request Flow Tests
// =============================================================================

#[tokio::test]
async fn test_english_to_french() {
    let provider = Arc::new(MockProvider::new());
    let service = service_with("en", Arc::clone(&provider));

    let response = service
        .handle(&TranslationRequest::new("Hello, how are you?", TargetLang::Fr))
        .await;

    assert_eq!(
        response,
        TranslationResponse::Success {
            original_language: "en".to_string(),
            translated_text: "[fr] Hello, how are you?".to_string(),
        }
    );
    assert_eq!(provider.resolutions(), 1);
}

#[tokio::test]
async fn test_same_language_skips_resolution() {
    let provider = Arc::new(MockProvider::new());
    let service = service_with("fr", Arc::clone(&provider));

    let response = service
        .handle(&TranslationRequest::new("Bonjour", TargetLang::Fr))
        .await;

    assert_eq!(
        response,
        TranslationResponse::error("Source and target languages cannot be the same.")
    );
    assert_eq!(provider.resolutions(), 0, "resolver must not run");
}

#[tokio::test]
async fn test_unavailable_pair() {
    let provider = Arc::new(MockProvider::new());
    let service = service_with("zh", Arc::clone(&provider));

    let response = service
        .handle(&TranslationRequest::new("你好", TargetLang::De))
        .await;

    assert_eq!(
        response,
        TranslationResponse::error("Translation model not available for zh to de")
    );
}

#[tokio::test]
async fn test_detection_failure_is_structured() {
    let service = TranslationService::new(Arc::new(FailingDetector), Arc::new(MockProvider::new()));

    let response = service
        .handle(&TranslationRequest::new("???", TargetLang::En))
        .await;

    assert_eq!(
        response,
        TranslationResponse::error("Unable to detect the language of the input text.")
    );
}

#[tokio::test]
async fn test_inference_failure_is_structured() {
    let service = service_with("de", Arc::new(MockProvider::failing()));

    let err = service
        .translate("Guten Morgen", TargetLang::En)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Inference(_)));

    let response = service
        .handle(&TranslationRequest::new("Guten Morgen", TargetLang::En))
        .await;
    assert_eq!(
        response,
        TranslationResponse::error("translation failed: Mock inference failure")
    );
}

#[tokio::test]
async fn test_repeated_requests_resolve_every_time() {
    let provider = Arc::new(MockProvider::new());
    let service = service_with("es", Arc::clone(&provider));

    let first = service.translate("Hola amigo", TargetLang::En).await.unwrap();
    let second = service.translate("Hola amigo", TargetLang::En).await.unwrap();

    assert_eq!(first.original_language, second.original_language);
    assert_eq!(first.translated_text, second.translated_text);
    assert_eq!(first.model_id, "Helsinki-NLP/opus-mt-es-en");
    assert_eq!(provider.resolutions(), 2, "no capability reuse across requests");
}

// =============================================================================
// HTTP Backend Tests
// =============================================================================

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Stand-in for the model hub and inference server.
///
/// The hub knows every model except `opus-mt-zh-de`; inference echoes the
/// input tagged with the model name, `opus-mt-de-en` is always cold and
/// `opus-mt-it-en` answers with a blank translation.
fn inference_router() -> Router {
    Router::new()
        .route(
            "/api/models/{org}/{name}",
            get(|Path((_org, name)): Path<(String, String)>| async move {
                if name == "opus-mt-zh-de" {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::OK
                }
            }),
        )
        .route(
            "/models/{org}/{name}",
            post(
                |Path((_org, name)): Path<(String, String)>, Json(body): Json<Value>| async move {
                    if name == "opus-mt-de-en" {
                        return (
                            StatusCode::SERVICE_UNAVAILABLE,
                            Json(json!({"error": "Model is currently loading"})),
                        );
                    }
                    if name == "opus-mt-it-en" {
                        return (StatusCode::OK, Json(json!([{ "translation_text": "  " }])));
                    }
                    let input = body["inputs"].as_str().unwrap_or_default().to_string();
                    (
                        StatusCode::OK,
                        Json(json!([{ "translation_text": format!(" {name}: {input} ") }])),
                    )
                },
            ),
        )
}

fn hf_config(base: &str) -> BackendConfig {
    BackendConfig {
        kind: BackendKind::HuggingFace,
        api_base: base.to_string(),
        hub_url: base.to_string(),
        api_key: Some("test-token".to_string()),
        timeout_secs: 5,
        verify_models: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_huggingface_backend_translates() {
    let base = spawn_backend(inference_router()).await;
    let provider =
        create_provider(&hf_config(&base), Arc::new(ModelRegistry::with_defaults())).unwrap();

    let translator = provider
        .resolve(&Lang::new("en"), TargetLang::Fr)
        .await
        .unwrap();
    assert_eq!(translator.model_id(), "Helsinki-NLP/opus-mt-en-fr");

    let text = translator.translate("Good morning").await.unwrap();
    assert_eq!(text, "opus-mt-en-fr: Good morning");
}

#[tokio::test]
async fn test_huggingface_backend_missing_from_hub() {
    let base = spawn_backend(inference_router()).await;
    let mut registry = ModelRegistry::with_defaults();
    registry.register("zh", TargetLang::De, "Helsinki-NLP/opus-mt-zh-de");
    let provider = create_provider(&hf_config(&base), Arc::new(registry)).unwrap();

    let err = provider
        .resolve(&Lang::new("zh"), TargetLang::De)
        .await
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "Translation model not available for zh to de");
}

#[tokio::test]
async fn test_huggingface_backend_unregistered_pair() {
    let provider = create_provider(
        &hf_config("http://127.0.0.1:9"),
        Arc::new(ModelRegistry::with_defaults()),
    )
    .unwrap();

    let err = provider
        .resolve(&Lang::new("zh"), TargetLang::De)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::ModelUnavailable { .. }));
}

#[tokio::test]
async fn test_huggingface_backend_inference_error() {
    let base = spawn_backend(inference_router()).await;
    let provider =
        create_provider(&hf_config(&base), Arc::new(ModelRegistry::with_defaults())).unwrap();

    let translator = provider
        .resolve(&Lang::new("de"), TargetLang::En)
        .await
        .unwrap();
    let err = translator.translate("Guten Morgen").await.unwrap_err();
    assert!(err.to_string().contains("503"), "got: {err}");
}

#[tokio::test]
async fn test_huggingface_backend_rejects_blank_translation() {
    let base = spawn_backend(inference_router()).await;
    let provider =
        create_provider(&hf_config(&base), Arc::new(ModelRegistry::with_defaults())).unwrap();

    let translator = provider
        .resolve(&Lang::new("it"), TargetLang::En)
        .await
        .unwrap();
    let err = translator.translate("Buongiorno").await.unwrap_err();
    assert!(matches!(err, Error::InferenceInvalidResponse(_)), "got: {err}");
}

#[tokio::test]
async fn test_full_pipeline_with_lingua() {
    let base = spawn_backend(inference_router()).await;
    let provider =
        create_provider(&hf_config(&base), Arc::new(ModelRegistry::with_defaults())).unwrap();
    let service = TranslationService::new(Arc::new(LinguaDetector::new()), provider);

    let cases = [
        (
            "Hello, how are you?",
            TargetLang::Fr,
            TranslationResponse::Success {
                original_language: "en".to_string(),
                translated_text: "opus-mt-en-fr: Hello, how are you?".to_string(),
            },
        ),
        (
            "Bonjour",
            TargetLang::Fr,
            TranslationResponse::error("Source and target languages cannot be the same."),
        ),
        (
            "你好",
            TargetLang::De,
            TranslationResponse::error("Translation model not available for zh to de"),
        ),
    ];

    for (text, target, expected) in cases {
        let response = service
            .handle(&TranslationRequest::new(text, target))
            .await;
        assert_eq!(response, expected, "input {text:?}");
    }
}

fn openai_config(base: &str) -> BackendConfig {
    BackendConfig {
        kind: BackendKind::OpenAi,
        api_base: format!("{base}/v1"),
        model: "test-model".to_string(),
        timeout_secs: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_openai_backend_translates() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["model"], "test-model");
            let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
            let content = if prompt.contains("from Spanish into German") {
                "\"Guten Morgen\""
            } else {
                "unexpected prompt"
            };
            Json(json!({"choices": [{"message": {"role": "assistant", "content": content}}]}))
        }),
    );
    let base = spawn_backend(router).await;
    let provider =
        create_provider(&openai_config(&base), Arc::new(ModelRegistry::with_defaults())).unwrap();

    let translator = provider
        .resolve(&Lang::new("es"), TargetLang::De)
        .await
        .unwrap();
    assert_eq!(translator.translate("Buenos días").await.unwrap(), "Guten Morgen");
}

#[tokio::test]
async fn test_openai_backend_follows_registry() {
    let mut registry = ModelRegistry::empty();
    registry.register("ja", TargetLang::Fr, "custom/ja-fr");
    let provider =
        create_provider(&openai_config("http://127.0.0.1:9"), Arc::new(registry)).unwrap();

    let err = provider
        .resolve(&Lang::new("zh"), TargetLang::De)
        .await
        .err()
        .unwrap();
    assert_eq!(err.to_string(), "Translation model not available for zh to de");

    let err = provider
        .resolve(&Lang::new("es"), TargetLang::En)
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::ModelUnavailable { .. }));

    let translator = provider
        .resolve(&Lang::new("ja"), TargetLang::Fr)
        .await
        .unwrap();
    assert_eq!(translator.model_id(), "test-model");
}
