use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::registry::ModelRegistry;
use super::traits::{ModelProvider, ProviderInfo, Translator};
use crate::config::{BackendConfig, Lang, TargetLang};
use crate::error::{Error, Result};

/// Marian models served through a Hugging Face Inference-compatible API.
///
/// Works with the hosted inference router and any self-hosted server that
/// exposes the same `POST /models/{id}` translation contract.
pub struct HuggingFaceProvider {
    client: Client,
    /// Base URL of the inference server (models live under `/models/{id}`)
    pub api_base: String,
    /// Base URL of the model hub used for existence checks
    pub hub_url: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Probe the hub before handing out a translator
    pub verify_models: bool,
    registry: Arc<ModelRegistry>,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    /// Block until a cold model has been loaded instead of failing with 503
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

impl HuggingFaceProvider {
    pub fn new(client: Client, config: &BackendConfig, registry: Arc<ModelRegistry>) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            hub_url: config.hub_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            verify_models: config.verify_models,
            registry,
        }
    }

    /// Ask the hub whether the model artifact exists
    async fn model_exists(&self, model_id: &str) -> Result<bool> {
        let url = format!("{}/api/models/{}", self.hub_url, model_id);
        debug!("Checking model availability at {}", url);

        let mut req = self.client.get(&url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            status => Err(Error::Inference(format!("model hub returned HTTP {status}"))),
        }
    }
}

#[async_trait]
impl ModelProvider for HuggingFaceProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "Hugging Face Inference",
        }
    }

    async fn resolve(&self, source: &Lang, target: TargetLang) -> Result<Box<dyn Translator>> {
        let Some(model_id) = self.registry.lookup(source, target) else {
            debug!("No registered model for {} to {}", source, target);
            return Err(Error::model_unavailable(source.as_str(), target.as_str()));
        };

        if self.verify_models {
            match self.model_exists(model_id).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!("Model {} is registered but missing from the hub", model_id);
                    return Err(Error::model_unavailable(source.as_str(), target.as_str()));
                }
                Err(e) => {
                    warn!("Could not load model {}: {}", model_id, e);
                    return Err(Error::model_unavailable(source.as_str(), target.as_str()));
                }
            }
        }

        info!("Resolved {} to {} with {}", source, target, model_id);

        Ok(Box::new(InferenceTranslator {
            client: self.client.clone(),
            endpoint: format!("{}/models/{}", self.api_base, model_id),
            model_id: model_id.to_string(),
            api_key: self.api_key.clone(),
        }))
    }
}

/// Translator bound to one model on an inference server
pub struct InferenceTranslator {
    client: Client,
    endpoint: String,
    model_id: String,
    api_key: Option<String>,
}

#[async_trait]
impl Translator for InferenceTranslator {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let request = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut req = self.client.post(&self.endpoint).json(&request);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Inference error from {}: {} - {}", self.model_id, status, body);
            return Err(Error::Inference(format!("HTTP {status}: {body}")));
        }

        let outputs: Vec<TranslationOutput> = response.json().await?;
        let Some(output) = outputs.into_iter().next() else {
            return Err(Error::InferenceInvalidResponse("empty output list".to_string()));
        };

        let translated = output.translation_text.trim();
        if translated.is_empty() {
            warn!("Model {} returned an empty translation", self.model_id);
            return Err(Error::InferenceInvalidResponse(
                "empty translation_text".to_string(),
            ));
        }

        Ok(translated.to_string())
    }
}
