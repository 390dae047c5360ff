use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::registry::ModelRegistry;
use super::traits::{ModelProvider, ProviderInfo, Translator};
use crate::config::{BackendConfig, Lang, TargetLang};
use crate::error::{Error, Result};

/// OpenAI-compatible chat model used as a translation backend
/// Works with: llama.cpp server, Ollama, DeepSeek, OpenAI, etc.
///
/// Only pairs listed in the model registry are served.
pub struct OpenAiProvider {
    client: Client,
    /// Base URL for the API (e.g., "http://localhost:8080/v1")
    pub api_base: String,
    /// Optional API key for authentication
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    registry: Arc<ModelRegistry>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiProvider {
    pub fn new(client: Client, config: &BackendConfig, registry: Arc<ModelRegistry>) -> Self {
        Self {
            client,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            registry,
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: "OpenAI Compatible",
        }
    }

    async fn resolve(&self, source: &Lang, target: TargetLang) -> Result<Box<dyn Translator>> {
        if !self.registry.contains(source, target) {
            debug!("No registered model for {} to {}", source, target);
            return Err(Error::model_unavailable(source.as_str(), target.as_str()));
        }

        let Some(source_name) = language_name(source.as_str()) else {
            debug!("No prompt name for source language {}", source);
            return Err(Error::model_unavailable(source.as_str(), target.as_str()));
        };

        info!("Resolved {} to {} with chat model {}", source, target, self.model);

        Ok(Box::new(OpenAiTranslator {
            client: self.client.clone(),
            url: format!("{}/chat/completions", self.api_base.trim_end_matches('/')),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            source_name,
            target_name: target_language_name(target),
        }))
    }
}

/// Chat model bound to one language pair
pub struct OpenAiTranslator {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    source_name: &'static str,
    target_name: &'static str,
}

impl OpenAiTranslator {
    /// Create translation prompt
    fn create_prompt(&self, text: &str) -> String {
        format!(
            "Translate the following text from {} into {}. Output only the translation, no explanations.\n\nText: \"{}\"",
            self.source_name, self.target_name, text
        )
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn translate(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: self.create_prompt(text),
            }],
            temperature: Some(0.3), // Lower temperature for more consistent translations
            max_tokens: None,
        };

        debug!("Translation request to {}", self.url);

        let mut req = self.client.post(&self.url).json(&request);

        // Add API key if configured
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let response = req.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate limited by {}", self.url);
            return Err(Error::Inference("rate limited by backend".to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API error: {} - {}", status, body);
            return Err(Error::Inference(format!("HTTP {status}: {body}")));
        }

        let chat_response: ChatResponse = response.json().await?;
        let Some(choice) = chat_response.choices.first() else {
            return Err(Error::InferenceInvalidResponse(
                "No choices in response".to_string(),
            ));
        };

        // Remove quotes if the model wrapped the response
        let translated = choice
            .message
            .content
            .trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .trim();

        if translated.is_empty() {
            return Err(Error::InferenceInvalidResponse("empty completion".to_string()));
        }

        Ok(translated.to_string())
    }
}

/// Convert language code to human-readable name for prompts
fn language_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "en" => "English",
        "fr" => "French",
        "es" => "Spanish",
        "de" => "German",
        "ca" => "Catalan",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "ru" => "Russian",
        "uk" => "Ukrainian",
        "pl" => "Polish",
        "cs" => "Czech",
        "sv" => "Swedish",
        "da" => "Danish",
        "fi" => "Finnish",
        "el" => "Greek",
        "tr" => "Turkish",
        "ar" => "Arabic",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "th" => "Thai",
        "vi" => "Vietnamese",
        "id" => "Indonesian",
        _ => return None,
    };
    Some(name)
}

const fn target_language_name(lang: TargetLang) -> &'static str {
    match lang {
        TargetLang::En => "English",
        TargetLang::Fr => "French",
        TargetLang::Es => "Spanish",
        TargetLang::De => "German",
    }
}
