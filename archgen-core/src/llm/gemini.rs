//! Google Gemini provider using the `generateContent` REST endpoint

use super::config::{ProviderCredentials, ProviderSettings};
use super::errors::{LLMError, LLMResult};
use super::traits::{GenerationOptions, TextGenerationClient};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const PROVIDER: &str = "gemini";

/// Gemini provider
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Build a client from settings and credentials resolved at startup
    pub fn new(settings: &ProviderSettings, credentials: ProviderCredentials) -> LLMResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(settings.timeout_secs)).build()?;

        if credentials.api_key.is_none() {
            warn!(
                "Gemini API key not found in {}; calls will fail until it is configured",
                settings.api_key_env
            );
        }

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: credentials.model,
            api_key: credentials.api_key,
        })
    }

    fn build_request(prompt: &str, options: &GenerationOptions) -> GenerateContentRequest {
        // Gemini takes one text turn; the system instruction leads it
        let text = match &options.system {
            Some(system) => format!("{}\n\n{}", system, prompt),
            None => prompt.to_string(),
        };

        let generation_config = GenerationConfig {
            temperature: options.temperature,
            top_p: options.top_p,
            top_k: options.top_k,
            max_output_tokens: options.max_output_tokens,
            response_mime_type: options.json_output.then(|| "application/json".to_string()),
        };

        GenerateContentRequest {
            contents: vec![Content { role: "user".to_string(), parts: vec![Part { text }] }],
            generation_config: (!generation_config.is_empty()).then_some(generation_config),
        }
    }
}

#[async_trait]
impl TextGenerationClient for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LLMResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::not_configured(PROVIDER, "Gemini API key not configured"))?;

        let request = Self::build_request(prompt, options);
        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(super::error_from_response(response).await);
        }

        let result: GenerateContentResponse = response.json().await?;
        let text = result.text();
        if text.trim().is_empty() {
            if let Some(reason) = result.block_reason() {
                return Err(LLMError::content_filtered(reason));
            }
            return Err(LLMError::empty(PROVIDER));
        }

        debug!(model = %self.model, response_chars = text.len(), "Gemini response received");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.top_k.is_none()
            && self.max_output_tokens.is_none()
            && self.response_mime_type.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref().and_then(|f| f.block_reason.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
