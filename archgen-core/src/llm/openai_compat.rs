//! OpenAI-compatible provider
//!
//! DeepSeek exposes the OpenAI chat completions API under its own base URL,
//! so one client covers it and any other compatible service.

use super::config::{ProviderCredentials, ProviderSettings};
use super::errors::{LLMError, LLMResult};
use super::traits::{GenerationOptions, TextGenerationClient};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// DeepSeek caps completions at 8K tokens
const DEEPSEEK_MAX_OUTPUT_TOKENS: u32 = 8192;

/// OpenAI-compatible provider that can work with multiple services
pub struct OpenAICompatClient {
    client: Client,
    provider: String,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_output_tokens: Option<u32>,
}

impl OpenAICompatClient {
    pub fn new(
        provider: impl Into<String>,
        settings: &ProviderSettings,
        credentials: ProviderCredentials,
    ) -> LLMResult<Self> {
        let provider = provider.into();
        let client = Client::builder().timeout(Duration::from_secs(settings.timeout_secs)).build()?;

        if credentials.api_key.is_none() {
            warn!(
                "{} API key not found in {}; calls will fail until it is configured",
                provider, settings.api_key_env
            );
        }

        Ok(Self {
            client,
            provider,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: credentials.model,
            api_key: credentials.api_key,
            max_output_tokens: None,
        })
    }

    /// Create a DeepSeek client
    pub fn deepseek(
        settings: &ProviderSettings,
        credentials: ProviderCredentials,
    ) -> LLMResult<Self> {
        let mut client = Self::new("deepseek", settings, credentials)?;
        client.max_output_tokens = Some(DEEPSEEK_MAX_OUTPUT_TOKENS);
        Ok(client)
    }

    fn build_request(&self, prompt: &str, options: &GenerationOptions) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &options.system {
            messages.push(ChatMessage { role: "system".to_string(), content: system.clone() });
        }
        messages.push(ChatMessage { role: "user".to_string(), content: prompt.to_string() });

        let max_tokens = match (options.max_output_tokens, self.max_output_tokens) {
            (Some(requested), Some(cap)) => Some(requested.min(cap)),
            (requested, _) => requested,
        };

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens,
            response_format: options
                .json_output
                .then(|| ResponseFormat { kind: "json_object".to_string() }),
            stream: false,
        }
    }
}

#[async_trait]
impl TextGenerationClient for OpenAICompatClient {
    fn name(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LLMResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            let message = format!("{} API key not configured", self.provider);
            LLMError::not_configured(&self.provider, message)
        })?;

        let request = self.build_request(prompt, options);
        debug!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(super::error_from_response(response).await);
        }

        let result: ChatCompletionResponse = response.json().await?;
        let text = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LLMError::empty(&self.provider))?;

        debug!(provider = %self.provider, response_chars = text.len(), "Chat completion received");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
