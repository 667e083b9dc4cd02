//! Traits for text generation providers
//!
//! The pipeline only ever needs "send a prompt, get back text", so this is
//! the whole surface a provider has to implement. Authentication, model
//! selection and request encoding stay inside each implementation.

use super::errors::LLMResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-call request parameters
///
/// Unset fields fall back to the provider's own defaults. Providers that
/// cannot honour a parameter (DeepSeek has no top-k) ignore it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Instruction placed ahead of the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Ask for a JSON object instead of free text
    #[serde(default)]
    pub json_output: bool,
}

impl GenerationOptions {
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Core trait for text generation providers
///
/// Implementations must not cache responses: two identical calls make two
/// requests.
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Get the model ID being used
    fn model(&self) -> &str;

    /// Whether a credential was available when the client was built
    fn is_configured(&self) -> bool;

    /// Send one prompt and return the response text
    ///
    /// Returns `LLMError::NotConfigured` without touching the network when
    /// the client has no credential.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LLMResult<String>;
}
