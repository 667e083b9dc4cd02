//! Stage 2: generate the architecture document from the enhanced prompt

use super::enhancer::EnhancedPrompt;
use crate::error::{PipelineError, Stage};
use crate::llm::{GenerationOptions, TextGenerationClient};
use std::sync::Arc;
use tracing::{debug, trace};

pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Generation instruction template, v1
pub const ARCHITECTURE_SYSTEM_PROMPT: &str = r#"You are an expert software architect with deep knowledge of system design, architecture patterns, cloud infrastructure, databases, security, and modern development practices.

Based on the requirements that follow, generate a comprehensive, production-ready solution architecture.

IMPORTANT: Respond with ONLY valid JSON in this exact structure (no markdown, no code blocks, no additional text):

{
  "architecture": {
    "overview": "A comprehensive overview of the proposed architecture (3-4 sentences)",
    "components": [
      {
        "name": "Component Name",
        "description": "Detailed description of this component's role and responsibilities",
        "technology": "Specific technology/framework/service to use",
        "reasoning": "Why this technology was chosen for this component"
      }
    ],
    "patterns": ["List of architectural patterns used, e.g., 'Microservices', 'Event-Driven', 'CQRS'"],
    "reasoning": "Overall architectural reasoning explaining why this architecture best fits the requirements"
  },
  "recommendations": [
    "Specific actionable recommendations for implementation, deployment, and operations"
  ],
  "tradeoffs": [
    "Key tradeoffs made in this architecture and their implications"
  ]
}

Include at least 5 and at most 8 components covering frontend, backend, database, caching, messaging, monitoring, etc. as appropriate. Be specific and technical, and consider scalability, security, cost, maintainability, and team capabilities."#;

/// Unprocessed stage-2 reply; may still carry markdown fences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArchitectureText(String);

impl RawArchitectureText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fixed sampling options for stage 2
pub fn generation_options() -> GenerationOptions {
    GenerationOptions::default()
        .with_system(ARCHITECTURE_SYSTEM_PROMPT)
        .with_temperature(TEMPERATURE)
        .with_top_p(TOP_P)
        .with_top_k(TOP_K)
        .with_max_output_tokens(MAX_OUTPUT_TOKENS)
        .json()
}

pub struct ArchitectureGenerator {
    client: Arc<dyn TextGenerationClient>,
}

impl ArchitectureGenerator {
    pub fn new(client: Arc<dyn TextGenerationClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &dyn TextGenerationClient {
        self.client.as_ref()
    }

    /// One call to the generation provider, no retries
    pub async fn generate(
        &self,
        prompt: &EnhancedPrompt,
    ) -> Result<RawArchitectureText, PipelineError> {
        let provider = self.client.name();

        let text = self
            .client
            .generate(prompt.as_str(), &generation_options())
            .await
            .map_err(|e| PipelineError::from_llm(Stage::Generating, provider, e))?;

        debug!(provider, chars = text.len(), "Architecture text received");
        trace!(raw = %text, "Raw architecture text");
        Ok(RawArchitectureText(text))
    }
}
