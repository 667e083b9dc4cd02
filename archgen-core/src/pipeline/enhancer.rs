//! Stage 1: turn the formatted brief into a detailed architecture prompt

use crate::error::{PipelineError, Stage};
use crate::llm::{GenerationOptions, LLMError, TextGenerationClient};
use crate::requirements::FormattedRequirements;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Placeholder replaced by the formatted requirements
const REQUIREMENTS_SLOT: &str = "{requirements}";

/// Enhancement instruction template, v1
pub const ENHANCEMENT_TEMPLATE: &str = "\
You are an expert solution architect prompt engineer. Your task is to take the user's requirements for a software system and transform them into a comprehensive, detailed prompt that can be used to generate a complete solution architecture.

The user has provided the following requirements:

{requirements}

Your task is to:
1. Analyze all the provided requirements (performance, business, technical, security, etc.)
2. Identify any implicit requirements or constraints that should be considered
3. Create a detailed, structured prompt that incorporates all requirements
4. The prompt should guide the generation of a complete solution architecture including:
   - System components and their responsibilities
   - Technology stack recommendations with justifications
   - Architectural patterns and design decisions
   - Scalability and performance strategies
   - Security architecture
   - Deployment and infrastructure strategy
   - Trade-offs and decision rationale

Generate a comprehensive prompt that will help create a professional solution architecture document. The prompt should be detailed, specific, and technical.

OUTPUT ONLY THE ENHANCED PROMPT, nothing else. Do not include any preamble or explanation.";

/// Stage-1 output, passed to the generator uninspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedPrompt(String);

impl EnhancedPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnhancedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the stage-1 instruction for `requirements`
pub fn enhancement_prompt(requirements: &FormattedRequirements) -> String {
    ENHANCEMENT_TEMPLATE.replacen(REQUIREMENTS_SLOT, requirements.as_str(), 1)
}

pub struct PromptEnhancer {
    client: Arc<dyn TextGenerationClient>,
}

impl PromptEnhancer {
    pub fn new(client: Arc<dyn TextGenerationClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &dyn TextGenerationClient {
        self.client.as_ref()
    }

    /// One call to the enhancement provider, no retries
    pub async fn enhance(
        &self,
        requirements: &FormattedRequirements,
    ) -> Result<EnhancedPrompt, PipelineError> {
        let prompt = enhancement_prompt(requirements);
        let provider = self.client.name();

        let text = self
            .client
            .generate(&prompt, &GenerationOptions::default())
            .await
            .map_err(|e| PipelineError::from_llm(Stage::Enhancing, provider, e))?;

        let enhanced = text.trim();
        if enhanced.is_empty() {
            let error = LLMError::empty(provider);
            return Err(PipelineError::from_llm(Stage::Enhancing, provider, error));
        }

        debug!(provider, chars = enhanced.len(), "Prompt enhanced");
        trace!(prompt = enhanced, "Enhanced prompt");
        Ok(EnhancedPrompt(enhanced.to_string()))
    }
}
