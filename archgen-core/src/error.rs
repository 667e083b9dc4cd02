//! Pipeline error taxonomy
//!
//! Four failure kinds, each with a different operator remedy:
//! missing configuration, a failing upstream provider, output that is not
//! JSON at all, and JSON that lacks required fields.

use crate::llm::LLMError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Longest diagnostic or excerpt shown to callers
const MAX_PUBLIC_CHARS: usize = 200;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Formatting,
    Enhancing,
    Generating,
    Sanitizing,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Formatting => "formatting",
            Stage::Enhancing => "enhancing",
            Stage::Generating => "generating",
            Stage::Sanitizing => "sanitizing",
            Stage::Validating => "validating",
        };
        f.write_str(name)
    }
}

/// Coarse grouping used at the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// A provider has no credential
    Configuration,
    /// A provider call failed
    Upstream,
    /// The model answered with something unusable
    InvalidOutput,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Provider '{provider}' is not configured (needed for {stage})")]
    ProviderUnavailable { provider: String, stage: Stage },

    #[error("Provider '{provider}' failed while {stage}")]
    Provider {
        provider: String,
        stage: Stage,
        #[source]
        source: LLMError,
    },

    #[error("Model output is not valid JSON: {diagnostic}")]
    MalformedOutput { diagnostic: String, excerpt: String },

    #[error("Model output violates the architecture schema: '{field}' {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl PipelineError {
    /// Attribute a provider failure to `stage`
    pub fn from_llm(stage: Stage, provider: &str, error: LLMError) -> Self {
        match error {
            LLMError::NotConfigured { provider, .. } => {
                Self::ProviderUnavailable { provider, stage }
            }
            source => Self::Provider { provider: provider.to_string(), stage, source },
        }
    }

    /// Parse failure, keeping only a short excerpt of the offending text
    pub fn malformed(error: &serde_json::Error, text: &str) -> Self {
        Self::MalformedOutput { diagnostic: error.to_string(), excerpt: truncate(text) }
    }

    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation { field: field.into(), reason: reason.into() }
    }

    /// Stage the failure belongs to
    pub fn stage(&self) -> Stage {
        match self {
            Self::ProviderUnavailable { stage, .. } | Self::Provider { stage, .. } => *stage,
            Self::MalformedOutput { .. } | Self::SchemaViolation { .. } => Stage::Validating,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProviderUnavailable { .. } => ErrorCategory::Configuration,
            Self::Provider { .. } => ErrorCategory::Upstream,
            Self::MalformedOutput { .. } | Self::SchemaViolation { .. } => {
                ErrorCategory::InvalidOutput
            }
        }
    }

    /// HTTP status for a transport layer; always a server error
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Configuration => 503,
            ErrorCategory::Upstream => 502,
            ErrorCategory::InvalidOutput => 500,
        }
    }

    /// Message safe to hand to an end user
    ///
    /// Never includes credentials or raw model output beyond a short
    /// diagnostic.
    pub fn public_message(&self) -> String {
        match self {
            Self::ProviderUnavailable { provider, .. } => format!(
                "Configuration error: the '{provider}' provider has no API key configured"
            ),
            Self::Provider { provider, source, .. } => {
                format!("Upstream provider '{provider}' failed: {}", truncate(&source.to_string()))
            }
            Self::MalformedOutput { diagnostic, .. } => format!(
                "The generated architecture could not be parsed: {}",
                truncate(diagnostic)
            ),
            Self::SchemaViolation { field, reason } => format!(
                "The generated architecture is incomplete: '{field}' {}",
                truncate(reason)
            ),
        }
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_PUBLIC_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_becomes_unavailable() {
        let err = PipelineError::from_llm(
            Stage::Enhancing,
            "gemini",
            LLMError::not_configured("gemini", "missing key"),
        );
        assert!(matches!(
            err,
            PipelineError::ProviderUnavailable { ref provider, stage: Stage::Enhancing }
                if provider == "gemini"
        ));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.status_code(), 503);
    }

    #[test]
    fn test_call_failures_keep_their_source() {
        let err =
            PipelineError::from_llm(Stage::Generating, "deepseek", LLMError::api(500, "boom"));
        assert_eq!(err.stage(), Stage::Generating);
        assert_eq!(err.status_code(), 502);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("boom"));
    }

    #[test]
    fn test_provider_message_leaves_cause_to_source_chain() {
        let err =
            PipelineError::from_llm(Stage::Generating, "deepseek", LLMError::api(500, "boom"));

        assert_eq!(err.to_string(), "Provider 'deepseek' failed while generating");

        // Walking the chain the way anyhow's `{:#}` does names the cause once
        let mut chain = vec![err.to_string()];
        let mut next = std::error::Error::source(&err);
        while let Some(cause) = next {
            chain.push(cause.to_string());
            next = std::error::Error::source(cause);
        }
        let rendered = chain.join(": ");
        assert_eq!(rendered.matches("boom").count(), 1);
        assert!(err.public_message().contains("boom"));
    }

    #[test]
    fn test_output_errors_are_server_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let malformed = PipelineError::malformed(&json_err, "nope");
        let schema = PipelineError::schema("architecture.overview", "is missing");

        for err in [&malformed, &schema] {
            assert_eq!(err.category(), ErrorCategory::InvalidOutput);
            assert_eq!(err.status_code(), 500);
            assert_eq!(err.stage(), Stage::Validating);
        }
        assert_eq!(
            schema.to_string(),
            "Model output violates the architecture schema: 'architecture.overview' is missing"
        );
    }

    #[test]
    fn test_public_message_truncates_raw_text() {
        let raw = "word ".repeat(500);
        let json_err = serde_json::from_str::<serde_json::Value>(&raw).unwrap_err();
        let err = PipelineError::malformed(&json_err, &raw);

        let PipelineError::MalformedOutput { excerpt, .. } = &err else {
            panic!("expected malformed output");
        };
        assert!(excerpt.len() < raw.len());
        assert!(!err.public_message().contains(&raw));
    }

    #[test]
    fn test_public_message_does_not_expose_provider_body_in_full() {
        let body = "x".repeat(250);
        let err =
            PipelineError::from_llm(Stage::Enhancing, "gemini", LLMError::api(500, body.clone()));
        assert!(!err.public_message().contains(&body));
        assert!(err.public_message().starts_with("Upstream provider 'gemini' failed"));
    }
}
