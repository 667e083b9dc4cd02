//! Error types for LLM operations
//!
//! This module defines strongly-typed errors for calls made to text
//! generation providers, using thiserror for automatic error trait
//! implementations.

use std::time::Duration;
use thiserror::Error;

/// Longest provider error body kept in an error message
const MAX_BODY_CHARS: usize = 300;

/// Main error type for LLM operations
#[derive(Debug, Error)]
pub enum LLMError {
    /// No credential was configured for the provider
    #[error("Provider '{provider}' is not configured: {message}")]
    NotConfigured { provider: String, message: String },

    /// API key was rejected
    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    /// Rate limit has been exceeded
    #[error("Rate limit exceeded: {message}. Retry after {retry_after:?}")]
    RateLimitExceeded { message: String, retry_after: Option<Duration> },

    /// Request timed out
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// Network error occurred
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parsing error: {message}")]
    ParseError { message: String },

    /// Content was filtered
    #[error("Content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider answered without any text
    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },
}

impl LLMError {
    /// Create a missing-configuration error
    pub fn not_configured(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotConfigured { provider: provider.into(), message: message.into() }
    }

    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthenticationError { message: truncate(message.into()) }
    }

    /// Create a rate limit error
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimitExceeded { message: truncate(message.into()), retry_after }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout { message: message.into() }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError { status, message: truncate(message.into()) }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError { message: message.into() }
    }

    /// Create a content filtered error
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered { reason: reason.into() }
    }

    /// Create an empty response error
    pub fn empty(provider: impl Into<String>) -> Self {
        Self::EmptyResponse { provider: provider.into() }
    }

    /// Classify a non-success HTTP response
    pub fn from_status(
        status: u16,
        body: impl Into<String>,
        retry_after: Option<Duration>,
    ) -> Self {
        match status {
            401 | 403 => Self::auth(body),
            429 => Self::rate_limit(body, retry_after),
            408 | 504 => Self::timeout(format!("status {status}")),
            _ => Self::api(status, body),
        }
    }
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

/// Convert from transport errors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL in its message, which may carry a key
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout { message: err.to_string() }
        } else if err.is_decode() {
            Self::ParseError { message: err.to_string() }
        } else {
            Self::NetworkError { message: err.to_string() }
        }
    }
}

/// Convert from JSON errors
impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError { message: err.to_string() }
    }
}

fn truncate(mut message: String) -> String {
    if let Some((idx, _)) = message.char_indices().nth(MAX_BODY_CHARS) {
        message.truncate(idx);
        message.push_str("...");
    }
    message
}
