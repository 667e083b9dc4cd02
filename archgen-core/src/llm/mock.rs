//! Mock text generation client for testing
//!
//! This module provides a scripted implementation of the
//! TextGenerationClient trait for use in unit tests only. It is not
//! available in production builds.

#![cfg(test)]

use super::errors::{LLMError, LLMResult};
use super::traits::{GenerationOptions, TextGenerationClient};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock client for testing
#[derive(Clone)]
pub struct MockTextClient {
    name: String,
    model: String,
    configured: bool,
    replies: Arc<Mutex<VecDeque<LLMResult<String>>>>,
    call_history: Arc<Mutex<Vec<(String, GenerationOptions)>>>,
}

impl MockTextClient {
    /// Create a new mock client
    pub fn new() -> Self {
        Self::with_model("mock", "mock-model")
    }

    /// Create a mock client with a specific name and model
    pub fn with_model(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            configured: true,
            replies: Arc::new(Mutex::new(VecDeque::new())),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A client that behaves as if no credential was set
    pub fn unconfigured(name: impl Into<String>) -> Self {
        let mut client = Self::with_model(name, "mock-model");
        client.configured = false;
        client
    }

    /// Queue a text reply
    pub fn add_response(&self, text: impl Into<String>) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue an error reply
    pub fn add_error(&self, error: LLMError) -> &Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of calls that reached this client
    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    /// Prompts and options received so far
    pub fn call_history(&self) -> Vec<(String, GenerationOptions)> {
        self.call_history.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationClient for MockTextClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> LLMResult<String> {
        if !self.configured {
            return Err(LLMError::not_configured(&self.name, "mock client has no credential"));
        }

        self.call_history.lock().unwrap().push((prompt.to_string(), options.clone()));

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_basic() {
        let client = MockTextClient::new();
        assert_eq!(client.name(), "mock");
        assert_eq!(client.model(), "mock-model");
        assert!(client.is_configured());

        client.add_response("first").add_response("second");
        let options = GenerationOptions::default();

        assert_eq!(client.generate("a", &options).await.unwrap(), "first");
        assert_eq!(client.generate("b", &options).await.unwrap(), "second");
        assert_eq!(client.generate("c", &options).await.unwrap(), "Mock response");

        let history = client.call_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].0, "a");
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let client = MockTextClient::new();
        client.add_error(LLMError::auth("Invalid API key"));

        let result = client.generate("Test", &GenerationOptions::default()).await;
        assert!(result.unwrap_err().to_string().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_unconfigured_mock_records_nothing() {
        let client = MockTextClient::unconfigured("gemini");
        let err = client.generate("Test", &GenerationOptions::default()).await.unwrap_err();

        assert!(matches!(err, LLMError::NotConfigured { .. }));
        assert_eq!(client.call_count(), 0);
    }
}
