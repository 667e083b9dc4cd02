//! Text generation providers
//!
//! Each provider implements [`TextGenerationClient`] and owns its
//! authentication, model selection and request encoding.

pub mod config;
pub mod errors;
pub mod gemini;
pub mod openai_compat;
pub mod traits;

#[cfg(test)]
pub mod mock;

pub use config::{ProviderCredentials, ProviderKind, ProviderSettings, ProvidersConfig};
pub use errors::{LLMError, LLMResult};
pub use gemini::GeminiClient;
pub use openai_compat::OpenAICompatClient;
pub use traits::{GenerationOptions, TextGenerationClient};

use reqwest::header::RETRY_AFTER;
use std::sync::Arc;
use std::time::Duration;

/// Build the client for `kind`, resolving its credential from the environment
pub fn build_client(
    kind: ProviderKind,
    providers: &ProvidersConfig,
) -> LLMResult<Arc<dyn TextGenerationClient>> {
    let settings = providers.get(kind);
    build_client_with(kind, settings, settings.resolve())
}

/// Build the client for `kind` from already-resolved credentials
pub fn build_client_with(
    kind: ProviderKind,
    settings: &ProviderSettings,
    credentials: ProviderCredentials,
) -> LLMResult<Arc<dyn TextGenerationClient>> {
    Ok(match kind {
        ProviderKind::Gemini => Arc::new(GeminiClient::new(settings, credentials)?),
        ProviderKind::Deepseek => Arc::new(OpenAICompatClient::deepseek(settings, credentials)?),
    })
}

/// Turn a non-success HTTP response into an [`LLMError`]
pub(crate) async fn error_from_response(response: reqwest::Response) -> LLMError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);
    let body = response.text().await.unwrap_or_default();
    LLMError::from_status(status, body, retry_after)
}
