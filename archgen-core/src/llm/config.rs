//! Provider configuration
//!
//! Settings are plain data loaded from TOML. Credentials are never stored
//! here: each provider names the environment variable that holds its key,
//! and [`ProviderSettings::resolve`] reads it once at startup.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Supported text generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Deepseek,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Deepseek => write!(f, "deepseek"),
        }
    }
}

/// Connection settings for a single provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model identifier used when `model_env` is unset
    pub model: String,

    /// Environment variable that overrides `model` (empty disables)
    pub model_env: String,

    pub base_url: String,

    /// Transport timeout for a single request
    pub timeout_secs: u64,
}

impl ProviderSettings {
    /// Defaults for Google Gemini
    pub fn gemini() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            model_env: "GEMINI_MODEL".to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Defaults for DeepSeek's OpenAI-compatible API
    pub fn deepseek() -> Self {
        Self {
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            model: DEFAULT_DEEPSEEK_MODEL.to_string(),
            model_env: "DEEPSEEK_MODEL".to_string(),
            base_url: DEEPSEEK_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Resolve credential and model from the process environment
    pub fn resolve(&self) -> ProviderCredentials {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve credential and model through `lookup`
    ///
    /// Blank values count as missing.
    pub fn resolve_with<F>(&self, lookup: F) -> ProviderCredentials
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            if name.is_empty() {
                return None;
            }
            lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        let model = read(&self.model_env).unwrap_or_else(|| self.model.trim().to_string());

        ProviderCredentials { api_key: read(&self.api_key_env), model }
    }
}

/// Values read from the environment once at startup
#[derive(Clone, PartialEq)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    pub model: String,
}

impl ProviderCredentials {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self { api_key, model: model.into() }
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

/// Settings for every known provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProvidersConfig")]
pub struct ProvidersConfig {
    pub gemini: ProviderSettings,
    pub deepseek: ProviderSettings,
}

impl ProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &ProviderSettings {
        match kind {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Deepseek => &self.deepseek,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self { gemini: ProviderSettings::gemini(), deepseek: ProviderSettings::deepseek() }
    }
}

/// On-disk form where every field may be omitted
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProvidersConfig {
    gemini: ProviderOverrides,
    deepseek: ProviderOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderOverrides {
    api_key_env: Option<String>,
    model: Option<String>,
    model_env: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ProviderOverrides {
    fn apply(self, base: ProviderSettings) -> ProviderSettings {
        ProviderSettings {
            api_key_env: self.api_key_env.unwrap_or(base.api_key_env),
            model: self.model.unwrap_or(base.model),
            model_env: self.model_env.unwrap_or(base.model_env),
            base_url: self.base_url.unwrap_or(base.base_url),
            timeout_secs: self.timeout_secs.unwrap_or(base.timeout_secs),
        }
    }
}

impl From<RawProvidersConfig> for ProvidersConfig {
    fn from(raw: RawProvidersConfig) -> Self {
        Self {
            gemini: raw.gemini.apply(ProviderSettings::gemini()),
            deepseek: raw.deepseek.apply(ProviderSettings::deepseek()),
        }
    }
}
