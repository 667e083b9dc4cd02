//! Application configuration
//!
//! ```toml
//! [providers.gemini]
//! model = "gemini-1.5-flash"
//!
//! [providers.deepseek]
//! api_key_env = "DEEPSEEK_API_KEY"
//!
//! [pipeline]
//! enhancement_provider = "gemini"
//! generation_provider = "deepseek"
//! ```

use crate::llm::{ProviderKind, ProvidersConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration; every table may be omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectConfig {
    pub providers: ProvidersConfig,
    pub pipeline: PipelineConfig,
}

/// Which provider serves each stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub enhancement_provider: ProviderKind,
    pub generation_provider: ProviderKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enhancement_provider: ProviderKind::Gemini,
            generation_provider: ProviderKind::Gemini,
        }
    }
}

impl PipelineConfig {
    /// Both stages served by the same provider
    pub fn is_single_provider(&self) -> bool {
        self.enhancement_provider == self.generation_provider
    }
}

impl ArchitectConfig {
    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_use_gemini_for_both_stages() {
        let config = ArchitectConfig::load(None).unwrap();
        assert_eq!(config.pipeline.enhancement_provider, ProviderKind::Gemini);
        assert_eq!(config.pipeline.generation_provider, ProviderKind::Gemini);
        assert!(config.pipeline.is_single_provider());
    }

    #[test]
    fn test_dual_provider_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("archgen.toml");
        fs::write(
            &path,
            r#"
[providers.deepseek]
model = "deepseek-reasoner"

[pipeline]
generation_provider = "deepseek"
"#,
        )
        .unwrap();

        let config = ArchitectConfig::load(Some(&path)).unwrap();
        assert_eq!(config.pipeline.enhancement_provider, ProviderKind::Gemini);
        assert_eq!(config.pipeline.generation_provider, ProviderKind::Deepseek);
        assert_eq!(config.providers.deepseek.model, "deepseek-reasoner");
        assert_eq!(config.providers.gemini.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("archgen.toml");

        let mut config = ArchitectConfig::default();
        config.pipeline.generation_provider = ProviderKind::Deepseek;
        config.providers.gemini.timeout_secs = 30;
        config.save(&path).unwrap();

        assert_eq!(ArchitectConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[pipeline]\ngeneration_provider = \"openai\"\n").unwrap();

        let err = ArchitectConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(ArchitectConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
