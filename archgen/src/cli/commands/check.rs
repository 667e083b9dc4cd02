use super::EXIT_CONFIGURATION;
use anyhow::{Context, Result};
use archgen_core::llm::TextGenerationClient;
use archgen_core::{ArchitectConfig, build_pipeline};
use std::path::Path;
use std::process::ExitCode;

/// Report which provider serves each stage and whether it can be used
pub fn execute(config_path: Option<&Path>) -> Result<ExitCode> {
    let config = ArchitectConfig::load(config_path)?;
    let pipeline = build_pipeline(&config).context("Failed to create provider clients")?;

    let stages = [
        ("enhancement", config.pipeline.enhancement_provider, pipeline.enhancer().client()),
        ("generation", config.pipeline.generation_provider, pipeline.generator().client()),
    ];

    let mut ready = true;
    for (stage, kind, client) in stages {
        let key_env = &config.providers.get(kind).api_key_env;
        println!("{}", describe(stage, client, key_env));
        ready &= client.is_configured();
    }

    if config.pipeline.is_single_provider() {
        println!("Both stages share one {} client", config.pipeline.enhancement_provider);
    }

    Ok(if ready { ExitCode::SUCCESS } else { ExitCode::from(EXIT_CONFIGURATION) })
}

fn describe(stage: &str, client: &dyn TextGenerationClient, key_env: &str) -> String {
    let credential = if client.is_configured() { "present" } else { "missing" };
    format!(
        "{stage:<12} {} ({}) - credential {credential} ({key_env})",
        client.name(),
        client.model()
    )
}
