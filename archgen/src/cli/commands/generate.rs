use super::{EXIT_UPSTREAM, read_requirements, report_failure};
use crate::cli::app::GenerateArgs;
use anyhow::{Context, Result};
use archgen_core::{
    ArchitectConfig, ArchitectureResult, Pipeline, RequirementsInput, build_pipeline,
};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};

/// Run the pipeline for one questionnaire
pub async fn execute(args: GenerateArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = ArchitectConfig::load(config_path)?;
    let pipeline = build_pipeline(&config).context("Failed to create provider clients")?;
    let input = read_requirements(&args.input)?;

    info!("Generating architecture for {}", args.input.display());

    let deadline = args.timeout.map(Duration::from_secs);
    let result = match run_with_deadline(&pipeline, &input, deadline).await {
        Ok(result) => result,
        Err(code) => return Ok(ExitCode::from(code)),
    };

    let json = render(&result, args.compact)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Architecture written to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(ExitCode::SUCCESS)
}

/// Run once, giving up after `deadline`; failures become an exit code
///
/// Hitting the deadline drops the run future and with it any request in
/// flight, and is reported like a failing provider.
async fn run_with_deadline(
    pipeline: &Pipeline,
    input: &RequirementsInput,
    deadline: Option<Duration>,
) -> Result<ArchitectureResult, u8> {
    let outcome = match deadline {
        Some(limit) => match tokio::time::timeout(limit, pipeline.run(input)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(timeout = ?limit, "Pipeline run timed out");
                eprintln!("Error: architecture generation timed out after {limit:?}");
                return Err(EXIT_UPSTREAM);
            }
        },
        None => pipeline.run(input).await,
    };

    outcome.map_err(|e| report_failure(&e))
}

fn render(result: &ArchitectureResult, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(result)
    } else {
        serde_json::to_string_pretty(result)
    };
    json.context("Failed to serialize architecture")
}
