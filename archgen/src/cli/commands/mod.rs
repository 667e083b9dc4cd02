//! Command implementations
//!
//! Every command returns the process exit code. Pipeline failures map to a
//! code per category so scripts can tell a missing credential (2) from a
//! failing provider (3) and an unusable model answer (4).

pub mod check;
pub mod format;
pub mod generate;

use anyhow::{Context, Result};
use archgen_core::{ErrorCategory, PipelineError, RequirementsInput};
use std::io::Read;
use std::path::Path;

pub const EXIT_CONFIGURATION: u8 = 2;
pub const EXIT_UPSTREAM: u8 = 3;
pub const EXIT_INVALID_OUTPUT: u8 = 4;

/// Read and decode a questionnaire; `-` means stdin
pub fn read_requirements(path: &Path) -> Result<RequirementsInput> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read requirements from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file {}", path.display()))?
    };

    parse_requirements(&content)
}

pub fn parse_requirements(content: &str) -> Result<RequirementsInput> {
    serde_json::from_str(content).context("Invalid requirements JSON")
}

pub fn exit_code(category: ErrorCategory) -> u8 {
    match category {
        ErrorCategory::Configuration => EXIT_CONFIGURATION,
        ErrorCategory::Upstream => EXIT_UPSTREAM,
        ErrorCategory::InvalidOutput => EXIT_INVALID_OUTPUT,
    }
}

/// Report a pipeline failure the way an HTTP boundary would
pub fn report_failure(err: &PipelineError) -> u8 {
    eprintln!("Error ({}): {}", err.status_code(), err.public_message());
    exit_code(err.category())
}
