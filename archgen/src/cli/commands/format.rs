use super::read_requirements;
use crate::cli::app::FormatArgs;
use anyhow::Result;
use archgen_core::format_requirements;
use std::process::ExitCode;

/// Print the brief that would be sent to the enhancement stage
pub fn execute(args: FormatArgs) -> Result<ExitCode> {
    let input = read_requirements(&args.input)?;
    println!("{}", format_requirements(&input));
    Ok(ExitCode::SUCCESS)
}
