use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "archgen",
    version,
    about = "Archgen - Generate solution architectures from a requirements questionnaire",
    long_about = "Archgen turns a requirements questionnaire into a validated solution architecture. A first LLM call expands the answers into a detailed prompt; a second call produces the architecture as JSON, which is cleaned up and checked against the expected schema."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an architecture
    #[command(about = "Run the two-stage pipeline and print the architecture JSON")]
    Generate(GenerateArgs),

    /// Show the formatted brief
    #[command(about = "Print the brief sent to the enhancement stage without calling a provider")]
    Format(FormatArgs),

    /// Check provider wiring
    #[command(about = "Show the provider, model and credential status of each stage")]
    Check,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Questionnaire JSON file, or '-' for stdin
    #[arg(help = "Requirements questionnaire (JSON file, '-' reads stdin)")]
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Abort the whole run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Questionnaire JSON file, or '-' for stdin
    #[arg(help = "Requirements questionnaire (JSON file, '-' reads stdin)")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_flags() {
        let cli = Cli::parse_from([
            "archgen", "-vv", "--config", "archgen.toml", "generate", "req.json", "-o", "out.json",
            "--timeout", "90", "--compact",
        ]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("archgen.toml")));
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.input, PathBuf::from("req.json"));
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert_eq!(args.timeout, Some(90));
                assert!(args.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_stdin_marker_is_accepted() {
        let cli = Cli::parse_from(["archgen", "format", "-"]);
        assert!(matches!(
            cli.command,
            Commands::Format(ref args) if args.input == PathBuf::from("-")
        ));
    }

    #[test]
    fn test_check_takes_no_arguments() {
        assert!(Cli::try_parse_from(["archgen", "check", "extra"]).is_err());
        assert!(matches!(Cli::parse_from(["archgen", "check"]).command, Commands::Check));
    }
}
