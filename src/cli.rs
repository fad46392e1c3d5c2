//! CLI argument parsing for Trenzar

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trenzar")]
#[command(version)]
#[command(about = "Turn model-checker concurrency traces into annotated JSON timelines", long_about = None)]
pub struct Cli {
    /// Recorded trace file to format (JSON)
    #[arg(value_name = "TRACE")]
    pub trace: PathBuf,

    /// Write the document to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit compact single-line JSON instead of pretty-printed
    #[arg(long = "compact")]
    pub compact: bool,

    /// Enable debug logging on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_trace_path() {
        let cli = Cli::parse_from(["trenzar", "trace.json"]);
        assert_eq!(cli.trace, PathBuf::from("trace.json"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_output_flag() {
        let cli = Cli::parse_from(["trenzar", "trace.json", "-o", "out.json"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));

        let cli = Cli::parse_from(["trenzar", "trace.json", "--output", "out.json"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_cli_compact_default_false() {
        let cli = Cli::parse_from(["trenzar", "trace.json"]);
        assert!(!cli.compact);

        let cli = Cli::parse_from(["trenzar", "trace.json", "--compact"]);
        assert!(cli.compact);
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["trenzar", "trace.json", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_requires_trace_argument() {
        assert!(Cli::try_parse_from(["trenzar"]).is_err());
    }
}
