//! Command-line interface definitions for TOI Headlines.
//!
//! Every option is optional: with no arguments the program shows the
//! category menu and uses the built-in configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the TOI Headlines application.
///
/// # Examples
///
/// ```sh
/// # Interactive menu
/// toi_headlines
///
/// # Straight to a section, five headlines, as JSON
/// toi_headlines --category sports --limit 5 --format json
///
/// # Tuned extraction rules
/// toi_headlines --config ./toi_headlines.yaml -c 2
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Category key or menu number (1-10); prompts when omitted
    #[arg(short, long)]
    pub category: Option<String>,

    /// Maximum number of headlines to show (overrides the config file)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Path to a YAML config file
    #[arg(long, env = "TOI_HEADLINES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub dump_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["toi_headlines"]);
        assert_eq!(cli.category, None);
        assert_eq!(cli.limit, None);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.dump_config);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "toi_headlines",
            "--category",
            "sports",
            "--limit",
            "5",
            "--timeout-secs",
            "3",
            "--format",
            "json",
            "--config",
            "/tmp/toi.yaml",
        ]);

        assert_eq!(cli.category.as_deref(), Some("sports"));
        assert_eq!(cli.limit, Some(5));
        assert_eq!(cli.timeout_secs, Some(3));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/toi.yaml")));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["toi_headlines", "-c", "2", "-n", "3", "-f", "json"]);

        assert_eq!(cli.category.as_deref(), Some("2"));
        assert_eq!(cli.limit, Some(3));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["toi_headlines", "--format", "xml"]).is_err());
    }
}
