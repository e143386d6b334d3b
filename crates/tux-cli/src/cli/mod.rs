//! CLI argument definitions for the `tux` binary.
//!
//! Uses clap derive macros for argument parsing. There are no subcommands:
//! running `tux` starts an interactive chat.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

/// Chat with Tux, a blunt senior MLOps engineer.
#[derive(Parser, Debug)]
#[command(name = "tux", version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML config file (default: ./tux.toml).
    #[arg(short, long, env = "TUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for personality decoration, for reproducible replies.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress the banner and all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export completion spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tux"]).unwrap();
        assert!(cli.seed.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.otel);
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["tux", "-vv", "--seed", "42", "--config", "my.toml", "--otel"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(cli.otel);
    }

    #[test]
    fn test_invalid_seed_rejected() {
        assert!(Cli::try_parse_from(["tux", "--seed", "abc"]).is_err());
    }
}
