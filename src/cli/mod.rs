//! Command-line interface for chapter-audit
//!
//! This module provides the main CLI structure, logging setup and command
//! dispatch. Running without a subcommand runs the default profile.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

use crate::config::AuditorConfig;

/// Audit numbered markdown chapters for terminology
#[derive(Parser)]
#[command(name = "chapter-audit", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of the current working directory
    #[arg(short = 'C', long = "directory", value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file merged over the built-in defaults
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run an audit profile and print its report
    Run(commands::run::RunArgs),
    /// List the configured audit profiles
    List(commands::list::ListArgs),
    /// Configuration management
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = AuditorConfig::load(self.config.as_deref())?;

        match self.command {
            Some(Commands::Run(args)) => commands::run::execute(args, &config, &output),
            Some(Commands::List(args)) => commands::list::execute(args, &config, &output),
            Some(Commands::Config(args)) => commands::config::execute(args, &config, &output),
            None => commands::run::execute(Default::default(), &config, &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Keep globset/walkdir chatter out unless fully verbose
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,globset=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::parse_from([
            "chapter-audit",
            "-vv",
            "run",
            "handedness",
            "--root",
            "book",
            "--min",
            "2",
            "--max",
            "9",
            "--keep-going",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.profile.as_deref(), Some("handedness"));
                assert_eq!(args.root, Some(PathBuf::from("book")));
                assert_eq!(args.min, Some(2));
                assert_eq!(args.max, Some(9));
                assert!(args.keep_going);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["chapter-audit"]);
        assert!(cli.command.is_none());
    }
}
