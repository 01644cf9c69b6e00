//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - default (no subcommand): interactive prompt
//! - ask: answer a single query and exit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// refdesk - route natural-language queries to directory and catalog services
#[derive(Parser, Debug)]
#[command(name = "refdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single query and exit
    Ask {
        /// The query to route
        query: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_subcommand() {
        let cli = Cli::parse_from(["refdesk"]);
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_cli_ask() {
        let cli = Cli::parse_from(["refdesk", "ask", "find Jane Doe"]);
        match cli.command {
            Some(Commands::Ask { query }) => assert_eq!(query, "find Jane Doe"),
            other => panic!("expected ask command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["refdesk", "--verbose", "--config", "custom.yml"]);
        assert!(cli.is_verbose());
        assert_eq!(cli.config.unwrap().to_str().unwrap(), "custom.yml");
    }
}
