//! CLI module for refdesk - command-line interface and subcommands.
//!
//! Provides the main entry point with the interactive prompt as the default
//! and a one-shot `ask` subcommand.

pub mod commands;

pub use commands::Cli;
