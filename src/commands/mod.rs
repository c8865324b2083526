//! CLI command definitions and dispatch.

pub mod demo;
pub mod inspect;
pub mod issue;
pub mod picklist;

use clap::{Parser, Subcommand};

use tokenward_core::config::AppConfig;
use tokenward_core::error::AppError;

use crate::output::OutputFormat;

/// Tokenward: issue, inspect and exercise session tokens
#[derive(Debug, Parser)]
#[command(name = "tokenward", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log a user in and print the issued token pair
    Issue(issue::IssueArgs),
    /// Validate a token and print its claims
    Inspect(inspect::InspectArgs),
    /// Walk a session through login, principal resolution, refresh and logout
    Demo(demo::DemoArgs),
    /// Load a picklist from a JSON file through the list cache
    Picklist(picklist::PicklistArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Issue(args) => issue::execute(args, config, self.format).await,
            Commands::Inspect(args) => inspect::execute(args, config, self.format).await,
            Commands::Demo(args) => demo::execute(args, config, self.format).await,
            Commands::Picklist(args) => picklist::execute(args, config, self.format).await,
        }
    }
}
