//! CLI command definitions and dispatch.

pub mod config;
pub mod journal;
pub mod serve;

use anyhow::Context;
use clap::{Parser, Subcommand};

use notihub_core::config::AppConfig;

use crate::output::OutputFormat;

/// NotiHub: real-time notification fan-out hub
#[derive(Debug, Parser)]
#[command(name = "notihub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Configuration overlay environment
    #[arg(short, long, env = "NOTIHUB_ENV", default_value = "development")]
    pub env: String,

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
    /// Start the NotiHub server
    Serve(serve::ServeArgs),
    /// Inspect the accepted-identifier journal
    Journal(journal::JournalArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self).await,
            Commands::Journal(args) => journal::execute(args, self).await,
            Commands::Config(args) => config::execute(args, self),
        }
    }

    /// Load layered configuration for this invocation
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        AppConfig::load(&self.config, &self.env)
            .with_context(|| format!("Failed to load config '{}'", self.config))
    }
}
