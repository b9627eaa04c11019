//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};

use super::Cli;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secret masked)
    Show,
    /// Validate the configuration
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, cli: &Cli) -> anyhow::Result<()> {
    let mut config = cli.load_config()?;

    match &args.command {
        ConfigCommand::Show => {
            config.auth.shared_secret = mask_secret(&config.auth.shared_secret);
            output::print_value(&config, cli.format);
        }
        ConfigCommand::Validate => {
            if cli.format == OutputFormat::Json {
                output::print_value(&serde_json::json!({ "valid": true }), cli.format);
                return Ok(());
            }
            output::print_success(&format!("Configuration '{}' is valid", cli.config));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Journal", &config.journal.path);
            output::print_kv(
                "Shared secret",
                if config.auth.is_enforced() { "enforced" } else { "disabled" },
            );
            output::print_kv(
                "Ping interval",
                &format!("{}s", config.realtime.ping_interval().as_secs()),
            );
        }
    }

    Ok(())
}

/// Masks a secret for display
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("s3cret"), "****");
    }
}
