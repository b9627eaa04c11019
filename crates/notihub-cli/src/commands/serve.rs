//! Start the NotiHub server.

use clap::Args;

use super::Cli;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the journal file path
    #[arg(long)]
    pub journal: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, cli: &Cli) -> anyhow::Result<()> {
    let mut config = cli.load_config()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref journal) = args.journal {
        config.journal.path = journal.clone();
    }

    println!("Starting NotiHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Journal: {}", config.journal.path);

    notihub_api::run_server(config).await?;
    Ok(())
}
