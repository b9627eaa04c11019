//! Journal inspection commands.
//!
//! These read the journal file directly; they never write it.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use notihub_journal::{FileJournalBackend, JournalStore};

use crate::output::{self, OutputFormat};

use super::Cli;

/// Arguments for journal commands
#[derive(Debug, Args)]
pub struct JournalArgs {
    /// Journal file, overriding `journal.path` from config
    #[arg(long)]
    pub path: Option<String>,

    /// Journal subcommand
    #[command(subcommand)]
    pub command: JournalCommand,
}

/// Journal subcommands
#[derive(Debug, Subcommand)]
pub enum JournalCommand {
    /// List accepted identifiers in acceptance order
    List {
        /// Show only the most recent N identifiers
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Check whether an identifier has been accepted
    Check {
        /// Event identifier (`trx`)
        trx: String,
    },
    /// Count accepted identifiers
    Count,
}

/// One journal row
#[derive(Debug, Serialize, Tabled)]
struct JournalRow {
    #[tabled(rename = "#")]
    position: usize,
    trx: String,
}

/// Execute journal commands
pub async fn execute(args: &JournalArgs, cli: &Cli) -> anyhow::Result<()> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => cli.load_config()?.journal.path,
    };
    let journal = JournalStore::load(Arc::new(FileJournalBackend::new(&path))).await;

    match &args.command {
        JournalCommand::List { limit } => {
            let ids = journal.snapshot();
            let skip = limit.map_or(0, |n| ids.len().saturating_sub(n));
            let rows = journal_rows(ids, skip);
            output::print_list(&rows, cli.format);
        }
        JournalCommand::Check { trx } => {
            let accepted = journal.contains(trx);
            match cli.format {
                OutputFormat::Json => output::print_value(
                    &serde_json::json!({ "trx": trx, "accepted": accepted }),
                    cli.format,
                ),
                OutputFormat::Table => {
                    if accepted {
                        output::print_success(&format!("'{}' has been accepted", trx));
                    } else {
                        println!("'{}' is not in the journal", trx);
                    }
                }
            }
        }
        JournalCommand::Count => match cli.format {
            OutputFormat::Json => output::print_value(
                &serde_json::json!({ "path": path, "count": journal.len() }),
                cli.format,
            ),
            OutputFormat::Table => {
                output::print_kv("Journal", &path);
                output::print_kv("Entries", &journal.len().to_string());
            }
        },
    }

    Ok(())
}

/// Numbers identifiers from 1, dropping the first `skip`.
fn journal_rows(ids: Vec<String>, skip: usize) -> Vec<JournalRow> {
    ids.into_iter()
        .enumerate()
        .skip(skip)
        .map(|(i, trx)| JournalRow {
            position: i + 1,
            trx,
        })
        .collect()
}
