//! Administrative console for the loan-servicing business network.
//!
//! Presents forms and lists for the two entity kinds as subcommands; all
//! persistence goes through the generic REST data access against the
//! configured ledger REST server.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use common::data::RestDataService;
use configs::AppConfig;

pub mod commands;

#[derive(Parser)]
#[command(name = "admin", version, about = "Loan-servicing network administration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage Bank participants
    Banks {
        #[command(subcommand)]
        command: commands::BankCommand,
    },
    /// Manage LoanRequest assets
    Loans {
        #[command(subcommand)]
        command: commands::LoanCommand,
    },
}

/// Parse arguments, wire the REST data service from configuration and
/// dispatch to the entity screens.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::load_or_default()?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.rest.timeout_secs))
        .build()?;
    let data = Arc::new(RestDataService::with_client(client, &cfg.rest.base_url));
    info!(base_url = %cfg.rest.base_url, "using rest server");

    match cli.command {
        Command::Banks { command } => commands::banks(command, data).await,
        Command::Loans { command } => commands::loans(command, data).await,
    }
}
