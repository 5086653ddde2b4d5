mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod output;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::ticket::{self, TicketCommandArgs};
use crate::config::{AppConfig, RawConfig};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::output::ConsoleSink;

#[derive(Parser)]
#[command(
    name = "ticket-bridge",
    author,
    version,
    about = "Create a Jira ticket, optionally from a GitHub issue, and link them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a Jira ticket and attach reference links.
    Ticket(TicketCommandArgs),
    /// Inspect CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`); stdout is
/// left to the run report.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Ticket(args) => run_ticket(args).await,
    }
}

async fn run_ticket(args: TicketCommandArgs) -> AppResult<()> {
    let raw = RawConfig::from_env()
        .with_overrides(args.jira_api_url.clone(), args.jira_user.clone());
    let config = AppConfig::try_from(raw)?;
    let request = args.into_request(&config.github_owner)?;

    if config.github_token.is_none() {
        tracing::debug!("GH_API_TOKEN not set; GitHub requests are unauthenticated");
    }

    let ticket_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.jira_user.clone(),
        config.jira_token.clone(),
    ));
    let code_host = Arc::new(GitHubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
    ));
    let context = AppContext::new(ticket_tracker, code_host);

    let mut sink = ConsoleSink::stdout();
    let outcome = ticket::run(&context, request, &mut sink).await?;

    tracing::info!(
        key = %outcome.ticket.key,
        links = outcome.links_attached,
        "ticket workflow finished"
    );
    Ok(())
}
