//! dataverse - command-line access to a Dataverse Web API instance
//!
//! Connection settings come from `--config <yaml>` or from `DATAVERSE_*`
//! environment variables (a `.env` file is honoured).

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use dataverse_client::auth::{ClientCredentials, TokenSource};
use dataverse_client::{ConnectionConfig, DataverseClient};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dataverse", version, about = "Dataverse Web API client")]
struct Cli {
    /// YAML connection configuration; defaults to DATAVERSE_* variables
    #[arg(short, long, env = "DATAVERSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Acquire an access token and report its type and expiry
    Token,
    /// Retrieve every row of a collection as JSON
    Query {
        /// Logical collection name, e.g. `accounts`
        collection: String,
        /// OData query options, e.g. `?$select=name&$filter=statecode eq 0`
        #[arg(short, long, default_value = "")]
        options: String,
        /// Override the configured page ceiling
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    debug!("Using {:?}", config);

    match cli.command {
        Command::Token => {
            let token = ClientCredentials::from_config(&config)?
                .acquire()
                .await
                .context("token acquisition failed")?;

            match token.expires_at() {
                Some(at) => println!("{} token, expires at {}", token.token_type(), at.to_rfc3339()),
                None => println!("{} token, no expiry reported", token.token_type()),
            }
        }
        Command::Query {
            collection,
            options,
            max_pages,
        } => {
            let config = match max_pages {
                Some(limit) => config.with_max_pages(limit),
                None => config,
            };
            let client = DataverseClient::connect(config).await?;

            let rows: Vec<serde_json::Value> = client
                .retrieve_all_from(&collection, &options)
                .await
                .with_context(|| format!("query of {} failed", collection))?;

            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ConnectionConfig> {
    let config = match path {
        Some(path) => ConnectionConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ConnectionConfig::from_env().context("failed to load configuration from environment")?,
    };
    Ok(config)
}
