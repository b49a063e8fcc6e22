//! vsports - query the vsports sports-data API from the terminal
//!
//! Loads the client config, connects to the Redis cache and runs one
//! subcommand, printing its JSON result.

use std::process::ExitCode;

use clap::Parser;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

use vsports::cli::{self, Cli};
use vsports::{ClientConfig, VsportsClient};

/// Builds the stderr log subscriber, honoring `RUST_LOG` when set
fn log_dispatch(cli: &Cli) -> Dispatch {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    Dispatch::new(subscriber)
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let dispatch = log_dispatch(&cli);

    let config = ClientConfig::load(cli.config.as_deref())?;
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::debug!(?config, "Loaded configuration");
    });

    let client = VsportsClient::connect(config).await?.with_dispatch(dispatch);
    let output = cli::execute(&cli.command, &client, !cli.no_cache).await?;
    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
