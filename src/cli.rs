//! Command-line interface for the vsports client
//!
//! One subcommand per API endpoint, plus `get` for raw access to any path.
//! Results are printed as pretty JSON.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::client::{EndpointRequest, VsportsClient};
use crate::error::ClientError;

/// Errors reported by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// A `-p` argument is not of the form `name=value`
    #[error("Invalid parameter: '{0}'. Expected name=value")]
    InvalidParam(String),

    /// The API call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The result could not be rendered as JSON
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

/// Query the vsports sports-data API
#[derive(Parser, Debug)]
#[command(name = "vsports")]
#[command(about = "Query the vsports sports-data API through a Redis cache")]
#[command(version)]
pub struct Cli {
    /// Path to the JSON config file (defaults to the XDG config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bypass the cache: neither read nor write it
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Print cache and request diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all tournaments
    Tournaments,
    /// Show one tournament
    Tournament { id: i64 },
    /// Show one team
    Team { id: i64 },
    /// List the teams of a tournament
    TeamsByTournament { tournament: i64 },
    /// List events between two dates (YYYY-MM-DD)
    Events { start: NaiveDate, end: NaiveDate },
    /// List events between two dates with full details
    EventsDetailed { start: NaiveDate, end: NaiveDate },
    /// Show one event
    Event {
        id: i64,
        /// Fetch the detailed view
        #[arg(long)]
        detailed: bool,
    },
    /// List the occurrences of an event
    Occurrences { id: String },
    /// List the media attached to an event
    Media { id: String },
    /// Show one person
    Person { id: i64 },
    /// Show the squad of a team
    Squad {
        team: i64,
        /// Restrict to one tournament
        #[arg(long)]
        tournament: Option<i64>,
        /// Fetch the detailed view
        #[arg(long)]
        detailed: bool,
    },
    /// Show the standings of a tournament
    Standings {
        tournament: i64,
        /// Fetch live standings
        #[arg(long)]
        live: bool,
    },
    /// Show one venue
    Venue { id: i64 },
    /// List the venues of a team
    VenuesByTeam { team: i64 },
    /// Fetch any endpoint path and print the raw body
    Get {
        path: String,
        /// Query parameter as name=value (repeatable)
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param_arg)]
        params: Vec<(String, String)>,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "vsports=debug"
        } else {
            "warn"
        }
    }
}

/// Parses a `name=value` argument into its two halves
///
/// Only the first `=` separates; the value may contain further `=`.
pub fn parse_param_arg(s: &str) -> Result<(String, String), CliError> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(CliError::InvalidParam(s.to_string())),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::Render)
}

/// Runs a command against the client and renders its output
pub async fn execute(
    command: &Command,
    client: &VsportsClient,
    use_cache: bool,
) -> Result<String, CliError> {
    match command {
        Command::Tournaments => to_json(&client.tournaments(use_cache).await?),
        Command::Tournament { id } => to_json(&client.tournament(*id, use_cache).await?),
        Command::Team { id } => to_json(&client.team(*id, use_cache).await?),
        Command::TeamsByTournament { tournament } => {
            to_json(&client.teams_by_tournament(*tournament, use_cache).await?)
        }
        Command::Events { start, end } => {
            to_json(&client.events_by_date(*start, *end, use_cache).await?)
        }
        Command::EventsDetailed { start, end } => {
            to_json(&client.events_detailed_by_date(*start, *end, use_cache).await?)
        }
        Command::Event { id, detailed } => {
            let event = if *detailed {
                client.event_detailed(*id, use_cache).await?
            } else {
                client.event(*id, use_cache).await?
            };
            to_json(&event)
        }
        Command::Occurrences { id } => to_json(&client.event_occurrences(id, use_cache).await?),
        Command::Media { id } => to_json(&client.event_media(id, use_cache).await?),
        Command::Person { id } => to_json(&client.person(*id, use_cache).await?),
        Command::Squad {
            team,
            tournament,
            detailed,
        } => {
            let squad = match (tournament, detailed) {
                (None, false) => client.squad(*team, use_cache).await?,
                (None, true) => client.squad_detailed(*team, use_cache).await?,
                (Some(t), false) => client.squad_by_tournament(*team, *t, use_cache).await?,
                (Some(t), true) => {
                    client
                        .squad_detailed_by_tournament(*team, *t, use_cache)
                        .await?
                }
            };
            to_json(&squad)
        }
        Command::Standings { tournament, live } => {
            let standings = if *live {
                client
                    .standings_by_tournament_live(*tournament, use_cache)
                    .await?
            } else {
                client.standings_by_tournament(*tournament, use_cache).await?
            };
            to_json(&standings)
        }
        Command::Venue { id } => to_json(&client.venue(*id, use_cache).await?),
        Command::VenuesByTeam { team } => to_json(&client.venues_by_team(*team, use_cache).await?),
        Command::Get { path, params } => {
            let request = params
                .iter()
                .fold(EndpointRequest::new(path.as_str()), |request, (name, value)| {
                    request.param(name.as_str(), value.as_str())
                })
                .use_cache(use_cache);
            let body = client.dispatch(&request).await?;
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
    }
}
