//! Payload types returned by the vsports API
//!
//! The API's payloads are wide and change over time, so these types name
//! only the fields the client relies on and keep everything else in an
//! `extra` map. Unknown fields never fail decoding.

pub mod competition;
pub mod event;
pub mod team;

pub use competition::{Standings, Tournament};
pub use event::{Event, Media, Occurrence};
pub use team::{Person, Squad, Team, Venue};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource identifier as sent by the API, which uses both numbers and strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

/// Fields not modelled explicitly
pub type Extra = serde_json::Map<String, serde_json::Value>;
