//! Teams, squads, people and venues

use serde::{Deserialize, Serialize};

use super::{Extra, Id};

/// A club or national team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

/// A player, coach or official
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

/// The roster of a team, optionally scoped to one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    /// Team the roster belongs to
    #[serde(default)]
    pub team: Option<Team>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

/// A stadium or arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}
