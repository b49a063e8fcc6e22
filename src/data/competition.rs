//! Tournaments and standings

use serde::{Deserialize, Serialize};

use super::{Extra, Id};

/// A competition (league, cup, season)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
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

/// League table of a tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    /// Tournament the table belongs to
    #[serde(default)]
    pub tournament: Option<Tournament>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}
