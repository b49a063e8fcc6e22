//! Events (matches), their occurrences and attached media

use serde::{Deserialize, Serialize};

use super::{Extra, Id};

/// A scheduled or played event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Things that happened during the event (goals, cards, substitutions)
    #[serde(default)]
    pub occurrence: Vec<Occurrence>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

/// Something that happened during an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Assets attached to this occurrence
    #[serde(default)]
    pub media: Vec<Media>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

/// A photo, video or other asset attached to an occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Identifier, when the payload carries one
    #[serde(default)]
    pub id: Option<Id>,
    /// Where the asset can be downloaded
    #[serde(default)]
    pub url: Option<String>,
    /// All other fields, as returned by the API
    #[serde(flatten)]
    pub extra: Extra,
}

impl Event {
    /// All media of all occurrences, in occurrence order
    pub fn media(&self) -> Vec<Media> {
        self.occurrence
            .iter()
            .flat_map(|occurrence| occurrence.media.iter().cloned())
            .collect()
    }
}
