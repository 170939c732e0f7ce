// Saved formations: named roster snapshots plus their squad size

pub mod service;

pub use service::FormationService;

use crate::models::Roster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, persisted snapshot of a roster.
///
/// `players` is an owned copy; later edits to the live roster never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Formation {
    pub id: String,
    pub name: String,
    pub game_type: String,
    pub players: Roster,
    pub date: DateTime<Utc>,
}

/// Name used when the user saves without typing one.
pub fn default_formation_name(team_name: &str, game_type: &str) -> String {
    format!("{} - {}", team_name, game_type)
}
