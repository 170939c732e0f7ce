//! Audit trail of board actions
//!
//! Newest entry first, bounded capacity; the oldest entries are evicted when
//! the log is full. Entries are never replayed onto the board.

use crate::models::Roster;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Edit,
    Load,
    Export,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    /// Roster after a drag (or an explicit edit record).
    Edit { date: DateTime<Utc>, snapshot: Roster },
    /// A saved formation was loaded.
    Load {
        date: DateTime<Utc>,
        #[serde(rename = "formation")]
        formation_name: String,
    },
    /// The board was exported as an image.
    Export { date: DateTime<Utc> },
}

impl HistoryEntry {
    pub fn edit(date: DateTime<Utc>, snapshot: Roster) -> Self {
        HistoryEntry::Edit { date, snapshot }
    }

    pub fn load(date: DateTime<Utc>, formation_name: impl Into<String>) -> Self {
        HistoryEntry::Load { date, formation_name: formation_name.into() }
    }

    pub fn export(date: DateTime<Utc>) -> Self {
        HistoryEntry::Export { date }
    }

    pub fn kind(&self) -> HistoryKind {
        match self {
            HistoryEntry::Edit { .. } => HistoryKind::Edit,
            HistoryEntry::Load { .. } => HistoryKind::Load,
            HistoryEntry::Export { .. } => HistoryKind::Export,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            HistoryEntry::Edit { date, .. }
            | HistoryEntry::Load { date, .. }
            | HistoryEntry::Export { date } => *date,
        }
    }

    pub fn snapshot(&self) -> Option<&Roster> {
        match self {
            HistoryEntry::Edit { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    pub fn formation_name(&self) -> Option<&str> {
        match self {
            HistoryEntry::Load { formation_name, .. } => Some(formation_name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// Capacity is at least one entry.
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity: capacity.max(1) }
    }

    /// Restore a persisted log (newest first), dropping anything past capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
