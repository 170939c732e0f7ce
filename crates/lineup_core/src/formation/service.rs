use super::{default_formation_name, Formation};
use crate::clock::time_derived_id;
use crate::models::Roster;
use chrono::{DateTime, Utc};

/// In-memory list of saved formations, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormationService {
    formations: Vec<Formation>,
}

impl FormationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_formations(formations: Vec<Formation>) -> Self {
        Self { formations }
    }

    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    pub fn find(&self, formation_id: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.id == formation_id)
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    /// Snapshot `roster` as a new formation and put it first.
    ///
    /// A missing or blank name falls back to "<team> - <game type>".
    pub fn save(
        &mut self,
        game_type: &str,
        roster: &Roster,
        team_name: &str,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> &Formation {
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => default_formation_name(team_name, game_type),
        };
        let id = time_derived_id("f", now.timestamp_millis(), |candidate| {
            self.formations.iter().any(|f| f.id == candidate)
        });

        let formation = Formation {
            id,
            name,
            game_type: game_type.to_string(),
            players: roster.clone(),
            date: now,
        };
        self.formations.insert(0, formation);
        &self.formations[0]
    }

    /// Remove a formation. Unknown ids are a no-op.
    pub fn delete(&mut self, formation_id: &str) -> Option<Formation> {
        let idx = self.formations.iter().position(|f| f.id == formation_id)?;
        Some(self.formations.remove(idx))
    }
}
