use super::player::Player;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Ordered list of players; insertion order is display order.
///
/// Player ids are unique within a roster and every position lies on the pitch.
/// Stored rosters are read back through [`Roster::from_players`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self { players: Vec::new() }
    }

    /// Build a roster, dropping any player whose id was already seen and
    /// clamping positions to the pitch.
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(players.len());
        for mut player in players {
            if seen.insert(player.id.clone()) {
                let (x, y) = player.position();
                player.set_position(x, y);
                unique.push(player);
            } else {
                log::warn!("Dropping duplicate player id '{}'", player.id);
            }
        }
        Self { players: unique }
    }

    /// Append a player. Returns the player back if the id is taken.
    pub fn push(&mut self, player: Player) -> Result<(), Player> {
        if self.contains(&player.id) {
            return Err(player);
        }
        self.players.push(player);
        Ok(())
    }

    pub fn remove(&mut self, player_id: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == player_id)?;
        Some(self.players.remove(idx))
    }

    pub fn get(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn get_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.get(player_id).is_some()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Player>::deserialize(deserializer).map(Roster::from_players)
    }
}
