//! Roster reconciliation on squad-size change
//!
//! When the squad size changes, the existing roster is remapped onto the new
//! slot layout. Players keep their identity (id, name, number, photo) when
//! the new layout has a slot with the same id; every other slot receives a
//! fresh default player.

use crate::layout::{default_player, Slot};
use crate::models::{Player, Roster};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What happens to free (slot-less) players when the layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomPlayerPolicy {
    /// Free players are tied to one squad size and are dropped.
    #[default]
    Drop,
    /// Free players follow the slot-bound players at their current coordinates.
    CarryForward,
}

/// Reconcile with the default policy: the result has exactly one player per slot.
pub fn reconcile(existing: &Roster, new_layout: &[Slot]) -> Roster {
    reconcile_with(existing, new_layout, CustomPlayerPolicy::Drop)
}

pub fn reconcile_with(existing: &Roster, new_layout: &[Slot], policy: CustomPlayerPolicy) -> Roster {
    // Later players bound to the same slot win
    let by_slot: HashMap<&str, &Player> = existing
        .iter()
        .filter_map(|p| p.slot_id.as_deref().map(|slot_id| (slot_id, p)))
        .collect();

    let carried_free: Vec<&Player> = match policy {
        CustomPlayerPolicy::Drop => Vec::new(),
        CustomPlayerPolicy::CarryForward => existing.iter().filter(|p| p.is_free()).collect(),
    };

    // Ids that survive into the new roster, so synthesized defaults can avoid them
    let mut taken: HashSet<String> = new_layout
        .iter()
        .filter_map(|slot| by_slot.get(slot.id).map(|p| p.id.clone()))
        .chain(carried_free.iter().map(|p| p.id.clone()))
        .collect();

    let mut players = Vec::with_capacity(new_layout.len() + carried_free.len());

    for (idx, slot) in new_layout.iter().enumerate() {
        match by_slot.get(slot.id) {
            Some(current) => players.push(Player {
                x: slot.x,
                y: slot.y,
                slot_id: Some(slot.id.to_string()),
                ..(*current).clone()
            }),
            None => {
                let mut fresh = default_player(slot, idx);
                fresh.id = unique_id(&fresh.id, &taken);
                taken.insert(fresh.id.clone());
                players.push(fresh);
            }
        }
    }

    players.extend(carried_free.into_iter().cloned());

    let kept = players.iter().filter(|p| existing.contains(&p.id)).count();
    let dropped = existing.len().saturating_sub(kept);
    if dropped > 0 {
        log::debug!("Reconciliation dropped {} player(s) without a slot", dropped);
    }

    Roster::from_players(players)
}

fn unique_id(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{}_{}", base, suffix);
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
