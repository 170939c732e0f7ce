//! Slot layouts per squad size
//!
//! Provides the fixed slot positions for every supported squad size.
//! Coordinates are percentages of the pitch (0-100) where:
//! - X: 0 = left touchline, 100 = right touchline
//! - Y: 0 = opponent goal line, 100 = own goal line
//!
//! Layouts are pure: the same identifier always yields the same slots.

use crate::models::{Player, PlayerNumber, Roster};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named position on the pitch for one squad size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub id: &'static str,
    pub x: f64,
    pub y: f64,
}

impl Slot {
    const fn new(id: &'static str, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Supported squad sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquadSize {
    Eleven,
    Seven,
    Six,
    Five,
}

impl SquadSize {
    /// All sizes in the order they are offered to the user.
    pub const ALL: [SquadSize; 4] =
        [SquadSize::Eleven, SquadSize::Seven, SquadSize::Six, SquadSize::Five];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Eleven => "11x11",
            Self::Seven => "7x7",
            Self::Six => "6x6",
            Self::Five => "5x5",
        }
    }

    pub fn player_count(&self) -> usize {
        match self {
            Self::Eleven => 11,
            Self::Seven => 7,
            Self::Six => 6,
            Self::Five => 5,
        }
    }

    pub fn slots(&self) -> &'static [Slot] {
        match self {
            Self::Eleven => &ELEVEN_A_SIDE,
            Self::Seven => &SEVEN_A_SIDE,
            Self::Six => &SIX_A_SIDE,
            Self::Five => &FIVE_A_SIDE,
        }
    }
}

impl fmt::Display for SquadSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown squad size: {0}")]
pub struct UnknownSquadSize(pub String);

impl FromStr for SquadSize {
    type Err = UnknownSquadSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "11x11" => Ok(Self::Eleven),
            "7x7" => Ok(Self::Seven),
            "6x6" => Ok(Self::Six),
            "5x5" => Ok(Self::Five),
            other => Err(UnknownSquadSize(other.to_string())),
        }
    }
}

// Goalkeeper, defensive line, midfield line, attacking line

static ELEVEN_A_SIDE: [Slot; 11] = [
    Slot::new("gk", 50.0, 88.0),
    Slot::new("lb", 15.0, 70.0),
    Slot::new("cb1", 35.0, 70.0),
    Slot::new("cb2", 65.0, 70.0),
    Slot::new("rb", 85.0, 70.0),
    Slot::new("lm", 20.0, 50.0),
    Slot::new("cm", 50.0, 50.0),
    Slot::new("rm", 80.0, 50.0),
    Slot::new("lf", 35.0, 30.0),
    Slot::new("st", 50.0, 22.0),
    Slot::new("rf", 65.0, 30.0),
];

static SEVEN_A_SIDE: [Slot; 7] = [
    Slot::new("gk", 50.0, 88.0),
    Slot::new("cb", 30.0, 68.0),
    Slot::new("cb2", 70.0, 68.0),
    Slot::new("cm", 50.0, 50.0),
    Slot::new("lm", 25.0, 32.0),
    Slot::new("rm", 75.0, 32.0),
    Slot::new("st", 50.0, 18.0),
];

static SIX_A_SIDE: [Slot; 6] = [
    Slot::new("gk", 50.0, 88.0),
    Slot::new("cb", 25.0, 68.0),
    Slot::new("cb2", 75.0, 68.0),
    Slot::new("cm", 50.0, 48.0),
    Slot::new("lm", 35.0, 28.0),
    Slot::new("st", 65.0, 28.0),
];

static FIVE_A_SIDE: [Slot; 5] = [
    Slot::new("gk", 50.0, 86.0),
    Slot::new("cb", 30.0, 62.0),
    Slot::new("cb2", 70.0, 62.0),
    Slot::new("mf", 50.0, 40.0),
    Slot::new("st", 50.0, 18.0),
];

/// Get the slots for a squad-size identifier.
///
/// Unknown identifiers yield an empty layout; callers treat that as
/// "no slots available".
pub fn layout_for(squad_size_id: &str) -> Vec<Slot> {
    match squad_size_id.parse::<SquadSize>() {
        Ok(size) => size.slots().to_vec(),
        Err(err) => {
            log::debug!("{}, using empty layout", err);
            Vec::new()
        }
    }
}

/// Id given to the default occupant of a slot.
pub fn default_player_id(slot_id: &str) -> String {
    format!("p_{}", slot_id)
}

/// Default occupant for the slot at `index` (0-based) of a layout.
pub fn default_player(slot: &Slot, index: usize) -> Player {
    Player {
        id: default_player_id(slot.id),
        name: slot.id.to_uppercase(),
        number: PlayerNumber::from(index + 1),
        photo: None,
        x: slot.x,
        y: slot.y,
        slot_id: Some(slot.id.to_string()),
    }
}

/// One default player per slot, in layout order.
pub fn default_players(slots: &[Slot]) -> Roster {
    Roster::from_players(
        slots.iter().enumerate().map(|(idx, slot)| default_player(slot, idx)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_layout_sizes_match_squad_size() {
        for size in SquadSize::ALL {
            let slots = layout_for(size.id());
            assert_eq!(slots.len(), size.player_count(), "layout {}", size);

            let ids: HashSet<_> = slots.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), slots.len(), "slot ids unique in {}", size);
            assert_eq!(slots[0].id, "gk");
        }
    }

    #[test]
    fn test_eleven_a_side_goalkeeper() {
        let slots = layout_for("11x11");
        assert_eq!(slots[0], Slot { id: "gk", x: 50.0, y: 88.0 });
    }

    #[test]
    fn test_unknown_layout_is_empty() {
        assert!(layout_for("9x9").is_empty());
        assert!(layout_for("").is_empty());
    }

    #[test]
    fn test_squad_size_parse_roundtrip() {
        for size in SquadSize::ALL {
            assert_eq!(size.to_string().parse::<SquadSize>(), Ok(size));
        }
        let err = "4-4-2".parse::<SquadSize>().unwrap_err();
        assert_eq!(err, UnknownSquadSize("4-4-2".to_string()));
        assert_eq!(err.to_string(), "Unknown squad size: 4-4-2");
    }

    #[test]
    fn test_default_players_follow_slots() {
        let slots = layout_for("5x5");
        let roster = default_players(&slots);

        assert_eq!(roster.len(), 5);
        let mf = roster.get("p_mf").unwrap();
        assert_eq!(mf.name, "MF");
        assert_eq!(mf.number, PlayerNumber::Numeric(4));
        assert_eq!(mf.position(), (50.0, 40.0));
        assert_eq!(mf.slot_id.as_deref(), Some("mf"));
    }

    proptest! {
        #[test]
        fn prop_layout_is_deterministic(idx in 0usize..4) {
            let id = SquadSize::ALL[idx].id();
            prop_assert_eq!(layout_for(id), layout_for(id));
        }

        #[test]
        fn prop_slots_stay_on_pitch(idx in 0usize..4) {
            for slot in layout_for(SquadSize::ALL[idx].id()) {
                prop_assert!((0.0..=100.0).contains(&slot.x));
                prop_assert!((0.0..=100.0).contains(&slot.y));
            }
        }

        #[test]
        fn prop_unknown_ids_yield_empty(id in "[a-z0-9]{0,6}") {
            prop_assume!(id.parse::<SquadSize>().is_err());
            prop_assert!(layout_for(&id).is_empty());
        }
    }
}
