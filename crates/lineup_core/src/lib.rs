//! # lineup_core - Formation State & Interaction Engine
//!
//! Core of a lineup board: pick a squad size, place named and numbered
//! players on fixed formation slots or anywhere on the pitch, drag them
//! around, save named formations and export a snapshot.
//!
//! ## Features
//! - Fixed slot layouts for 11, 7, 6 and 5-a-side
//! - Roster reconciliation when the squad size changes
//! - Pointer/touch drag state machine with one exclusive session
//! - Bounded audit history and write-through persistence
//! - Export through an injected renderer
//!
//! ```rust
//! use lineup_core::{Lineup, LineupConfig, MemoryStore, PitchRect, PointerEvent, SystemClock};
//!
//! let mut board = Lineup::open(LineupConfig::default(), MemoryStore::new(), SystemClock);
//! board.pointer_down("p_st", PitchRect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
//! board.pointer_move(&PointerEvent::pointer(400.0, 150.0));
//! board.pointer_up().unwrap();
//!
//! assert_eq!(board.player("p_st").unwrap().position(), (50.0, 25.0));
//! assert_eq!(board.history().len(), 1);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod drag;
pub mod error;
pub mod export;
pub mod formation;
pub mod history;
pub mod layout;
pub mod models;
pub mod persistence;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use board::Lineup;
pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, ExportConfig, LineupConfig, StorageConfig};
pub use drag::{
    ClientPoint, DragController, DragError, DragState, ListenerRegistry, NoopListeners, PitchRect,
    PointerEvent, SessionId,
};
pub use error::{LineupError, Result};
pub use export::{
    export_file_name, ExportArtifact, ExportError, ExportJob, ExportScene, RenderError,
    RenderOptions, SnapshotRenderer,
};
pub use formation::{Formation, FormationService};
pub use history::{HistoryEntry, HistoryKind, HistoryLog};
pub use layout::{default_players, layout_for, Slot, SquadSize};
pub use models::{PhotoRef, Player, PlayerNumber, PlayerPatch, Roster};
pub use persistence::{
    FileStore, KeyValueStore, MemoryStore, PersistError, PersistenceStore, StoreError,
};
pub use sync::{reconcile, reconcile_with, CustomPlayerPolicy};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insta::assert_json_snapshot;

    #[test]
    fn test_formation_wire_format() {
        let mut roster = default_players(&layout_for("5x5"));
        roster.remove("p_cb");
        roster.remove("p_cb2");
        roster.remove("p_mf");
        roster.remove("p_st");
        let formation = Formation {
            id: "f_1700000000000".to_string(),
            name: "Meu Time Pro - 5x5".to_string(),
            game_type: "5x5".to_string(),
            players: roster,
            date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };

        assert_json_snapshot!(formation, @r###"
        {
          "id": "f_1700000000000",
          "name": "Meu Time Pro - 5x5",
          "gameType": "5x5",
          "players": [
            {
              "id": "p_gk",
              "name": "GK",
              "number": 1,
              "photo": null,
              "x": 50.0,
              "y": 86.0,
              "slotId": "gk"
            }
          ],
          "date": "2023-11-14T22:13:20Z"
        }
        "###);
    }
}
