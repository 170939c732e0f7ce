// Board data model: players and the roster they live in

pub mod player;
pub mod roster;

pub use player::{clamp_percent, PhotoError, PhotoRef, Player, PlayerNumber, PlayerPatch};
pub use roster::Roster;
