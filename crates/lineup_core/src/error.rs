use crate::drag::DragError;
use crate::models::PhotoError;
use crate::persistence::PersistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineupError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Duplicate player id: {0}")]
    DuplicatePlayer(String),

    #[error("Drag error: {0}")]
    Drag(#[from] DragError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Photo error: {0}")]
    Photo(#[from] PhotoError),
}

pub type Result<T> = std::result::Result<T, LineupError>;
