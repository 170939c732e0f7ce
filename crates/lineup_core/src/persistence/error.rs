use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            PersistError::Store(StoreError::Io(_)) => true,
            PersistError::Store(StoreError::InvalidKey { .. }) => false,
            PersistError::Serialization(_) => false,
        }
    }
}
