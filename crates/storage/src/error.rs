use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt document {key} for event {event_id}: {reason}")]
    Corrupt {
        event_id: String,
        key: String,
        reason: String,
    },

    #[error("core error: {0}")]
    Core(#[from] invite_core::CoreError),
}
