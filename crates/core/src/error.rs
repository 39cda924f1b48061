use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown block kind: {0}")]
    UnknownBlockKind(String),

    #[error("unknown color slot: {0}")]
    UnknownColorSlot(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
