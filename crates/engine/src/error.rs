use invite_core::{BlockKind, CoreError};
use invite_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("invalid content: {0}")]
    InvalidContent(#[from] ContentError),
}

/// Why a payload does not fit its block's expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("{kind} content must be an object")]
    NotAnObject { kind: BlockKind },

    #[error("{kind}.{field} must be {expected}")]
    WrongFieldType {
        kind: BlockKind,
        field: &'static str,
        expected: &'static str,
    },
}
