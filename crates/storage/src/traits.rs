use invite_core::ids::EventId;
use serde_json::Value;

use crate::error::StorageError;

/// One stored JSON document with its bookkeeping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub event_id: EventId,
    pub key: String,
    pub body: Value,
    pub checksum: [u8; 32],
    /// Milliseconds since the unix epoch.
    pub updated_at: i64,
}

/// Opaque key/value JSON store keyed by event id.
///
/// The engine never interprets keys beyond the two documents it owns; other
/// collaborators may keep their own documents next to them.
pub trait SettingsStore {
    fn put_document(
        &mut self,
        event_id: EventId,
        key: &str,
        body: &Value,
    ) -> Result<(), StorageError>;

    fn get_document(&self, event_id: EventId, key: &str) -> Result<Option<Value>, StorageError>;

    fn get_record(
        &self,
        event_id: EventId,
        key: &str,
    ) -> Result<Option<DocumentRecord>, StorageError>;

    /// Returns whether a document was removed.
    fn remove_document(&mut self, event_id: EventId, key: &str) -> Result<bool, StorageError>;

    fn document_keys(&self, event_id: EventId) -> Result<Vec<String>, StorageError>;

    /// Removes every document of the event, returning how many were removed.
    fn remove_event(&mut self, event_id: EventId) -> Result<usize, StorageError>;

    fn events(&self) -> Result<Vec<EventId>, StorageError>;
}
