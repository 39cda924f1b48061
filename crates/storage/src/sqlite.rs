use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;

use invite_core::ids::EventId;

use crate::error::StorageError;
use crate::traits::{DocumentRecord, SettingsStore};

/// Convert Vec<u8> to fixed-size array with proper error handling.
fn to_array<const N: usize>(v: Vec<u8>, label: &str) -> Result<[u8; N], StorageError> {
    v.try_into().map_err(|_| {
        StorageError::Core(invite_core::CoreError::InvalidData(format!(
            "invalid {label} length"
        )))
    })
}

fn checksum(body: &str) -> [u8; 32] {
    *blake3::hash(body.as_bytes()).as_bytes()
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        crate::schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Store a document body exactly as given, e.g. when importing settings
    /// written by an older client. The body is not parsed here.
    pub fn put_raw(&mut self, event_id: EventId, key: &str, body: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO event_documents (event_id, doc_key, body, checksum) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (event_id, doc_key) DO UPDATE SET
                body = excluded.body,
                checksum = excluded.checksum,
                updated_at = excluded.updated_at",
            rusqlite::params![
                event_id.as_bytes().as_slice(),
                key,
                body,
                checksum(body).as_slice(),
            ],
        )?;
        tracing::debug!(event = %event_id, key, bytes = body.len(), "stored document");
        Ok(())
    }

    /// Read the stored text and verify it against its checksum and as JSON.
    fn read_verified(
        &self,
        event_id: EventId,
        key: &str,
    ) -> Result<Option<(Value, [u8; 32], i64)>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT body, checksum, updated_at FROM event_documents WHERE event_id = ?1 AND doc_key = ?2",
                rusqlite::params![event_id.as_bytes().as_slice(), key],
                |row| {
                    let body: String = row.get(0)?;
                    let sum: Vec<u8> = row.get(1)?;
                    let updated_at: i64 = row.get(2)?;
                    Ok((body, sum, updated_at))
                },
            )
            .optional()?;

        let Some((body, sum, updated_at)) = row else {
            return Ok(None);
        };

        let corrupt = |reason: String| {
            tracing::warn!(event = %event_id, key, %reason, "stored document failed verification");
            StorageError::Corrupt {
                event_id: event_id.to_string(),
                key: key.to_string(),
                reason,
            }
        };

        let sum = to_array::<32>(sum, "checksum")?;
        if sum != checksum(&body) {
            return Err(corrupt("checksum mismatch".into()));
        }
        let value: Value = serde_json::from_str(&body).map_err(|e| corrupt(e.to_string()))?;
        Ok(Some((value, sum, updated_at)))
    }
}

impl SettingsStore for SqliteStore {
    fn put_document(
        &mut self,
        event_id: EventId,
        key: &str,
        body: &Value,
    ) -> Result<(), StorageError> {
        let text = serde_json::to_string(body)?;
        self.put_raw(event_id, key, &text)
    }

    fn get_document(&self, event_id: EventId, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_verified(event_id, key)?.map(|(value, _, _)| value))
    }

    fn get_record(
        &self,
        event_id: EventId,
        key: &str,
    ) -> Result<Option<DocumentRecord>, StorageError> {
        Ok(self
            .read_verified(event_id, key)?
            .map(|(body, checksum, updated_at)| DocumentRecord {
                event_id,
                key: key.to_string(),
                body,
                checksum,
                updated_at,
            }))
    }

    fn remove_document(&mut self, event_id: EventId, key: &str) -> Result<bool, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM event_documents WHERE event_id = ?1 AND doc_key = ?2",
            rusqlite::params![event_id.as_bytes().as_slice(), key],
        )?;
        Ok(removed > 0)
    }

    fn document_keys(&self, event_id: EventId) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT doc_key FROM event_documents WHERE event_id = ?1 ORDER BY doc_key")?;
        let keys = stmt
            .query_map(rusqlite::params![event_id.as_bytes().as_slice()], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn remove_event(&mut self, event_id: EventId) -> Result<usize, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM event_documents WHERE event_id = ?1",
            rusqlite::params![event_id.as_bytes().as_slice()],
        )?;
        Ok(removed)
    }

    fn events(&self) -> Result<Vec<EventId>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT event_id FROM event_documents ORDER BY event_id")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, Vec<u8>>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut result = Vec::new();
        for bytes in rows {
            result.push(EventId::from_bytes(to_array::<16>(bytes, "event_id")?));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_then_get() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let event = EventId::new();
        let body = json!({"eventType": "wedding", "enabledBlocks": []});

        store.put_document(event, "invitation_config", &body).unwrap();
        assert_eq!(
            store.get_document(event, "invitation_config").unwrap(),
            Some(body)
        );
        assert_eq!(store.get_document(event, "block_content").unwrap(), None);
        assert_eq!(store.get_document(EventId::new(), "invitation_config").unwrap(), None);
    }

    #[test]
    fn put_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let event = EventId::new();
        store.put_document(event, "k", &json!(1)).unwrap();
        store.put_document(event, "k", &json!(2)).unwrap();

        let record = store.get_record(event, "k").unwrap().unwrap();
        assert_eq!(record.body, json!(2));
        assert_eq!(record.checksum, checksum("2"));
        assert_eq!(store.document_keys(event).unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn tampered_body_is_corrupt() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let event = EventId::new();
        store.put_document(event, "k", &json!({"a": 1})).unwrap();
        store
            .conn()
            .execute("UPDATE event_documents SET body = '{\"a\": 2}'", [])
            .unwrap();

        let result = store.get_document(event, "k");
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn unparseable_raw_body_is_corrupt() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let event = EventId::new();
        store.put_raw(event, "k", "{not json").unwrap();

        match store.get_document(event, "k") {
            Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, "k"),
            other => panic!("expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn remove_document_and_event() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let a = EventId::new();
        let b = EventId::new();
        store.put_document(a, "x", &json!(1)).unwrap();
        store.put_document(a, "y", &json!(2)).unwrap();
        store.put_document(b, "x", &json!(3)).unwrap();

        let mut events = store.events().unwrap();
        events.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(events, expected);

        assert!(store.remove_document(a, "x").unwrap());
        assert!(!store.remove_document(a, "x").unwrap());
        assert_eq!(store.document_keys(a).unwrap(), vec!["y".to_string()]);

        assert_eq!(store.remove_event(a).unwrap(), 1);
        assert_eq!(store.events().unwrap(), vec![b]);
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");
        let path = path.to_str().unwrap();
        let event = EventId::new();

        {
            let mut store = SqliteStore::open(path).unwrap();
            store.put_document(event, "k", &json!({"kept": true})).unwrap();
        }

        let store = SqliteStore::open(path).unwrap();
        assert_eq!(store.get_document(event, "k").unwrap(), Some(json!({"kept": true})));
    }
}
