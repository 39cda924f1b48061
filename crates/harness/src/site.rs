use invite_core::{EventCategory, ids::EventId};
use invite_engine::{Engine, EngineError, CONFIG_DOCUMENT};
use invite_storage::{SqliteStore, StorageError};
use tempfile::TempDir;

/// Several events sharing one store, optionally file-backed.
pub struct TestSite {
    engine: Engine,
    events: Vec<(EventId, EventCategory)>,
    // Keeps the database directory alive for the site's lifetime.
    dir: Option<TempDir>,
}

impl TestSite {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            engine: Engine::new(SqliteStore::open_in_memory()?),
            events: Vec::new(),
            dir: None,
        })
    }

    pub fn on_disk() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.db");
        let store = SqliteStore::open(path.to_str().ok_or("non-utf8 temp path")?)?;
        Ok(Self {
            engine: Engine::new(store),
            events: Vec::new(),
            dir: Some(dir),
        })
    }

    /// Reopen the same database file with a fresh engine.
    pub fn reopen(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = self.dir.as_ref().ok_or("in-memory site cannot be reopened")?;
        let path = dir.path().join("settings.db");
        let store = SqliteStore::open(path.to_str().ok_or("non-utf8 temp path")?)?;
        self.engine = Engine::new(store);
        Ok(())
    }

    pub fn add_event(&mut self, category: EventCategory) -> Result<EventId, EngineError> {
        let event_id = self.engine.create_event(&category)?;
        self.events.push((event_id, category));
        Ok(event_id)
    }

    pub fn add_stored_event(&mut self, category: EventCategory, raw: &str) -> Result<EventId, EngineError> {
        let event_id = EventId::new();
        self.engine.storage_mut().put_raw(event_id, CONFIG_DOCUMENT, raw)?;
        self.events.push((event_id, category));
        Ok(event_id)
    }

    /// Category the event was added with, if it belongs to this site.
    pub fn category(&self, event_id: EventId) -> Option<&EventCategory> {
        self.events
            .iter()
            .find(|(id, _)| *id == event_id)
            .map(|(_, category)| category)
    }

    pub fn events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events.iter().map(|(id, _)| *id)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}
