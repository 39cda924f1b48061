use invite_core::{BlockContent, BlockKind, EventCategory, InvitationConfig, ids::EventId};
use invite_engine::{Engine, EngineError, Presentation, CONFIG_DOCUMENT};
use invite_storage::SqliteStore;
use serde_json::Value;

/// One event backed by its own in-memory store.
pub struct TestEvent {
    pub engine: Engine,
    pub event_id: EventId,
    pub category: EventCategory,
}

impl TestEvent {
    /// A freshly created event with default settings.
    pub fn new(category: EventCategory) -> Result<Self, EngineError> {
        let mut engine = Engine::new(SqliteStore::open_in_memory()?);
        let event_id = engine.create_event(&category)?;
        Ok(Self {
            engine,
            event_id,
            category,
        })
    }

    /// An event whose stored config is the given raw document.
    pub fn with_stored_config(category: EventCategory, raw: &str) -> Result<Self, EngineError> {
        let mut engine = Engine::new(SqliteStore::open_in_memory()?);
        let event_id = EventId::new();
        engine.storage_mut().put_raw(event_id, CONFIG_DOCUMENT, raw)?;
        Ok(Self {
            engine,
            event_id,
            category,
        })
    }

    pub fn config(&self) -> Result<InvitationConfig, EngineError> {
        self.engine.load_config(self.event_id, &self.category)
    }

    pub fn content(&self) -> Result<BlockContent, EngineError> {
        self.engine.load_content(self.event_id)
    }

    pub fn render(&self) -> Result<Vec<Presentation>, EngineError> {
        self.engine.render(self.event_id, &self.category)
    }

    /// Kinds on the public page, in order.
    pub fn rendered_kinds(&self) -> Result<Vec<BlockKind>, EngineError> {
        Ok(self.render()?.iter().map(|p| p.block.kind).collect())
    }

    pub fn set_content(&mut self, kind: BlockKind, payload: Value) -> Result<(), EngineError> {
        self.engine.set_block_content(self.event_id, kind, payload)
    }

    /// Toggle a block through an editor session and save.
    pub fn toggle(&mut self, kind: BlockKind) -> Result<bool, EngineError> {
        let mut session = self.engine.open_editor(self.event_id, &self.category)?;
        session.toggle(kind);
        self.engine.commit_editor(self.event_id, &mut session)
    }

    /// Drag `dragged` onto `target` through an editor session and save.
    pub fn reorder(&mut self, dragged: BlockKind, target: BlockKind) -> Result<bool, EngineError> {
        let mut session = self.engine.open_editor(self.event_id, &self.category)?;
        session.reorder(dragged, target);
        self.engine.commit_editor(self.event_id, &mut session)
    }
}
