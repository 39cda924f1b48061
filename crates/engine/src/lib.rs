pub mod builder;
pub mod config;
pub mod editor;
pub mod error;
pub mod ops;
pub mod presenter;
pub mod reconcile;
pub mod render;

pub use builder::build_default_config;
pub use config::EngineConfig;
pub use editor::EditorSession;
pub use error::{ContentError, EngineError};
pub use ops::{change_event_type, move_down, move_up, reorder, set_color, toggle};
pub use presenter::{BlockPresenter, ContentStatus, FieldPresenter, FieldShape, Presentation, PresenterRegistry};
pub use reconcile::{RebuildReason, ReconcileOutcome, ReconcileReport, reconcile, reconcile_with_report};
pub use render::{RenderPlan, RenderedBlock, resolve};

use serde_json::Value;

use invite_core::{BlockContent, BlockKind, EventCategory, InvitationConfig, ids::EventId};
use invite_storage::{SettingsStore, SqliteStore, StorageError};

/// Document holding the serialized [`InvitationConfig`].
pub const CONFIG_DOCUMENT: &str = "invitation_config";
/// Document holding the serialized [`BlockContent`].
pub const CONTENT_DOCUMENT: &str = "block_content";

/// Wires the pure engine to a settings store.
pub struct Engine<S: SettingsStore = SqliteStore> {
    storage: S,
    presenters: PresenterRegistry,
    config: EngineConfig,
}

impl<S: SettingsStore> Engine<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, EngineConfig::default())
    }

    pub fn with_config(storage: S, config: EngineConfig) -> Self {
        Self {
            storage,
            presenters: PresenterRegistry::default(),
            config,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn presenters(&self) -> &PresenterRegistry {
        &self.presenters
    }

    pub fn presenters_mut(&mut self) -> &mut PresenterRegistry {
        &mut self.presenters
    }

    /// Read a document, treating a corrupt one as absent so callers fall
    /// back to defaults instead of failing to render.
    fn read_document(&self, event_id: EventId, key: &str) -> Result<Option<Value>, EngineError> {
        match self.storage.get_document(event_id, key) {
            Ok(value) => Ok(value),
            Err(StorageError::Corrupt { reason, .. }) => {
                tracing::warn!(event = %event_id, key, %reason, "ignoring corrupt document");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stored content about to be modified and written back. A corrupt
    /// document is an error here so its payloads are never overwritten.
    fn content_for_update(&self, event_id: EventId) -> Result<BlockContent, EngineError> {
        let stored = self.storage.get_document(event_id, CONTENT_DOCUMENT)?;
        Ok(stored
            .map(|value| BlockContent::from_json_lenient(&value).0)
            .unwrap_or_default())
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Build and persist the default config for a new event.
    pub fn create_event(&mut self, category: &EventCategory) -> Result<EventId, EngineError> {
        let event_id = EventId::new();
        let config = build_default_config(category);
        self.save_config(event_id, &config)?;
        tracing::debug!(event = %event_id, %category, "created event");
        Ok(event_id)
    }

    /// Stored config healed against the current registry. Absent, legacy
    /// and corrupt documents all yield a valid config.
    pub fn load_config(
        &self,
        event_id: EventId,
        category: &EventCategory,
    ) -> Result<InvitationConfig, EngineError> {
        Ok(self.load_config_with_report(event_id, category)?.0)
    }

    pub fn load_config_with_report(
        &self,
        event_id: EventId,
        category: &EventCategory,
    ) -> Result<(InvitationConfig, ReconcileReport), EngineError> {
        let stored = self.read_document(event_id, CONFIG_DOCUMENT)?;
        Ok(reconcile_with_report(stored.as_ref(), category))
    }

    pub fn save_config(
        &mut self,
        event_id: EventId,
        config: &InvitationConfig,
    ) -> Result<(), EngineError> {
        let value = config.to_json()?;
        self.storage.put_document(event_id, CONFIG_DOCUMENT, &value)?;
        Ok(())
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub fn load_content(&self, event_id: EventId) -> Result<BlockContent, EngineError> {
        let Some(stored) = self.read_document(event_id, CONTENT_DOCUMENT)? else {
            return Ok(BlockContent::new());
        };
        let (content, dropped) = BlockContent::from_json_lenient(&stored);
        if !dropped.is_empty() {
            tracing::debug!(event = %event_id, ?dropped, "ignoring content for unknown blocks");
        }
        Ok(content)
    }

    /// Store the payload for one block. In strict mode a payload that fails
    /// its presenter's validation is rejected; otherwise it is stored and
    /// surfaces as invalid at render time.
    pub fn set_block_content(
        &mut self,
        event_id: EventId,
        kind: BlockKind,
        payload: Value,
    ) -> Result<(), EngineError> {
        if let Err(err) = self.presenters.validate(kind, &payload) {
            if self.config.strict_content {
                return Err(err.into());
            }
            tracing::warn!(event = %event_id, %kind, error = %err, "storing block content that fails validation");
        }
        let mut content = self.content_for_update(event_id)?;
        content.insert(kind, payload);
        self.storage
            .put_document(event_id, CONTENT_DOCUMENT, &content.to_json())?;
        Ok(())
    }

    /// Returns whether the block had content. Fails on a corrupt content
    /// document instead of replacing it.
    pub fn clear_block_content(
        &mut self,
        event_id: EventId,
        kind: BlockKind,
    ) -> Result<bool, EngineError> {
        let mut content = self.content_for_update(event_id)?;
        if content.remove(kind).is_none() {
            return Ok(false);
        }
        self.storage
            .put_document(event_id, CONTENT_DOCUMENT, &content.to_json())?;
        Ok(true)
    }

    // ========================================================================
    // Rendering and editing
    // ========================================================================

    /// Public page view: healed config resolved against stored content.
    pub fn render(
        &self,
        event_id: EventId,
        category: &EventCategory,
    ) -> Result<Vec<Presentation>, EngineError> {
        let config = self.load_config(event_id, category)?;
        let content = self.load_content(event_id)?;
        Ok(self.presenters.present(resolve(&config, &content)))
    }

    pub fn open_editor(
        &self,
        event_id: EventId,
        category: &EventCategory,
    ) -> Result<EditorSession, EngineError> {
        let config = self.load_config(event_id, category)?;
        Ok(EditorSession::new(config, self.config.undo_depth))
    }

    /// Persist the session's config if it has unsaved edits. Returns whether
    /// anything was written.
    pub fn commit_editor(
        &mut self,
        event_id: EventId,
        session: &mut EditorSession,
    ) -> Result<bool, EngineError> {
        if !session.is_dirty() {
            return Ok(false);
        }
        self.save_config(event_id, session.config())?;
        session.mark_saved();
        Ok(true)
    }

    /// Remove every stored document of the event.
    pub fn delete_event(&mut self, event_id: EventId) -> Result<usize, EngineError> {
        Ok(self.storage.remove_event(event_id)?)
    }
}
