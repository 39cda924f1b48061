use std::collections::VecDeque;

use invite_core::{BlockContent, BlockKind, ColorSlot, EventCategory, InvitationConfig};

use crate::ops;
use crate::presenter::{Presentation, PresenterRegistry};
use crate::render::resolve;

/// In-memory editing state for one invitation, with bounded undo/redo.
///
/// Only edits that change the config are recorded. Any new edit clears the
/// redo stack.
pub struct EditorSession {
    loaded: InvitationConfig,
    current: InvitationConfig,
    undo_stack: VecDeque<InvitationConfig>,
    redo_stack: VecDeque<InvitationConfig>,
    max_depth: usize,
}

impl EditorSession {
    pub fn new(config: InvitationConfig, max_depth: usize) -> Self {
        Self {
            loaded: config.clone(),
            current: config,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth,
        }
    }

    pub fn config(&self) -> &InvitationConfig {
        &self.current
    }

    pub fn into_config(self) -> InvitationConfig {
        self.current
    }

    /// Whether the config differs from what the session was opened with.
    pub fn is_dirty(&self) -> bool {
        self.current != self.loaded
    }

    /// Mark the current config as saved.
    pub fn mark_saved(&mut self) {
        self.loaded = self.current.clone();
    }

    fn apply(&mut self, next: InvitationConfig) -> bool {
        if next == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(previous);
        // Enforce depth limit by dropping oldest entry
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        true
    }

    pub fn toggle(&mut self, kind: BlockKind) -> bool {
        self.apply(ops::toggle(&self.current, kind))
    }

    /// Drag `dragged` onto `target`. The stored list is kept sorted.
    pub fn reorder(&mut self, dragged: BlockKind, target: BlockKind) -> bool {
        self.apply(ops::reorder(&self.current, dragged, target).sorted_by_order())
    }

    pub fn move_up(&mut self, kind: BlockKind) -> bool {
        self.apply(ops::move_up(&self.current, kind).sorted_by_order())
    }

    pub fn move_down(&mut self, kind: BlockKind) -> bool {
        self.apply(ops::move_down(&self.current, kind).sorted_by_order())
    }

    pub fn set_color(&mut self, slot: ColorSlot, value: &str) -> bool {
        self.apply(ops::set_color(&self.current, slot, value))
    }

    pub fn change_event_type(&mut self, category: &EventCategory) -> bool {
        self.apply(ops::change_event_type(&self.current, category))
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push_back(undone);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop_back() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(redone);
        true
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Live preview of the current config. Desktop and mobile frames use the
    /// same output.
    pub fn preview(&self, content: &BlockContent, presenters: &PresenterRegistry) -> Vec<Presentation> {
        presenters.present(resolve(&self.current, content))
    }
}
