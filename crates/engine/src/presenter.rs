//! Per-kind content capabilities.
//!
//! The engine treats payloads as opaque; each block kind owns a presenter
//! that knows its payload shape and what to show when there is no content.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use invite_core::BlockKind;

use crate::error::ContentError;
use crate::render::{RenderPlan, RenderedBlock};

pub trait BlockPresenter {
    fn kind(&self) -> BlockKind;

    fn validate(&self, payload: &Value) -> Result<(), ContentError>;

    /// Payload to render when the block is enabled but has no content.
    /// `None` means the block renders nothing.
    fn placeholder(&self) -> Option<Value> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Text,
    Flag,
    List,
    ObjectList,
}

impl FieldShape {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Flag => value.is_boolean(),
            Self::List => value.is_array(),
            Self::ObjectList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Flag => "a boolean",
            Self::List => "an array",
            Self::ObjectList => "an array of objects",
        }
    }
}

/// Presenter described by a table of optional top-level fields.
/// Fields that are present must have the listed shape; unlisted fields are
/// left alone.
pub struct FieldPresenter {
    kind: BlockKind,
    fields: &'static [(&'static str, FieldShape)],
    placeholder: Option<fn() -> Value>,
}

impl FieldPresenter {
    pub fn new(kind: BlockKind, fields: &'static [(&'static str, FieldShape)]) -> Self {
        Self {
            kind,
            fields,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: fn() -> Value) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Built-in presenter for `kind`.
    pub fn builtin(kind: BlockKind) -> Self {
        use FieldShape::*;
        match kind {
            BlockKind::Hero => Self::new(
                kind,
                &[("title", Text), ("subtitle", Text), ("date", Text), ("imageUrl", Text)],
            ),
            BlockKind::Timeline => Self::new(kind, &[("items", ObjectList)]),
            BlockKind::Location => Self::new(
                kind,
                &[("venueName", Text), ("address", Text), ("mapUrl", Text)],
            ),
            BlockKind::Menu => Self::new(kind, &[("courses", List)]),
            // An RSVP form is still usable without custom copy.
            BlockKind::Rsvp => Self::new(
                kind,
                &[("deadline", Text), ("message", Text), ("allowPlusOne", Flag)],
            )
            .with_placeholder(|| json!({ "allowPlusOne": false })),
            BlockKind::Gallery => Self::new(kind, &[("images", List)]),
            BlockKind::Story => Self::new(kind, &[("title", Text), ("text", Text)]),
            BlockKind::Gifts => Self::new(kind, &[("message", Text), ("registryLinks", List)]),
            BlockKind::DressCode => Self::new(kind, &[("code", Text), ("description", Text)]),
            BlockKind::Faq => Self::new(kind, &[("items", ObjectList)]),
        }
    }
}

impl BlockPresenter for FieldPresenter {
    fn kind(&self) -> BlockKind {
        self.kind
    }

    fn validate(&self, payload: &Value) -> Result<(), ContentError> {
        let object = payload
            .as_object()
            .ok_or(ContentError::NotAnObject { kind: self.kind })?;
        for (field, shape) in self.fields {
            if let Some(value) = object.get(*field) {
                if !value.is_null() && !shape.matches(value) {
                    return Err(ContentError::WrongFieldType {
                        kind: self.kind,
                        field: *field,
                        expected: shape.describe(),
                    });
                }
            }
        }
        Ok(())
    }

    fn placeholder(&self) -> Option<Value> {
        self.placeholder.map(|make| make())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentStatus {
    Ready,
    Placeholder(Value),
    Empty,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub block: RenderedBlock,
    pub status: ContentStatus,
}

impl Presentation {
    /// Payload the presentation layer should draw, if any.
    pub fn payload(&self) -> Option<&Value> {
        match &self.status {
            ContentStatus::Ready => Some(&self.block.payload),
            ContentStatus::Placeholder(value) => Some(value),
            ContentStatus::Empty | ContentStatus::Invalid(_) => None,
        }
    }
}

pub struct PresenterRegistry {
    presenters: BTreeMap<BlockKind, Box<dyn BlockPresenter>>,
}

impl Default for PresenterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl PresenterRegistry {
    pub fn empty() -> Self {
        Self {
            presenters: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for kind in BlockKind::ALL {
            registry.register(Box::new(FieldPresenter::builtin(kind)));
        }
        registry
    }

    /// Install a presenter, replacing any existing one for the same kind.
    pub fn register(&mut self, presenter: Box<dyn BlockPresenter>) {
        self.presenters.insert(presenter.kind(), presenter);
    }

    pub fn get(&self, kind: BlockKind) -> Option<&dyn BlockPresenter> {
        self.presenters.get(&kind).map(|p| p.as_ref())
    }

    /// Kinds without a presenter accept any payload.
    pub fn validate(&self, kind: BlockKind, payload: &Value) -> Result<(), ContentError> {
        match self.get(kind) {
            Some(presenter) => presenter.validate(payload),
            None => Ok(()),
        }
    }

    pub fn present_block(&self, block: RenderedBlock) -> Presentation {
        let presenter = self.get(block.kind);
        let status = if !block.has_content {
            match presenter.and_then(|p| p.placeholder()) {
                Some(value) => ContentStatus::Placeholder(value),
                None => ContentStatus::Empty,
            }
        } else {
            match presenter.map(|p| p.validate(&block.payload)) {
                Some(Err(err)) => {
                    tracing::warn!(kind = %block.kind, error = %err, "stored block content is invalid");
                    ContentStatus::Invalid(err.to_string())
                }
                Some(Ok(())) | None => ContentStatus::Ready,
            }
        };
        Presentation { block, status }
    }

    pub fn present(&self, plan: RenderPlan) -> Vec<Presentation> {
        plan.into_iter().map(|block| self.present_block(block)).collect()
    }
}
