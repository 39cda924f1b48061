use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::block::BlockKind;

/// Per-kind content payloads. Payload shapes are owned by each block's
/// presenter; here they are opaque JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockContent {
    entries: BTreeMap<BlockKind, Value>,
}

impl BlockContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: BlockKind) -> Option<&Value> {
        self.entries.get(&kind)
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Returns the payload previously stored for `kind`.
    pub fn insert(&mut self, kind: BlockKind, payload: Value) -> Option<Value> {
        self.entries.insert(kind, payload)
    }

    pub fn remove(&mut self, kind: BlockKind) -> Option<Value> {
        self.entries.remove(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, &Value)> {
        self.entries.iter().map(|(kind, value)| (*kind, value))
    }

    /// Lenient decode of a stored content document. Keys naming unknown
    /// kinds are returned separately instead of failing the whole document;
    /// anything that is not an object decodes as empty.
    pub fn from_json_lenient(value: &Value) -> (Self, Vec<String>) {
        let mut content = Self::new();
        let mut dropped = Vec::new();
        if let Some(object) = value.as_object() {
            for (key, payload) in object {
                match BlockKind::parse(key) {
                    Some(kind) => {
                        content.insert(kind, payload.clone());
                    }
                    None => dropped.push(key.clone()),
                }
            }
        }
        (content, dropped)
    }

    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|(kind, payload)| (kind.as_str().to_string(), payload.clone()))
            .collect();
        Value::Object(object)
    }
}

impl FromIterator<(BlockKind, Value)> for BlockContent {
    fn from_iter<I: IntoIterator<Item = (BlockKind, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
