use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::block::BlockKind;
use crate::category::EventCategory;
use crate::color::ColorScheme;
use crate::error::CoreError;
use crate::registry::registration_index;

/// Per-event enablement and position of one block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockConfig {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub enabled: bool,
    pub order: i64,
}

impl BlockConfig {
    pub fn new(kind: BlockKind, enabled: bool, order: i64) -> Self {
        Self { kind, enabled, order }
    }

    /// Render sort key: `order`, then registration position.
    pub fn sort_key(&self) -> (i64, usize) {
        (self.order, registration_index(self.kind))
    }
}

/// Root persisted object for one event's invitation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationConfig {
    pub event_type: EventCategory,
    /// Every block kind, enabled or not. Disabled entries keep their
    /// position so re-enabling restores it.
    pub enabled_blocks: Vec<BlockConfig>,
    pub color_scheme: ColorScheme,
    /// Typography/spacing passthrough; never interpreted here.
    #[serde(default)]
    pub custom_styles: Map<String, Value>,
}

impl InvitationConfig {
    pub fn block(&self, kind: BlockKind) -> Option<&BlockConfig> {
        self.enabled_blocks.iter().find(|b| b.kind == kind)
    }

    pub fn block_mut(&mut self, kind: BlockKind) -> Option<&mut BlockConfig> {
        self.enabled_blocks.iter_mut().find(|b| b.kind == kind)
    }

    pub fn is_enabled(&self, kind: BlockKind) -> bool {
        self.block(kind).is_some_and(|b| b.enabled)
    }

    /// Whether all `order` values are pairwise distinct.
    pub fn orders_are_distinct(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.enabled_blocks.iter().all(|b| seen.insert(b.order))
    }

    pub fn sort_blocks(&mut self) {
        self.enabled_blocks.sort_by_key(BlockConfig::sort_key);
    }

    /// Copy with `enabled_blocks` re-sorted by render order.
    pub fn sorted_by_order(&self) -> Self {
        let mut sorted = self.clone();
        sorted.sort_blocks();
        sorted
    }

    /// Enabled kinds in render order.
    pub fn enabled_kinds(&self) -> Vec<BlockKind> {
        let mut enabled: Vec<&BlockConfig> =
            self.enabled_blocks.iter().filter(|b| b.enabled).collect();
        enabled.sort_by_key(|b| b.sort_key());
        enabled.into_iter().map(|b| b.kind).collect()
    }

    pub fn to_json(&self) -> Result<Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Strict decode. Stored data should go through reconcile instead.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> InvitationConfig {
        InvitationConfig {
            event_type: EventCategory::Wedding,
            enabled_blocks: vec![
                BlockConfig::new(BlockKind::Rsvp, true, 2),
                BlockConfig::new(BlockKind::Hero, true, 0),
                BlockConfig::new(BlockKind::Gallery, false, 1),
            ],
            color_scheme: ColorScheme::neutral(),
            custom_styles: Map::new(),
        }
    }

    #[test]
    fn json_shape_uses_persisted_names() {
        let value = sample().to_json().unwrap();
        assert_eq!(value["eventType"], json!("wedding"));
        assert_eq!(value["enabledBlocks"][0], json!({"type": "rsvp", "enabled": true, "order": 2}));
        assert!(value["colorScheme"]["textLight"].is_string());
        assert_eq!(value["customStyles"], json!({}));
    }

    #[test]
    fn strict_decode_of_own_output() {
        let config = sample();
        let back = InvitationConfig::from_json(config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn strict_decode_rejects_unknown_kind() {
        let value = json!({
            "eventType": "wedding",
            "enabledBlocks": [{"type": "obsolete_block", "enabled": true, "order": 0}],
            "colorScheme": ColorScheme::neutral(),
        });
        assert!(matches!(
            InvitationConfig::from_json(value),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn enabled_kinds_follow_order() {
        assert_eq!(sample().enabled_kinds(), vec![BlockKind::Hero, BlockKind::Rsvp]);
    }

    #[test]
    fn duplicate_orders_detected() {
        let mut config = sample();
        assert!(config.orders_are_distinct());
        config.block_mut(BlockKind::Gallery).unwrap().order = 0;
        assert!(!config.orders_are_distinct());
    }

    #[test]
    fn sorted_by_order_breaks_ties_by_registration() {
        let mut config = sample();
        config.block_mut(BlockKind::Gallery).unwrap().order = 2;
        let sorted = config.sorted_by_order();
        let kinds: Vec<BlockKind> = sorted.enabled_blocks.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockKind::Hero, BlockKind::Rsvp, BlockKind::Gallery]);
    }
}
