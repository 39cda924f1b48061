//! Healing of persisted invitation configs.
//!
//! Stored settings may be absent, written by an older client, missing block
//! kinds added since, or carry kinds that no longer exist. Anything that is
//! structurally sound gets repaired in place; anything else is rebuilt from
//! category defaults. Neither path fails.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::{Map, Value};

use invite_core::{
    BlockConfig, BlockKind, ColorScheme, EventCategory, InvitationConfig,
    color::default_scheme_for, registry,
};

use crate::builder::build_default_config;

/// Current key holding the block list.
const BLOCKS_KEY: &str = "enabledBlocks";
/// Key used by clients that predate `enabledBlocks`.
const LEGACY_BLOCKS_KEY: &str = "blocks";
/// Entry keys naming the kind, current first.
const KIND_KEYS: [&str; 3] = ["type", "kind", "id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    Missing,
    NotAnObject,
    NoBlockList,
    MalformedEntry { index: usize, detail: String },
    DuplicateKind(BlockKind),
    OrderCollision { order: i64, first: BlockKind, second: BlockKind },
    OrderOverflow,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no stored config"),
            Self::NotAnObject => write!(f, "stored config is not an object"),
            Self::NoBlockList => write!(f, "stored config has no block list"),
            Self::MalformedEntry { index, detail } => {
                write!(f, "block entry {index} is malformed: {detail}")
            }
            Self::DuplicateKind(kind) => write!(f, "block {kind} listed more than once"),
            Self::OrderCollision { order, first, second } => {
                write!(f, "blocks {first} and {second} share order {order}")
            }
            Self::OrderOverflow => write!(f, "no order positions left after the stored blocks"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Stored config was already complete and current.
    Intact,
    /// Stored config was kept, with gaps filled or legacy shapes migrated.
    Repaired,
    /// Stored config was discarded in favor of category defaults.
    Rebuilt(RebuildReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcome: ReconcileOutcome,
    /// Kinds added with registry defaults, in the order they were placed.
    pub synthesized: Vec<BlockKind>,
    /// Kind names discarded because the registry no longer knows them.
    pub dropped: Vec<String>,
    /// Preserved kinds that had no stored order and were placed at the end.
    pub repositioned: Vec<BlockKind>,
    pub legacy_shape: bool,
    /// Stored `eventType` was present but not a non-empty string.
    pub event_type_reset: bool,
    pub color_scheme_reset: bool,
    pub custom_styles_reset: bool,
}

impl ReconcileReport {
    fn rebuilt(reason: RebuildReason) -> Self {
        Self {
            outcome: ReconcileOutcome::Rebuilt(reason),
            synthesized: Vec::new(),
            dropped: Vec::new(),
            repositioned: Vec::new(),
            legacy_shape: false,
            event_type_reset: false,
            color_scheme_reset: false,
            custom_styles_reset: false,
        }
    }

    pub fn is_rebuilt(&self) -> bool {
        matches!(self.outcome, ReconcileOutcome::Rebuilt(_))
    }
}

/// Turn whatever is in storage into a valid config for `category`.
pub fn reconcile(persisted: Option<&Value>, category: &EventCategory) -> InvitationConfig {
    reconcile_with_report(persisted, category).0
}

pub fn reconcile_with_report(
    persisted: Option<&Value>,
    category: &EventCategory,
) -> (InvitationConfig, ReconcileReport) {
    match repair(persisted, category) {
        Ok((config, report)) => {
            if report.outcome == ReconcileOutcome::Repaired {
                tracing::debug!(
                    category = %config.event_type,
                    synthesized = ?report.synthesized,
                    dropped = ?report.dropped,
                    repositioned = ?report.repositioned,
                    legacy = report.legacy_shape,
                    event_type_reset = report.event_type_reset,
                    "repaired stored invitation config"
                );
            }
            (config, report)
        }
        Err(reason) => {
            if reason == RebuildReason::Missing {
                tracing::debug!(%category, "no stored invitation config, using defaults");
            } else {
                tracing::warn!(%category, %reason, "rebuilding invitation config from defaults");
            }
            (build_default_config(category), ReconcileReport::rebuilt(reason))
        }
    }
}

struct StoredBlock {
    kind: BlockKind,
    enabled: bool,
    order: Option<i64>,
}

enum DecodedEntry {
    Known(StoredBlock),
    Unknown(String),
}

fn malformed(index: usize, detail: impl Into<String>) -> RebuildReason {
    RebuildReason::MalformedEntry {
        index,
        detail: detail.into(),
    }
}

fn decode_entry(
    index: usize,
    entry: &Value,
    legacy: &mut bool,
) -> Result<DecodedEntry, RebuildReason> {
    let object = match entry {
        // Oldest clients stored just the enabled kinds, in page order.
        Value::String(name) => {
            *legacy = true;
            return Ok(match BlockKind::parse(name) {
                Some(kind) => DecodedEntry::Known(StoredBlock {
                    kind,
                    enabled: true,
                    order: Some(index as i64),
                }),
                None => DecodedEntry::Unknown(name.clone()),
            });
        }
        Value::Object(object) => object,
        _ => return Err(malformed(index, "expected an object or a block name")),
    };

    let (key, name) = KIND_KEYS
        .iter()
        .find_map(|key| object.get(*key).map(|value| (*key, value)))
        .ok_or_else(|| malformed(index, "no block type"))?;
    if key != KIND_KEYS[0] {
        *legacy = true;
    }
    let name = name
        .as_str()
        .ok_or_else(|| malformed(index, format!("`{key}` is not a string")))?;
    let Some(kind) = BlockKind::parse(name) else {
        return Ok(DecodedEntry::Unknown(name.to_string()));
    };

    let enabled = match object.get("enabled") {
        None => {
            *legacy = true;
            true
        }
        Some(Value::Bool(enabled)) => *enabled,
        Some(_) => return Err(malformed(index, "`enabled` is not a boolean")),
    };

    let order = match object.get("order") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            value
                .as_i64()
                .ok_or_else(|| malformed(index, "`order` is not an integer"))?,
        ),
    };

    Ok(DecodedEntry::Known(StoredBlock { kind, enabled, order }))
}

fn repair(
    persisted: Option<&Value>,
    category: &EventCategory,
) -> Result<(InvitationConfig, ReconcileReport), RebuildReason> {
    let object = persisted
        .ok_or(RebuildReason::Missing)?
        .as_object()
        .ok_or(RebuildReason::NotAnObject)?;

    let mut legacy = false;
    let entries = match object.get(BLOCKS_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(RebuildReason::NoBlockList),
        None => {
            legacy = true;
            object
                .get(LEGACY_BLOCKS_KEY)
                .and_then(Value::as_array)
                .ok_or(RebuildReason::NoBlockList)?
        }
    };

    // A list made only of names records the enabled kinds; anything absent
    // from it was switched off.
    let names_only = !entries.is_empty() && entries.iter().all(Value::is_string);

    let mut stored: Vec<StoredBlock> = Vec::new();
    let mut dropped = Vec::new();
    let mut seen = BTreeSet::new();
    let mut orders: BTreeMap<i64, BlockKind> = BTreeMap::new();
    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(index, entry, &mut legacy)? {
            DecodedEntry::Unknown(name) => dropped.push(name),
            DecodedEntry::Known(block) => {
                if !seen.insert(block.kind) {
                    return Err(RebuildReason::DuplicateKind(block.kind));
                }
                if let Some(order) = block.order {
                    if let Some(first) = orders.insert(order, block.kind) {
                        return Err(RebuildReason::OrderCollision {
                            order,
                            first,
                            second: block.kind,
                        });
                    }
                }
                stored.push(block);
            }
        }
    }

    let missing: Vec<BlockKind> = registry::definitions()
        .iter()
        .map(|def| def.kind)
        .filter(|kind| !seen.contains(kind))
        .collect();
    let unordered = stored.iter().filter(|b| b.order.is_none()).count();

    // Everything without a stored position goes after the highest stored one.
    let mut next = match orders.keys().next_back() {
        Some(max) => max.checked_add(1).ok_or(RebuildReason::OrderOverflow)?,
        None => 0,
    };
    let needed = i64::try_from(unordered + missing.len()).map_err(|_| RebuildReason::OrderOverflow)?;
    if next.checked_add(needed).is_none() {
        return Err(RebuildReason::OrderOverflow);
    }

    let mut enabled_blocks = Vec::with_capacity(stored.len() + missing.len());
    let mut repositioned = Vec::new();
    for block in &stored {
        let order = match block.order {
            Some(order) => order,
            None => {
                repositioned.push(block.kind);
                let order = next;
                next += 1;
                order
            }
        };
        enabled_blocks.push(BlockConfig::new(block.kind, block.enabled, order));
    }
    for kind in &missing {
        let enabled = !names_only && registry::definition(*kind).default_enabled;
        enabled_blocks.push(BlockConfig::new(*kind, enabled, next));
        next += 1;
    }

    let (event_type, event_type_reset) = match object.get("eventType") {
        Some(Value::String(name)) if !name.is_empty() => (EventCategory::parse(name), false),
        None => (category.clone(), false),
        Some(_) => (category.clone(), true),
    };

    let (color_scheme, color_scheme_reset) =
        match object.get("colorScheme").and_then(ColorScheme::from_json) {
            Some(scheme) => (scheme, false),
            None => (default_scheme_for(&event_type), true),
        };

    let (custom_styles, custom_styles_reset) = match object.get("customStyles") {
        Some(Value::Object(styles)) => (styles.clone(), false),
        None => (Map::new(), false),
        Some(_) => (Map::new(), true),
    };

    let mut config = InvitationConfig {
        event_type,
        enabled_blocks,
        color_scheme,
        custom_styles,
    };
    config.sort_blocks();

    let clean = missing.is_empty()
        && dropped.is_empty()
        && repositioned.is_empty()
        && !legacy
        && !event_type_reset
        && !color_scheme_reset
        && !custom_styles_reset;
    let report = ReconcileReport {
        outcome: if clean {
            ReconcileOutcome::Intact
        } else {
            ReconcileOutcome::Repaired
        },
        synthesized: missing,
        dropped,
        repositioned,
        legacy_shape: legacy,
        event_type_reset,
        color_scheme_reset,
        custom_styles_reset,
    };
    Ok((config, report))
}
