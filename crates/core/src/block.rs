use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The closed set of blocks an invitation page can be composed of.
///
/// Declaration order is registration order; the derived `Ord` is used as the
/// secondary render key when two configs carry the same `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Hero,
    Timeline,
    Location,
    Menu,
    Rsvp,
    Gallery,
    Story,
    Gifts,
    DressCode,
    Faq,
}

impl BlockKind {
    pub const ALL: [BlockKind; 10] = [
        Self::Hero,
        Self::Timeline,
        Self::Location,
        Self::Menu,
        Self::Rsvp,
        Self::Gallery,
        Self::Story,
        Self::Gifts,
        Self::DressCode,
        Self::Faq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Timeline => "timeline",
            Self::Location => "location",
            Self::Menu => "menu",
            Self::Rsvp => "rsvp",
            Self::Gallery => "gallery",
            Self::Story => "story",
            Self::Gifts => "gifts",
            Self::DressCode => "dresscode",
            Self::Faq => "faq",
        }
    }

    /// Unknown names are not an error: legacy data routinely carries kinds
    /// that no longer exist, and callers skip them.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hero" => Some(Self::Hero),
            "timeline" => Some(Self::Timeline),
            "location" => Some(Self::Location),
            "menu" => Some(Self::Menu),
            "rsvp" => Some(Self::Rsvp),
            "gallery" => Some(Self::Gallery),
            "story" => Some(Self::Story),
            "gifts" => Some(Self::Gifts),
            "dresscode" => Some(Self::DressCode),
            "faq" => Some(Self::Faq),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::UnknownBlockKind(s.to_string()))
    }
}

/// Immutable registry entry describing one block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDefinition {
    pub kind: BlockKind,
    pub display_name: &'static str,
    pub description: &'static str,
    pub default_enabled: bool,
    pub default_order: i64,
}
