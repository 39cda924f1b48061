use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::block::BlockKind;

/// Event category discriminator. Unrecognized names are carried through
/// untouched so a newer client's categories survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Wedding,
    Birthday,
    Corporate,
    Custom(String),
}

impl EventCategory {
    pub const KNOWN: [EventCategory; 3] = [Self::Wedding, Self::Birthday, Self::Corporate];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Wedding => "wedding",
            Self::Birthday => "birthday",
            Self::Corporate => "corporate",
            Self::Custom(name) => name,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "wedding" => Self::Wedding,
            "birthday" => Self::Birthday,
            "corporate" => Self::Corporate,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Blocks switched on for this category on top of the registry defaults.
    pub fn extra_enabled(&self) -> &'static [BlockKind] {
        match self {
            Self::Wedding => &[
                BlockKind::Story,
                BlockKind::Gallery,
                BlockKind::Gifts,
                BlockKind::DressCode,
            ],
            Self::Birthday => &[BlockKind::Gallery],
            Self::Corporate => &[BlockKind::Menu, BlockKind::Faq],
            Self::Custom(_) => &[],
        }
    }
}

impl From<&str> for EventCategory {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}
