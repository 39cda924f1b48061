//! Static catalog of block kinds.
//!
//! Registration order doubles as default page order. Default orders are
//! pairwise distinct so a freshly built config never needs tie-breaking.

use crate::block::{BlockDefinition, BlockKind};

static DEFINITIONS: [BlockDefinition; 10] = [
    BlockDefinition {
        kind: BlockKind::Hero,
        display_name: "Hero",
        description: "Cover section with the event title, date and main image",
        default_enabled: true,
        default_order: 0,
    },
    BlockDefinition {
        kind: BlockKind::Timeline,
        display_name: "Timeline",
        description: "Schedule of the day",
        default_enabled: true,
        default_order: 1,
    },
    BlockDefinition {
        kind: BlockKind::Location,
        display_name: "Location",
        description: "Venue name, address and map link",
        default_enabled: true,
        default_order: 2,
    },
    BlockDefinition {
        kind: BlockKind::Menu,
        display_name: "Menu",
        description: "Courses served at the event",
        default_enabled: false,
        default_order: 3,
    },
    BlockDefinition {
        kind: BlockKind::Rsvp,
        display_name: "RSVP",
        description: "Attendance confirmation form",
        default_enabled: true,
        default_order: 4,
    },
    BlockDefinition {
        kind: BlockKind::Gallery,
        display_name: "Gallery",
        description: "Photo grid",
        default_enabled: false,
        default_order: 5,
    },
    BlockDefinition {
        kind: BlockKind::Story,
        display_name: "Our Story",
        description: "Free-form narrative about the hosts",
        default_enabled: false,
        default_order: 6,
    },
    BlockDefinition {
        kind: BlockKind::Gifts,
        display_name: "Gifts",
        description: "Gift registry links and bank details",
        default_enabled: false,
        default_order: 7,
    },
    BlockDefinition {
        kind: BlockKind::DressCode,
        display_name: "Dress Code",
        description: "Attire guidance for guests",
        default_enabled: false,
        default_order: 8,
    },
    BlockDefinition {
        kind: BlockKind::Faq,
        display_name: "FAQ",
        description: "Frequently asked questions",
        default_enabled: false,
        default_order: 9,
    },
];

/// All definitions in registration order.
pub fn definitions() -> &'static [BlockDefinition] {
    &DEFINITIONS
}

pub fn definition(kind: BlockKind) -> &'static BlockDefinition {
    &DEFINITIONS[registration_index(kind)]
}

/// Look up a definition by its persisted name.
pub fn definition_by_name(name: &str) -> Option<&'static BlockDefinition> {
    BlockKind::parse(name).map(definition)
}

/// Position of `kind` in registration order.
pub fn registration_index(kind: BlockKind) -> usize {
    kind as usize
}
