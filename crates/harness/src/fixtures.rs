//! Stored settings as older clients wrote them.

/// Oldest shape: a bare list of enabled block names under `blocks`.
pub const LEGACY_NAME_LIST: &str = r#"{"blocks": ["hero", "story", "location", "rsvp"]}"#;

/// Entries keyed by `kind` with no `enabled` flag.
pub const LEGACY_KIND_ENTRIES: &str = r##"{
    "eventType": "birthday",
    "enabledBlocks": [
        {"kind": "hero", "order": 0},
        {"kind": "gallery", "order": 1},
        {"kind": "rsvp", "order": 2}
    ],
    "colorScheme": {
        "primary": "#FF6F61", "secondary": "#FFD166", "accent": "#06D6A0",
        "background": "#FFFFFF", "text": "#222222", "textLight": "#777777"
    }
}"##;

/// Written before timeline, menu and faq existed.
pub const PARTIAL_WEDDING: &str = r#"{
    "eventType": "wedding",
    "enabledBlocks": [
        {"type": "hero", "enabled": true, "order": 0},
        {"type": "story", "enabled": true, "order": 1},
        {"type": "location", "enabled": true, "order": 2},
        {"type": "gallery", "enabled": false, "order": 3},
        {"type": "rsvp", "enabled": true, "order": 4},
        {"type": "gifts", "enabled": true, "order": 5},
        {"type": "dresscode", "enabled": false, "order": 6}
    ],
    "customStyles": {"headingFont": "Cormorant Garamond"}
}"#;

/// References a block kind that has since been removed.
pub const OBSOLETE_BLOCK: &str = r#"{
    "eventType": "wedding",
    "enabledBlocks": [{"type": "obsolete_block", "enabled": true, "order": 0}]
}"#;

/// Hand-edited document with two blocks at the same position.
pub const COLLIDING_ORDERS: &str = r#"{
    "eventType": "corporate",
    "enabledBlocks": [
        {"type": "hero", "enabled": true, "order": 3},
        {"type": "faq", "enabled": true, "order": 3}
    ]
}"#;

/// Valid JSON that is not an invitation config at all.
pub const NOT_A_CONFIG: &str = r#"{"guests": 120, "venue": "Hall B"}"#;

/// Truncated write.
pub const TRUNCATED: &str = r#"{"eventType": "wedding", "enabledBlocks": [{"type": "he"#;
