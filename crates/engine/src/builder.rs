use serde_json::Map;

use invite_core::{
    BlockConfig, EventCategory, InvitationConfig, color::default_scheme_for, registry,
};

/// Complete configuration for a brand-new event.
///
/// One entry per registered kind, disabled ones included, at the registry's
/// default order. Enablement is the registry default plus the category's
/// extra blocks.
pub fn build_default_config(category: &EventCategory) -> InvitationConfig {
    let extras = category.extra_enabled();
    let enabled_blocks = registry::definitions()
        .iter()
        .map(|def| {
            BlockConfig::new(
                def.kind,
                def.default_enabled || extras.contains(&def.kind),
                def.default_order,
            )
        })
        .collect();

    let mut config = InvitationConfig {
        event_type: category.clone(),
        enabled_blocks,
        color_scheme: default_scheme_for(category),
        custom_styles: Map::new(),
    };
    config.sort_blocks();
    config
}
