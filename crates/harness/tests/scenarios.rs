use invite_core::{BlockConfig, BlockContent, BlockKind, ColorSlot, EventCategory, registry};
use invite_engine::{
    ContentStatus, ReconcileOutcome, build_default_config, reconcile, reconcile_with_report,
    reorder, resolve, toggle,
};
use invite_harness::TestEvent;
use serde_json::json;

// ============================================================================
// Builder
// ============================================================================

#[test]
fn default_wedding_config() -> Result<(), Box<dyn std::error::Error>> {
    let config = build_default_config(&EventCategory::Wedding);

    // One entry per registered kind
    assert_eq!(config.enabled_blocks.len(), registry::definitions().len());
    for def in registry::definitions() {
        assert!(config.block(def.kind).is_some(), "missing {}", def.kind);
    }

    // Hero has the lowest order among enabled blocks
    let lowest = config
        .enabled_blocks
        .iter()
        .filter(|b| b.enabled)
        .min_by_key(|b| b.order)
        .ok_or("no enabled blocks")?;
    assert_eq!(lowest.kind, BlockKind::Hero);

    // Every color slot populated
    for slot in ColorSlot::ALL {
        assert!(!config.color_scheme.get(slot).is_empty());
    }
    Ok(())
}

// ============================================================================
// Reconcile
// ============================================================================

#[test]
fn empty_object_equals_fresh_defaults() {
    let config = reconcile(Some(&json!({})), &EventCategory::Birthday);
    assert_eq!(config, build_default_config(&EventCategory::Birthday));
}

#[test]
fn single_stored_block_is_preserved_and_rest_synthesized() {
    let stored = json!({
        "eventType": "wedding",
        "enabledBlocks": [{"type": "hero", "enabled": true, "order": 0}],
    });
    let config = reconcile(Some(&stored), &EventCategory::Wedding);

    let hero = config.block(BlockKind::Hero).unwrap();
    assert!(hero.enabled);
    assert_eq!(hero.order, 0);

    for kind in BlockKind::ALL {
        let count = config.enabled_blocks.iter().filter(|b| b.kind == kind).count();
        assert_eq!(count, 1, "{kind} appears {count} times");
        if kind != BlockKind::Hero {
            assert!(config.block(kind).unwrap().order > 0);
        }
    }
    assert!(config.orders_are_distinct());
}

#[test]
fn obsolete_block_never_survives() {
    let stored = json!({
        "eventType": "wedding",
        "enabledBlocks": [{"type": "obsolete_block", "enabled": true, "order": 0}],
    });
    let (config, report) = reconcile_with_report(Some(&stored), &EventCategory::Wedding);
    assert_eq!(report.dropped, vec!["obsolete_block".to_string()]);
    assert_eq!(config.enabled_blocks.len(), BlockKind::ALL.len());

    let serialized = serde_json::to_string(&config).unwrap();
    assert!(!serialized.contains("obsolete_block"));
}

// ============================================================================
// Resolve
// ============================================================================

#[test]
fn disabled_gallery_is_not_rendered() {
    let mut config = build_default_config(&EventCategory::Wedding);
    config.block_mut(BlockKind::Gallery).unwrap().enabled = false;
    assert_eq!(config.block(BlockKind::Hero).unwrap().order, 0);

    let with_gallery: BlockContent = [(BlockKind::Gallery, json!({"images": ["a.jpg", "b.jpg"]}))]
        .into_iter()
        .collect();
    for content in [BlockContent::new(), with_gallery] {
        let plan = resolve(&config, &content);
        assert!(plan.kinds().contains(&BlockKind::Hero));
        assert!(!plan.kinds().contains(&BlockKind::Gallery));
    }
}

// ============================================================================
// Reorder / toggle
// ============================================================================

#[test]
fn dragging_hero_onto_rsvp_swaps_orders() {
    let mut config = build_default_config(&EventCategory::Wedding);
    // rsvp at 5, gallery moved to 4 to keep orders distinct
    config.block_mut(BlockKind::Rsvp).unwrap().order = 5;
    config.block_mut(BlockKind::Gallery).unwrap().order = 4;
    config.sort_blocks();

    let swapped = reorder(&config, BlockKind::Hero, BlockKind::Rsvp);
    assert_eq!(swapped.block(BlockKind::Hero).unwrap().order, 5);
    assert_eq!(swapped.block(BlockKind::Rsvp).unwrap().order, 0);

    let untouched: Vec<&BlockConfig> = config
        .enabled_blocks
        .iter()
        .filter(|b| b.kind != BlockKind::Hero && b.kind != BlockKind::Rsvp)
        .collect();
    for block in untouched {
        assert_eq!(swapped.block(block.kind), Some(block));
    }

    let sorted = swapped.sorted_by_order();
    let position = |kind| sorted.enabled_blocks.iter().position(|b| b.kind == kind);
    assert_eq!(position(BlockKind::Rsvp), Some(0));
    assert!(position(BlockKind::Hero) > position(BlockKind::Gallery));
}

#[test]
fn toggling_twice_restores_config() {
    let config = build_default_config(&EventCategory::Corporate);
    for kind in BlockKind::ALL {
        assert_eq!(toggle(&toggle(&config, kind), kind), config);
    }
}

// ============================================================================
// Through the engine
// ============================================================================

#[test]
fn editor_changes_reach_the_public_page() -> Result<(), Box<dyn std::error::Error>> {
    let mut event = TestEvent::new(EventCategory::Wedding)?;
    let before = event.rendered_kinds()?;
    assert_eq!(before.first(), Some(&BlockKind::Hero));
    assert!(!before.contains(&BlockKind::Faq));

    assert!(event.toggle(BlockKind::Faq)?);
    assert!(event.reorder(BlockKind::Faq, BlockKind::Hero)?);

    let after = event.rendered_kinds()?;
    assert_eq!(after.first(), Some(&BlockKind::Faq));
    assert_eq!(after.last(), Some(&BlockKind::Hero));
    assert_eq!(after.len(), before.len() + 1);
    Ok(())
}

#[test]
fn content_flows_into_rendered_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let mut event = TestEvent::new(EventCategory::Birthday)?;
    event.set_content(BlockKind::Hero, json!({"title": "Maya turns 30", "date": "2026-11-14"}))?;
    event.set_content(BlockKind::Menu, json!({"courses": ["tacos"]}))?;

    let presented = event.render()?;
    let hero = presented
        .iter()
        .find(|p| p.block.kind == BlockKind::Hero)
        .ok_or("hero not rendered")?;
    assert_eq!(hero.status, ContentStatus::Ready);
    assert_eq!(hero.payload().and_then(|p| p.get("title")), Some(&json!("Maya turns 30")));
    assert_eq!(hero.block.color_scheme, event.config()?.color_scheme);

    // menu is disabled for birthdays; its content stays stored but unrendered
    assert!(presented.iter().all(|p| p.block.kind != BlockKind::Menu));
    assert!(event.content()?.contains(BlockKind::Menu));

    let rsvp = presented
        .iter()
        .find(|p| p.block.kind == BlockKind::Rsvp)
        .ok_or("rsvp not rendered")?;
    assert!(matches!(rsvp.status, ContentStatus::Placeholder(_)));
    Ok(())
}

#[test]
fn saved_config_reloads_intact() -> Result<(), Box<dyn std::error::Error>> {
    let event = TestEvent::new(EventCategory::Corporate)?;
    let (config, report) = event
        .engine
        .load_config_with_report(event.event_id, &event.category)?;
    assert_eq!(report.outcome, ReconcileOutcome::Intact);
    assert_eq!(config, build_default_config(&EventCategory::Corporate));
    Ok(())
}
