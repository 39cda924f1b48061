use invite_core::{BlockKind, ColorSlot, EventCategory};
use invite_engine::{CONFIG_DOCUMENT, CONTENT_DOCUMENT, build_default_config};
use invite_harness::{TestSite, fixtures};
use invite_storage::SettingsStore;
use serde_json::json;

#[test]
fn edits_survive_reopening_the_database() -> Result<(), Box<dyn std::error::Error>> {
    let mut site = TestSite::on_disk()?;
    let event = site.add_event(EventCategory::Wedding)?;
    let category = site.category(event).ok_or("event not in site")?.clone();

    let mut session = site.engine().open_editor(event, &category)?;
    session.set_color(ColorSlot::Accent, "#C0FFEE");
    session.move_up(BlockKind::Rsvp);
    assert!(site.engine_mut().commit_editor(event, &mut session)?);
    site.engine_mut()
        .set_block_content(event, BlockKind::Story, json!({"title": "How we met"}))?;

    site.reopen()?;

    let config = site.engine().load_config(event, &category)?;
    assert_eq!(config, session.config().clone());
    assert_eq!(config.color_scheme.accent, "#C0FFEE");
    let content = site.engine().load_content(event)?;
    assert_eq!(content.get(BlockKind::Story), Some(&json!({"title": "How we met"})));
    Ok(())
}

#[test]
fn events_do_not_share_settings() -> Result<(), Box<dyn std::error::Error>> {
    let corporate = EventCategory::Corporate;
    let mut site = TestSite::new()?;
    let first = site.add_event(corporate.clone())?;
    let second = site.add_event(corporate.clone())?;

    let mut session = site.engine().open_editor(first, &corporate)?;
    session.toggle(BlockKind::Menu);
    site.engine_mut().commit_editor(first, &mut session)?;

    let untouched = site.engine().load_config(second, &corporate)?;
    assert_eq!(untouched, build_default_config(&corporate));
    let edited = site.engine().load_config(first, &corporate)?;
    assert!(!edited.is_enabled(BlockKind::Menu));
    Ok(())
}

#[test]
fn deleting_an_event_removes_both_documents() -> Result<(), Box<dyn std::error::Error>> {
    let mut site = TestSite::new()?;
    let kept = site.add_event(EventCategory::Birthday)?;
    let removed = site.add_event(EventCategory::Birthday)?;

    site.engine_mut()
        .set_block_content(removed, BlockKind::Hero, json!({"title": "Party"}))?;
    let mut keys = site.engine().storage().document_keys(removed)?;
    keys.sort();
    assert_eq!(keys, vec![CONTENT_DOCUMENT.to_string(), CONFIG_DOCUMENT.to_string()]);

    assert_eq!(site.engine_mut().delete_event(removed)?, 2);
    assert!(site.engine().storage().document_keys(removed)?.is_empty());
    assert_eq!(site.engine().storage().events()?, vec![kept]);

    // A deleted event still renders, from defaults.
    let config = site.engine().load_config(removed, &EventCategory::Birthday)?;
    assert_eq!(config, build_default_config(&EventCategory::Birthday));
    Ok(())
}

#[test]
fn foreign_documents_are_left_alone() -> Result<(), Box<dyn std::error::Error>> {
    let mut site = TestSite::new()?;
    let event = site.add_event(EventCategory::Wedding)?;

    site.engine_mut()
        .storage_mut()
        .put_document(event, "guest_list", &json!(["Ana", "Luis"]))?;
    site.engine_mut()
        .set_block_content(event, BlockKind::Gifts, json!({"message": "Your presence"}))?;
    assert!(site.engine_mut().clear_block_content(event, BlockKind::Gifts)?);

    assert_eq!(
        site.engine().storage().get_document(event, "guest_list")?,
        Some(json!(["Ana", "Luis"]))
    );
    Ok(())
}

#[test]
fn stored_legacy_event_sits_beside_current_ones() -> Result<(), Box<dyn std::error::Error>> {
    let mut site = TestSite::on_disk()?;
    let legacy = site.add_stored_event(EventCategory::Birthday, fixtures::LEGACY_KIND_ENTRIES)?;
    let current = site.add_event(EventCategory::Birthday)?;
    site.reopen()?;
    assert_eq!(site.events().count(), 2);

    let legacy_config = site.engine().load_config(legacy, &EventCategory::Birthday)?;
    let current_config = site.engine().load_config(current, &EventCategory::Birthday)?;
    assert_eq!(legacy_config.color_scheme.primary, "#FF6F61");
    assert_ne!(legacy_config.color_scheme, current_config.color_scheme);
    assert_eq!(legacy_config.enabled_blocks.len(), current_config.enabled_blocks.len());

    let record = site
        .engine()
        .storage()
        .get_record(legacy, CONFIG_DOCUMENT)?
        .ok_or("legacy document missing")?;
    assert_eq!(record.body["enabledBlocks"][0]["kind"], json!("hero"));
    Ok(())
}
