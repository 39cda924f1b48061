//! Editing operations over an in-memory config.
//!
//! Every operation addresses blocks by kind and returns a new config; kinds
//! that are not present make the operation a no-op.

use invite_core::{BlockKind, ColorSlot, EventCategory, InvitationConfig, color::default_scheme_for};

/// Flip `enabled` on one block.
pub fn toggle(config: &InvitationConfig, kind: BlockKind) -> InvitationConfig {
    let mut next = config.clone();
    if let Some(block) = next.block_mut(kind) {
        block.enabled = !block.enabled;
    }
    next
}

/// Swap the `order` values of two blocks. Entries keep their position in
/// `enabled_blocks`; re-sort with [`InvitationConfig::sorted_by_order`].
pub fn reorder(config: &InvitationConfig, dragged: BlockKind, target: BlockKind) -> InvitationConfig {
    let mut next = config.clone();
    if dragged == target {
        return next;
    }
    let (Some(dragged_order), Some(target_order)) = (
        config.block(dragged).map(|b| b.order),
        config.block(target).map(|b| b.order),
    ) else {
        return next;
    };
    for block in &mut next.enabled_blocks {
        if block.kind == dragged {
            block.order = target_order;
        } else if block.kind == target {
            block.order = dragged_order;
        }
    }
    next
}

/// Neighbour of `kind` in render order, disabled blocks included.
fn neighbour(config: &InvitationConfig, kind: BlockKind, forward: bool) -> Option<BlockKind> {
    let sorted = config.sorted_by_order();
    let position = sorted.enabled_blocks.iter().position(|b| b.kind == kind)?;
    let other = if forward {
        position.checked_add(1)?
    } else {
        position.checked_sub(1)?
    };
    sorted.enabled_blocks.get(other).map(|b| b.kind)
}

/// Swap with the previous block in render order. No-op for the first one.
pub fn move_up(config: &InvitationConfig, kind: BlockKind) -> InvitationConfig {
    match neighbour(config, kind, false) {
        Some(other) => reorder(config, kind, other),
        None => config.clone(),
    }
}

/// Swap with the next block in render order. No-op for the last one.
pub fn move_down(config: &InvitationConfig, kind: BlockKind) -> InvitationConfig {
    match neighbour(config, kind, true) {
        Some(other) => reorder(config, kind, other),
        None => config.clone(),
    }
}

pub fn set_color(config: &InvitationConfig, slot: ColorSlot, value: &str) -> InvitationConfig {
    let mut next = config.clone();
    next.color_scheme = config.color_scheme.with(slot, value);
    next
}

/// Switch category. The palette is replaced wholesale; blocks are untouched.
pub fn change_event_type(config: &InvitationConfig, category: &EventCategory) -> InvitationConfig {
    let mut next = config.clone();
    next.event_type = category.clone();
    next.color_scheme = default_scheme_for(category);
    next
}
