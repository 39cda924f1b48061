use serde::Serialize;
use serde_json::Value;

use invite_core::{BlockContent, BlockKind, ColorScheme, InvitationConfig};

/// One enabled block, ready to hand to its presenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub kind: BlockKind,
    /// Stored payload, or `null` when the block has none.
    pub payload: Value,
    pub has_content: bool,
    pub color_scheme: ColorScheme,
}

/// Ordered output of [`resolve`]. Owned and restartable: iterate as often
/// as needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderPlan {
    blocks: Vec<RenderedBlock>,
}

impl RenderPlan {
    pub fn iter(&self) -> std::slice::Iter<'_, RenderedBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn kinds(&self) -> Vec<BlockKind> {
        self.blocks.iter().map(|b| b.kind).collect()
    }

    pub fn get(&self, kind: BlockKind) -> Option<&RenderedBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    pub fn into_blocks(self) -> Vec<RenderedBlock> {
        self.blocks
    }
}

impl<'a> IntoIterator for &'a RenderPlan {
    type Item = &'a RenderedBlock;
    type IntoIter = std::slice::Iter<'a, RenderedBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl IntoIterator for RenderPlan {
    type Item = RenderedBlock;
    type IntoIter = std::vec::IntoIter<RenderedBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

/// Enabled blocks sorted by `order` (ties by registration position), each
/// with its content and the global color scheme attached.
pub fn resolve(config: &InvitationConfig, content: &BlockContent) -> RenderPlan {
    let mut enabled: Vec<_> = config.enabled_blocks.iter().filter(|b| b.enabled).collect();
    enabled.sort_by_key(|b| b.sort_key());

    let blocks = enabled
        .into_iter()
        .map(|block| {
            let payload = content.get(block.kind).cloned();
            RenderedBlock {
                kind: block.kind,
                has_content: payload.is_some(),
                payload: payload.unwrap_or(Value::Null),
                color_scheme: config.color_scheme.clone(),
            }
        })
        .collect();
    RenderPlan { blocks }
}
