const DEFAULT_UNDO_DEPTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum undo entries kept per editor session.
    pub undo_depth: usize,
    /// Reject block content that fails its presenter's validation instead
    /// of storing it with a warning.
    pub strict_content: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            undo_depth: DEFAULT_UNDO_DEPTH,
            strict_content: false,
        }
    }
}
