use crate::models::BlockId;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Blocks whose rendering may have changed
    pub changed: Vec<BlockId>,
    /// Block that should receive input focus after this edit
    pub focus: Option<BlockId>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}
