use crate::models::{BlockId, BlockPatch, BlockType};

/// Every mutation of a [`BlockEditor`](super::BlockEditor) is expressed as a `Cmd`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Create an empty block after `after`, or at the end
    Insert {
        block_type: BlockType,
        after: Option<BlockId>,
    },
    /// Merge fields into an existing block
    Update { id: BlockId, patch: BlockPatch },
    /// Replace a block's text as typed by the user (drives slash commands)
    EditText { id: BlockId, text: String },
    /// Remove a block, never the last one
    Delete { id: BlockId },
    /// Move the block at `from` to index `to`
    Reorder { from: usize, to: usize },
    /// Move `active` to where `over` currently sits
    MoveOnto { active: BlockId, over: BlockId },
    /// Backspace pressed inside an empty block
    BackspaceOnEmpty { id: BlockId },
    Focus { id: BlockId },
    Blur,
    /// Pick one of the open slash command's candidates; other types are ignored
    AcceptSlash { block_type: BlockType },
    /// Enter pressed while a slash command is open
    AcceptFirstSlash,
    /// Escape pressed while a slash command is open
    CancelSlash,
}
