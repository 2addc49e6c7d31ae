pub mod block;
pub mod listing;
pub mod post;

pub use block::{Block, BlockId, BlockList, BlockPatch, BlockType, DEFAULT_CALLOUT_EMOJI};
pub use listing::{ListingState, SortOrder, ViewMode, group_by_tag, recent};
pub use post::{NewPost, Post, PostDraft, PostUpdate, ValidationError};
