use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph given to freshly inserted callouts.
pub const DEFAULT_CALLOUT_EMOJI: &str = "💡";

/// Opaque block identifier, unique within a [`BlockList`].
///
/// Ids loaded from storage are kept verbatim; new ids are `block-<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh id for a block created in the editor
    pub fn generate() -> Self {
        Self(format!("block-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The closed vocabulary of block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletList,
    NumberedList,
    Quote,
    Divider,
    Callout,
    Code,
    Image,
}

impl BlockType {
    /// Heading rank (1-3), `None` for non-heading types
    pub fn heading_level(self) -> Option<u8> {
        match self {
            BlockType::Heading1 => Some(1),
            BlockType::Heading2 => Some(2),
            BlockType::Heading3 => Some(3),
            _ => None,
        }
    }

    /// Inverse of [`BlockType::heading_level`]
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(BlockType::Heading1),
            2 => Some(BlockType::Heading2),
            3 => Some(BlockType::Heading3),
            _ => None,
        }
    }

    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// Headings and callouts are the only types whose emoji means anything
    pub fn carries_emoji(self) -> bool {
        self.is_heading() || self == BlockType::Callout
    }

    pub fn is_list(self) -> bool {
        matches!(self, BlockType::BulletList | BlockType::NumberedList)
    }
}

/// A single unit of post content.
///
/// `content` is interpreted per type: list blocks hold one item per line,
/// image blocks hold an optional caption, dividers ignore it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Block {
    /// An empty block of `block_type` with a fresh id
    pub fn new(block_type: BlockType) -> Self {
        Self::with_id(BlockId::generate(), block_type)
    }

    pub fn with_id(id: BlockId, block_type: BlockType) -> Self {
        let emoji = if block_type == BlockType::Callout {
            Some(DEFAULT_CALLOUT_EMOJI.to_string())
        } else {
            None
        };
        Self {
            id,
            block_type,
            content: String::new(),
            emoji,
            image_url: None,
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Merge the fields present in `patch`. Returns true if anything changed.
    pub fn apply_patch(&mut self, patch: BlockPatch) -> bool {
        let before = self.clone();
        if let Some(block_type) = patch.block_type {
            self.block_type = block_type;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(emoji) = patch.emoji {
            self.emoji = emoji;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        *self != before
    }
}

/// Partial update for a [`Block`]; `None` leaves a field untouched.
///
/// The optional fields nest so a patch can clear them: `Some(None)` removes
/// the emoji, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub block_type: Option<BlockType>,
    pub content: Option<String>,
    pub emoji: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

impl BlockPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn retype(block_type: BlockType) -> Self {
        Self {
            block_type: Some(block_type),
            ..Self::default()
        }
    }

    pub fn emoji(emoji: Option<String>) -> Self {
        Self {
            emoji: Some(emoji),
            ..Self::default()
        }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(Some(url.into())),
            ..Self::default()
        }
    }
}

/// Ordered, never-empty sequence of blocks making up a post body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// A list holding a single empty paragraph
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockType::Paragraph)],
        }
    }

    /// Wrap `blocks`, substituting one empty paragraph when there are none
    pub fn normalized(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn into_vec(self) -> Vec<Block> {
        self.blocks
    }

    pub(crate) fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub(crate) fn insert(&mut self, index: usize, block: Block) {
        self.blocks.insert(index, block);
    }

    pub(crate) fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Removes the block at `index` unless it is the only one left
    pub(crate) fn remove(&mut self, index: usize) -> Option<Block> {
        if self.blocks.len() <= 1 || index >= self.blocks.len() {
            return None;
        }
        Some(self.blocks.remove(index))
    }

    pub(crate) fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }
}

impl Default for BlockList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for BlockList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let blocks = Vec::<Block>::deserialize(deserializer)?;
        Ok(Self::normalized(blocks))
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
