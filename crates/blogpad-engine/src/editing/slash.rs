//! Slash commands: typing `/` at the start of a block opens a filtered menu
//! of block types, and picking one converts the block in place.

use crate::models::{BlockId, BlockType};

/// Character that opens the command menu when it starts a block's text
pub const TRIGGER: char = '/';

/// One selectable entry in the block-type menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub block_type: BlockType,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl CatalogEntry {
    /// Case-insensitive substring match against the label or any keyword
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.label.to_lowercase().contains(&query)
            || self
                .keywords
                .iter()
                .any(|kw| kw.to_lowercase().contains(&query))
    }
}

/// Menu entries in display order. Filtering never reorders them.
pub const CATALOG: [CatalogEntry; 11] = [
    CatalogEntry {
        block_type: BlockType::Paragraph,
        label: "Text",
        keywords: &["text", "paragraph", "p"],
    },
    CatalogEntry {
        block_type: BlockType::Heading1,
        label: "Heading 1",
        keywords: &["h1", "heading1", "title"],
    },
    CatalogEntry {
        block_type: BlockType::Heading2,
        label: "Heading 2",
        keywords: &["h2", "heading2", "subtitle"],
    },
    CatalogEntry {
        block_type: BlockType::Heading3,
        label: "Heading 3",
        keywords: &["h3", "heading3"],
    },
    CatalogEntry {
        block_type: BlockType::BulletList,
        label: "Bullet List",
        keywords: &["bullet", "list", "ul"],
    },
    CatalogEntry {
        block_type: BlockType::NumberedList,
        label: "Numbered List",
        keywords: &["numbered", "ordered", "ol"],
    },
    CatalogEntry {
        block_type: BlockType::Quote,
        label: "Quote",
        keywords: &["quote", "citation"],
    },
    CatalogEntry {
        block_type: BlockType::Divider,
        label: "Divider",
        keywords: &["divider", "hr", "line"],
    },
    CatalogEntry {
        block_type: BlockType::Callout,
        label: "Callout",
        keywords: &["callout", "note", "tip"],
    },
    CatalogEntry {
        block_type: BlockType::Code,
        label: "Code",
        keywords: &["code", "snippet"],
    },
    CatalogEntry {
        block_type: BlockType::Image,
        label: "Image",
        keywords: &["image", "img", "picture"],
    },
];

/// The live query if `text` starts with the trigger character
pub fn query_of(text: &str) -> Option<&str> {
    text.strip_prefix(TRIGGER)
}

/// Catalog entries matching `query`, in catalog order
pub fn filter(query: &str) -> Vec<&'static CatalogEntry> {
    CATALOG.iter().filter(|entry| entry.matches(query)).collect()
}

/// Open command menu attached to one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashCommand {
    pub block: BlockId,
    pub query: String,
}

impl SlashCommand {
    /// Derive command state from freshly typed text, `None` when the text no
    /// longer begins with the trigger
    pub fn from_text(block: &BlockId, text: &str) -> Option<Self> {
        query_of(text).map(|query| Self {
            block: block.clone(),
            query: query.to_string(),
        })
    }

    pub fn candidates(&self) -> Vec<&'static CatalogEntry> {
        filter(&self.query)
    }

    /// The entry chosen by pressing enter
    pub fn first_match(&self) -> Option<&'static CatalogEntry> {
        CATALOG.iter().find(|entry| entry.matches(&self.query))
    }
}
