//! Read-only projection of a block list for the public reading view.
//!
//! [`render_block`] is a closed match over [`BlockType`]; the output
//! [`Rendered`] values are turned into HTML by [`html`] or into terminal
//! lines by [`text`].

pub mod html;
pub mod text;

use crate::models::{Block, BlockType};

/// Marker splitting paragraph text into alternating plain and bold runs
pub const BOLD_MARKER: &str = "**";

/// A run of paragraph text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRun {
    Plain(String),
    Strong(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            InlineRun::Plain(text) | InlineRun::Strong(text) => text,
        }
    }
}

/// Presentational unit for one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Heading {
        level: u8,
        emoji: Option<String>,
        text: String,
    },
    Paragraph(Vec<InlineRun>),
    BulletList(Vec<String>),
    NumberedList(Vec<String>),
    Quote(String),
    Divider,
    Callout {
        emoji: Option<String>,
        text: String,
    },
    Code(String),
    /// `url` is `None` while an upload is pending or after it failed
    Image {
        url: Option<String>,
        caption: Option<String>,
    },
}

/// Project one block
pub fn render_block(block: &Block) -> Rendered {
    let emoji = || block.emoji.clone().filter(|e| !e.is_empty());

    match block.block_type {
        BlockType::Heading1 | BlockType::Heading2 | BlockType::Heading3 => Rendered::Heading {
            level: block.block_type.heading_level().unwrap_or(1),
            emoji: emoji(),
            text: block.content.clone(),
        },
        BlockType::Paragraph => Rendered::Paragraph(split_bold(&block.content)),
        BlockType::BulletList => Rendered::BulletList(list_items(&block.content)),
        BlockType::NumberedList => Rendered::NumberedList(list_items(&block.content)),
        BlockType::Quote => Rendered::Quote(block.content.clone()),
        BlockType::Divider => Rendered::Divider,
        BlockType::Callout => Rendered::Callout {
            emoji: emoji(),
            text: block.content.clone(),
        },
        BlockType::Code => Rendered::Code(block.content.clone()),
        BlockType::Image => Rendered::Image {
            url: block.image_url.clone().filter(|u| !u.is_empty()),
            caption: Some(block.content.clone()).filter(|c| !c.is_empty()),
        },
    }
}

/// One rendered unit per block, in document order
pub fn render_blocks(blocks: &[Block]) -> Vec<Rendered> {
    blocks.iter().map(render_block).collect()
}

/// Split list content into one item per line
pub fn list_items(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

/// Split paragraph text on [`BOLD_MARKER`]; odd-indexed runs are bold
pub fn split_bold(content: &str) -> Vec<InlineRun> {
    content
        .split(BOLD_MARKER)
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                InlineRun::Strong(part.to_string())
            } else {
                InlineRun::Plain(part.to_string())
            }
        })
        .collect()
}
