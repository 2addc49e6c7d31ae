//! Conversion between editor [`Block`]s and the persisted rich-block schema.
//!
//! The two directions are near-inverses: plain-text blocks of every
//! supported type survive `from_external(&to_external(blocks))` with their
//! ids, types, content and emoji intact. Styled spans, multi-span text and
//! multi-codepoint emoji are flattened or left in the text.

pub mod emoji;
pub mod schema;

pub use schema::{ExternalBlock, InlineContent, InlineSpan, Props, parse_blocks};

use crate::models::{Block, BlockId, BlockList, BlockType};

/// External type name for a block type
pub fn external_type_name(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Paragraph => schema::PARAGRAPH,
        BlockType::Heading1 => "heading-1",
        BlockType::Heading2 => "heading-2",
        BlockType::Heading3 => "heading-3",
        BlockType::BulletList => "bulletListItem",
        BlockType::NumberedList => "numberedListItem",
        BlockType::Quote => "quote",
        BlockType::Divider => "divider",
        BlockType::Callout => "callout",
        BlockType::Code => "codeBlock",
        BlockType::Image => "image",
    }
}

/// Block type for an external type name; unknown names become paragraphs.
///
/// The generic `heading` type picks its rank from `props.level`, defaulting
/// to level 1.
pub fn block_type_from_external(name: &str, props: Option<&Props>) -> BlockType {
    match name {
        "paragraph" => BlockType::Paragraph,
        "heading" => props
            .and_then(|p| p.level)
            .and_then(BlockType::heading)
            .unwrap_or(BlockType::Heading1),
        "heading-1" => BlockType::Heading1,
        "heading-2" => BlockType::Heading2,
        "heading-3" => BlockType::Heading3,
        "bulletListItem" => BlockType::BulletList,
        "numberedListItem" => BlockType::NumberedList,
        "quote" => BlockType::Quote,
        "divider" => BlockType::Divider,
        "callout" => BlockType::Callout,
        "codeBlock" => BlockType::Code,
        "image" => BlockType::Image,
        other => {
            log::debug!("unknown external block type {other:?}, treating as paragraph");
            BlockType::Paragraph
        }
    }
}

/// Serialize a block list for storage
pub fn to_external(blocks: &[Block]) -> Vec<ExternalBlock> {
    blocks.iter().map(block_to_external).collect()
}

fn block_to_external(block: &Block) -> ExternalBlock {
    let emoji = block
        .emoji
        .as_deref()
        .filter(|e| !e.is_empty() && block.block_type.carries_emoji());

    let spans = if block.content.is_empty() {
        Vec::new()
    } else {
        let text = match emoji {
            Some(emoji) => emoji::join_emoji_prefix(emoji, &block.content),
            None => block.content.clone(),
        };
        vec![InlineSpan::text(text)]
    };

    let props = match block.block_type {
        BlockType::Image => block.image_url.as_ref().map(|url| Props {
            url: Some(url.clone()),
            caption: (!block.content.is_empty()).then(|| block.content.clone()),
            ..Props::default()
        }),
        BlockType::Callout => emoji.map(|icon| Props {
            icon: Some(icon.to_string()),
            ..Props::default()
        }),
        ty => ty.heading_level().map(|level| Props {
            level: Some(level),
            ..Props::default()
        }),
    };

    ExternalBlock {
        id: Some(block.id.as_str().to_string()),
        block_type: external_type_name(block.block_type).to_string(),
        content: InlineContent::Spans(spans),
        props,
        children: Vec::new(),
    }
}

/// Deserialize stored blocks into editor blocks
pub fn from_external(blocks: &[ExternalBlock]) -> Vec<Block> {
    blocks.iter().map(block_from_external).collect()
}

fn block_from_external(external: &ExternalBlock) -> Block {
    let props = external.props.as_ref();
    let block_type = block_type_from_external(&external.block_type, props);
    let text = external.plain_text();

    let (content, emoji) = if block_type.carries_emoji() {
        match emoji::split_emoji_prefix(&text) {
            Some((emoji, rest)) => (rest.to_string(), Some(emoji.to_string())),
            None => (text, props.and_then(|p| p.icon.clone())),
        }
    } else {
        (text, None)
    };

    let id = external
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map_or_else(BlockId::generate, BlockId::new);

    Block {
        id,
        block_type,
        content,
        emoji,
        image_url: props.and_then(|p| p.url.clone().or_else(|| p.src.clone())),
    }
}

/// Load a stored post body, normalizing an empty body to one empty paragraph
pub fn load_block_list(blocks: &[ExternalBlock]) -> BlockList {
    BlockList::normalized(from_external(blocks))
}

/// Serialize an editor body for storage
pub fn save_block_list(blocks: &BlockList) -> Vec<ExternalBlock> {
    to_external(blocks.as_slice())
}
