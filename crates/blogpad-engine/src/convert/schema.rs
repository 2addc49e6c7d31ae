//! Rich-block JSON schema used for persisted post bodies.
//!
//! Each stored block looks like
//! `{"id", "type": "heading-1", "content": [{"type": "text", "text", "styles"}], "props": {...}}`.
//! Decoding is deliberately lenient: stored data written by older editor
//! versions may carry string content or odd shapes, and none of that is
//! allowed to make a post unreadable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// External name of the paragraph type, also the fallback for anything unknown
pub const PARAGRAPH: &str = "paragraph";

fn paragraph_type() -> String {
    PARAGRAPH.to_string()
}

fn text_span_type() -> String {
    "text".to_string()
}

/// One block in the persisted schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "paragraph_type")]
    pub block_type: String,
    #[serde(default)]
    pub content: InlineContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Value>,
}

impl Default for ExternalBlock {
    fn default() -> Self {
        Self {
            id: None,
            block_type: paragraph_type(),
            content: InlineContent::default(),
            props: None,
            children: Vec::new(),
        }
    }
}

impl ExternalBlock {
    /// Decode one stored block without ever failing.
    ///
    /// A well-formed object decodes directly. Otherwise each field is
    /// salvaged on its own, and anything unusable falls back to the default
    /// (an empty paragraph).
    pub fn from_value(value: &Value) -> Self {
        if let Ok(block) = serde_json::from_value::<ExternalBlock>(value.clone()) {
            return block;
        }

        let Some(object) = value.as_object() else {
            log::warn!("stored block is not an object, using empty paragraph");
            return Self::default();
        };
        log::warn!("salvaging malformed stored block");

        Self {
            id: object.get("id").and_then(Value::as_str).map(str::to_string),
            block_type: object
                .get("type")
                .and_then(Value::as_str)
                .map_or_else(paragraph_type, str::to_string),
            content: object
                .get("content")
                .map(salvage_content)
                .unwrap_or_default(),
            props: object
                .get("props")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            children: Vec::new(),
        }
    }

    /// Concatenated plain text of the block.
    ///
    /// Falls back to `props.text` or `props.caption` for blocks that keep
    /// their text outside `content`.
    pub fn plain_text(&self) -> String {
        match &self.content {
            InlineContent::Text(text) => text.clone(),
            InlineContent::Spans(spans) if !spans.is_empty() => {
                spans.iter().map(InlineSpan::plain_text).collect()
            }
            InlineContent::Spans(_) => self
                .props
                .as_ref()
                .and_then(|p| p.text.clone().or_else(|| p.caption.clone()))
                .unwrap_or_default(),
        }
    }
}

/// Keep every span that decodes; drop the rest
fn salvage_content(value: &Value) -> InlineContent {
    match value {
        Value::String(text) => InlineContent::Text(text.clone()),
        Value::Array(items) => InlineContent::Spans(
            items
                .iter()
                .filter_map(|item| match serde_json::from_value::<InlineSpan>(item.clone()) {
                    Ok(span) => Some(span),
                    Err(err) => {
                        log::warn!("dropping malformed inline span: {err}");
                        None
                    }
                })
                .collect(),
        ),
        _ => InlineContent::default(),
    }
}

/// Decode a stored `blocks` value. Anything but an array yields no blocks.
pub fn parse_blocks(value: &Value) -> Vec<ExternalBlock> {
    match value {
        Value::Array(items) => items.iter().map(ExternalBlock::from_value).collect(),
        Value::Null => Vec::new(),
        other => {
            log::warn!("stored blocks are not an array: {other}");
            Vec::new()
        }
    }
}

/// Inline content: a list of spans, or a bare string from older data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineContent {
    Spans(Vec<InlineSpan>),
    Text(String),
}

impl Default for InlineContent {
    fn default() -> Self {
        InlineContent::Spans(Vec::new())
    }
}

impl InlineContent {
    pub fn is_empty(&self) -> bool {
        match self {
            InlineContent::Spans(spans) => spans.is_empty(),
            InlineContent::Text(text) => text.is_empty(),
        }
    }
}

/// A run of inline text with its style annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineSpan {
    #[serde(rename = "type", default = "text_span_type")]
    pub span_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Map<String, Value>>,
    /// Nested content of non-text spans such as links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    /// Other span attributes (e.g. `href`), carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InlineSpan {
    /// Unstyled text span
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            span_type: text_span_type(),
            text: Some(text.into()),
            styles: Some(Map::new()),
            content: None,
            extra: Map::new(),
        }
    }

    pub fn plain_text(&self) -> String {
        if self.span_type == "text" {
            return self.text.clone().unwrap_or_default();
        }
        match &self.content {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value::<InlineSpan>(item.clone()).ok())
                .map(|span| span.plain_text())
                .collect(),
            _ => self.text.clone().unwrap_or_default(),
        }
    }
}

/// Type-specific block metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Props this crate does not interpret (colours, alignment, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
