use crate::convert::{self, ExternalBlock};
use crate::editing::BlockEditor;
use crate::models::BlockList;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Emoji given to a freshly created post
pub const DEFAULT_POST_EMOJI: &str = "📝";
/// Vertical crop of the cover image, as a percentage from the top
pub const DEFAULT_COVER_POSITION: u8 = 50;
const MAX_COVER_POSITION: u8 = 100;

fn default_cover_position() -> u8 {
    DEFAULT_COVER_POSITION
}

fn deserialize_blocks<'de, D>(deserializer: D) -> Result<Vec<ExternalBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(convert::parse_blocks(&value))
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title")]
    MissingTitle,
}

/// A stored blog post. The body is kept in the persisted rich-block schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default = "default_cover_position")]
    pub cover_position: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_date: NaiveDate,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_blocks")]
    pub blocks: Vec<ExternalBlock>,
}

impl Post {
    pub fn from_new(id: String, new: NewPost, author_id: &str, published_date: NaiveDate) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            emoji: new.emoji,
            cover_image: new.cover_image,
            cover_position: new.cover_position,
            tags: new.tags,
            published_date,
            is_published: new.is_published,
            author_id: Some(author_id.to_string()),
            blocks: new.blocks,
        }
    }

    /// Merge the fields present in `update`
    pub fn apply_update(&mut self, update: PostUpdate) {
        let PostUpdate {
            title,
            description,
            emoji,
            cover_image,
            cover_position,
            tags,
            published_date,
            is_published,
            blocks,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(emoji) = emoji {
            self.emoji = emoji;
        }
        if let Some(cover_image) = cover_image {
            self.cover_image = cover_image;
        }
        if let Some(position) = cover_position {
            self.cover_position = position.min(MAX_COVER_POSITION);
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        if let Some(date) = published_date {
            self.published_date = date;
        }
        if let Some(is_published) = is_published {
            self.is_published = is_published;
        }
        if let Some(blocks) = blocks {
            self.blocks = blocks;
        }
    }

    /// The body as editor blocks
    pub fn block_list(&self) -> BlockList {
        convert::load_block_list(&self.blocks)
    }
}

/// Fields supplied when creating a post; id, date and author come from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub cover_image: String,
    pub cover_position: u8,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub blocks: Vec<ExternalBlock>,
}

/// Partial update of a stored post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub cover_image: Option<String>,
    pub cover_position: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub published_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
    pub blocks: Option<Vec<ExternalBlock>>,
}

/// In-memory editing form of a post: metadata plus a live block editor
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub cover_image: String,
    cover_position: u8,
    tags: Vec<String>,
    pub is_published: bool,
    pub editor: BlockEditor,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PostDraft {
    /// An empty post with a single empty paragraph
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            emoji: DEFAULT_POST_EMOJI.to_string(),
            cover_image: String::new(),
            cover_position: DEFAULT_COVER_POSITION,
            tags: Vec::new(),
            is_published: true,
            editor: BlockEditor::new(BlockList::new()),
        }
    }

    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            emoji: post.emoji.clone(),
            cover_image: post.cover_image.clone(),
            cover_position: post.cover_position.min(MAX_COVER_POSITION),
            tags: post.tags.clone(),
            is_published: post.is_published,
            editor: BlockEditor::new(post.block_list()),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a tag, ignoring blank and duplicate tags. Returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn cover_position(&self) -> u8 {
        self.cover_position
    }

    /// Shift the cover crop by `delta` percentage points, clamped to 0..=100
    pub fn nudge_cover(&mut self, delta: i16) -> u8 {
        let moved = (i16::from(self.cover_position) + delta).clamp(0, i16::from(MAX_COVER_POSITION));
        self.cover_position = u8::try_from(moved).unwrap_or(DEFAULT_COVER_POSITION);
        self.cover_position
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        Ok(())
    }

    fn stored_blocks(&self) -> Vec<ExternalBlock> {
        convert::save_block_list(self.editor.blocks())
    }

    pub fn to_new_post(&self) -> NewPost {
        NewPost {
            title: self.title.clone(),
            description: self.description.clone(),
            emoji: self.emoji.clone(),
            cover_image: self.cover_image.clone(),
            cover_position: self.cover_position,
            tags: self.tags.clone(),
            is_published: self.is_published,
            blocks: self.stored_blocks(),
        }
    }

    /// Update replacing every editable field; the publish date is left alone
    pub fn to_update(&self) -> PostUpdate {
        PostUpdate {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            emoji: Some(self.emoji.clone()),
            cover_image: Some(self.cover_image.clone()),
            cover_position: Some(self.cover_position),
            tags: Some(self.tags.clone()),
            published_date: None,
            is_published: Some(self.is_published),
            blocks: Some(self.stored_blocks()),
        }
    }

    pub fn to_post(&self, id: impl Into<String>, author_id: &str, date: NaiveDate) -> Post {
        Post::from_new(id.into(), self.to_new_post(), author_id, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = PostDraft::new();
        assert_eq!(draft.emoji, DEFAULT_POST_EMOJI);
        assert_eq!(draft.cover_position(), 50);
        assert_eq!(draft.editor.blocks().len(), 1);
        assert_eq!(
            draft.editor.blocks().iter().next().unwrap().block_type,
            BlockType::Paragraph
        );
    }

    #[rstest]
    #[case("", Err(ValidationError::MissingTitle))]
    #[case("   ", Err(ValidationError::MissingTitle))]
    #[case("Hello", Ok(()))]
    fn test_validate_title(#[case] title: &str, #[case] expected: Result<(), ValidationError>) {
        let mut draft = PostDraft::new();
        draft.title = title.to_string();
        assert_eq!(draft.validate(), expected);
    }

    #[test]
    fn test_tags_ignore_blank_and_duplicates() {
        let mut draft = PostDraft::new();
        assert!(draft.add_tag("rust"));
        assert!(!draft.add_tag(" rust "));
        assert!(!draft.add_tag("  "));
        assert!(draft.add_tag("life"));
        assert!(draft.remove_tag("rust"));
        assert!(!draft.remove_tag("rust"));
        assert_eq!(draft.tags(), ["life".to_string()]);
    }

    #[rstest]
    #[case(10, 60)]
    #[case(-10, 40)]
    #[case(80, 100)]
    #[case(-200, 0)]
    fn test_nudge_cover_clamps(#[case] delta: i16, #[case] expected: u8) {
        let mut draft = PostDraft::new();
        assert_eq!(draft.nudge_cover(delta), expected);
    }

    #[test]
    fn test_draft_round_trips_through_post() {
        let mut draft = PostDraft::new();
        draft.title = "Walks".to_string();
        let first = draft.editor.blocks().iter().next().unwrap().id.clone();
        let heading = draft.editor.insert(BlockType::Heading2, Some(&first));
        draft.editor.edit_text(&heading, "Routes");
        draft.add_tag("outdoors");

        let post = draft.to_post("p1", "me", date());
        let reopened = PostDraft::from_post(&post);

        assert_eq!(post.author_id.as_deref(), Some("me"));
        assert_eq!(reopened.title, "Walks");
        assert_eq!(reopened.tags(), ["outdoors".to_string()]);
        assert_eq!(reopened.editor.blocks(), draft.editor.blocks());
    }

    #[test]
    fn test_post_json_uses_camel_case_and_defaults() {
        let post: Post = serde_json::from_value(json!({
            "id": "p1",
            "title": "T",
            "publishedDate": "2024-03-14",
            "coverImage": "c.png",
            "blocks": [{"type": "quote", "content": "q"}, 5]
        }))
        .unwrap();

        assert_eq!(post.cover_image, "c.png");
        assert_eq!(post.cover_position, 50);
        assert!(!post.is_published);
        assert_eq!(post.blocks.len(), 2);
        assert_eq!(post.block_list().len(), 2);
    }

    #[test]
    fn test_apply_update_merges_present_fields() {
        let mut post = PostDraft::new().to_post("p1", "me", date());
        post.apply_update(PostUpdate {
            title: Some("New".to_string()),
            cover_position: Some(250),
            ..PostUpdate::default()
        });
        assert_eq!(post.title, "New");
        assert_eq!(post.cover_position, 100);
        assert_eq!(post.emoji, DEFAULT_POST_EMOJI);
    }
}
