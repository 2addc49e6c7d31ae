//! Reader-side listing preferences and the filtering they drive.
//!
//! [`ListingState`] is a plain value owned by whichever front end shows the
//! post list; it is serializable so the front end can persist it between runs.

use crate::models::Post;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Grouped,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Grouped,
            ViewMode::Grouped => ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingState {
    pub view_mode: ViewMode,
    pub sort_order: SortOrder,
    pub search_query: String,
    pub selected_tags: Vec<String>,
}

impl ListingState {
    fn matches_search(&self, post: &Post) -> bool {
        let query = self.search_query.trim().to_lowercase();
        query.is_empty()
            || post.title.to_lowercase().contains(&query)
            || post.description.to_lowercase().contains(&query)
    }

    fn matches_tags(&self, post: &Post) -> bool {
        self.selected_tags
            .iter()
            .all(|tag| post.tags.iter().any(|t| t == tag))
    }

    /// Published posts matching the search and tag filters, in sort order
    pub fn visible_posts<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let mut visible: Vec<&Post> = posts
            .iter()
            .filter(|p| p.is_published && self.matches_search(p) && self.matches_tags(p))
            .collect();
        match self.sort_order {
            SortOrder::Newest => visible.sort_by(|a, b| b.published_date.cmp(&a.published_date)),
            SortOrder::Oldest => visible.sort_by_key(|p| p.published_date),
        }
        visible
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }
}

/// Group posts under each of their tags, tags in order of first appearance
pub fn group_by_tag<'a>(posts: &[&'a Post]) -> Vec<(String, Vec<&'a Post>)> {
    let mut groups: Vec<(String, Vec<&'a Post>)> = Vec::new();
    for &post in posts {
        for tag in &post.tags {
            match groups.iter_mut().find(|(name, _)| name == tag) {
                Some((_, members)) => members.push(post),
                None => groups.push((tag.clone(), vec![post])),
            }
        }
    }
    groups
}

/// The `n` newest visible posts, ignoring the listing's own sort order
pub fn recent<'a>(posts: &'a [Post], n: usize) -> Vec<&'a Post> {
    let newest = ListingState::default();
    let mut visible = newest.visible_posts(posts);
    visible.truncate(n);
    visible
}
