use blogpad_engine::models::{ListingState, Post, ViewMode, group_by_tag};
use blogpad_engine::render::{self, text};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

/// One line of the post list panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Group(String),
    Post { id: String, label: String },
}

impl Row {
    pub fn label(&self) -> String {
        match self {
            Row::Group(tag) => format!("# {tag}"),
            Row::Post { label, .. } => label.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Search,
}

pub struct App {
    posts: Vec<Post>,
    pub listing: ListingState,
    pub rows: Vec<Row>,
    pub list_state: ListState,
    pub mode: InputMode,
    pub content: Vec<String>,
}

impl App {
    pub fn new(posts: Vec<Post>, listing: ListingState) -> Self {
        let mut app = Self {
            posts,
            listing,
            rows: Vec::new(),
            list_state: ListState::default(),
            mode: InputMode::Browse,
            content: Vec::new(),
        };
        app.refresh_rows();
        app
    }

    fn post_label(post: &Post) -> String {
        format!("{} {}  ({})", post.emoji, post.title, post.published_date)
    }

    /// Rebuild the list after the listing state changed
    fn refresh_rows(&mut self) {
        let visible = self.listing.visible_posts(&self.posts);
        let post_row = |post: &Post| Row::Post {
            id: post.id.clone(),
            label: Self::post_label(post),
        };

        self.rows = match self.listing.view_mode {
            ViewMode::Grid => visible.iter().map(|&p| post_row(p)).collect(),
            ViewMode::Grouped => group_by_tag(&visible)
                .into_iter()
                .flat_map(|(tag, members)| {
                    std::iter::once(Row::Group(tag))
                        .chain(members.into_iter().map(|p| Row::Post {
                            id: p.id.clone(),
                            label: format!("  {}", Self::post_label(p)),
                        }))
                        .collect::<Vec<_>>()
                })
                .collect(),
        };

        self.list_state
            .select(if self.rows.is_empty() { None } else { Some(0) });
        self.update_content_for_selection();
    }

    pub fn selected_post(&self) -> Option<&Post> {
        let index = self.list_state.selected()?;
        match self.rows.get(index)? {
            Row::Post { id, .. } => self.posts.iter().find(|p| &p.id == id),
            Row::Group(_) => None,
        }
    }

    fn update_content_for_selection(&mut self) {
        let selected = self
            .list_state
            .selected()
            .and_then(|index| self.rows.get(index));

        self.content = match selected {
            None => vec!["No posts match".to_string()],
            Some(Row::Group(tag)) => {
                let count = self
                    .listing
                    .visible_posts(&self.posts)
                    .iter()
                    .filter(|p| p.tags.contains(tag))
                    .count();
                vec![format!("# {tag}"), String::new(), format!("{count} posts")]
            }
            Some(Row::Post { .. }) => match self.selected_post() {
                Some(post) => post_lines(post),
                None => Vec::new(),
            },
        };
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.rows.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    /// Handle one key press; returns false when the app should quit
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.mode {
            InputMode::Browse => match code {
                KeyCode::Char('q') => return false,
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Char('s') => {
                    self.listing.sort_order = self.listing.sort_order.toggled();
                    self.refresh_rows();
                }
                KeyCode::Char('v') => {
                    self.listing.view_mode = self.listing.view_mode.toggled();
                    self.refresh_rows();
                }
                KeyCode::Char('/') => self.mode = InputMode::Search,
                KeyCode::Esc => self.clear_search(),
                _ => {}
            },
            InputMode::Search => match code {
                KeyCode::Char(c) => {
                    self.listing.search_query.push(c);
                    self.refresh_rows();
                }
                KeyCode::Backspace => {
                    self.listing.search_query.pop();
                    self.refresh_rows();
                }
                KeyCode::Enter => self.mode = InputMode::Browse,
                KeyCode::Esc => {
                    self.mode = InputMode::Browse;
                    self.clear_search();
                }
                _ => {}
            },
        }
        true
    }

    fn clear_search(&mut self) {
        if !self.listing.search_query.is_empty() {
            self.listing.search_query.clear();
            self.refresh_rows();
        }
    }
}

/// Header and rendered body of a post as terminal lines
pub fn post_lines(post: &Post) -> Vec<String> {
    let mut lines = vec![format!("{} {}", post.emoji, post.title)];
    if !post.description.is_empty() {
        lines.push(post.description.clone());
    }
    let mut meta = post.published_date.format("%B %-d, %Y").to_string();
    if !post.tags.is_empty() {
        meta.push_str(&format!("  ·  {}", post.tags.join(", ")));
    }
    lines.push(meta);
    lines.push(String::new());

    let blocks = post.block_list();
    lines.extend(text::to_lines(&render::render_blocks(blocks.as_slice())));
    lines
}
