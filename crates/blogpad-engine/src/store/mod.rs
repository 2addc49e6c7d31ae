//! Collaborator contracts for identity, post persistence and image storage,
//! with local filesystem implementations.

pub mod auth;
pub mod fs;

pub use auth::LocalAuth;
pub use fs::{FsImageStore, FsPostStore};

use crate::models::{NewPost, Post, PostUpdate};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    NotFound(String),
    #[error("User not authenticated")]
    NotAuthenticated,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid data directory: {0}")]
    InvalidDataDir(String),
}

/// A signed-in author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

pub type AuthCallback = Box<dyn FnMut(Option<&User>)>;

pub trait AuthProvider {
    fn current_user(&self) -> Option<User>;
    fn sign_in(&mut self, email: &str, password: &str) -> Result<User, StoreError>;
    fn sign_out(&mut self);
    /// Register a callback run after every sign-in and sign-out
    fn on_auth_state_change(&mut self, callback: AuthCallback);
}

/// CRUD over stored posts
pub trait PostStore {
    /// All posts, newest first
    fn list(&self) -> Result<Vec<Post>, StoreError>;
    fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;
    /// Store a new post, assigning its id and today's date
    fn create(&mut self, post: NewPost, author: &User) -> Result<Post, StoreError>;
    fn update(&mut self, id: &str, update: PostUpdate) -> Result<Post, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Binary object storage for images; uploads return a public URL
pub trait ImageStore {
    fn upload(
        &mut self,
        user: &User,
        post_id: Option<&str>,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, StoreError>;
}

/// Storage key `<user>/<post or "temp">/<millis>.<ext>` for an uploaded image
pub fn image_key(user: &User, post_id: Option<&str>, file_name: &str, millis: i64) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    let folder = post_id.unwrap_or("temp");
    format!("{}/{folder}/{millis}.{ext}", user.id)
}
