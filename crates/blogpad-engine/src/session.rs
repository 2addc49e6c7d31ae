//! An author's editing session over one post.
//!
//! The session owns its [`PostDraft`] exclusively. Store and auth failures
//! are returned to the caller and never touch the draft, so a failed save
//! or upload can simply be retried.

use crate::editing::Patch;
use crate::models::{BlockId, BlockPatch, Post, PostDraft, ValidationError};
use crate::store::{AuthProvider, ImageStore, PostStore, StoreError, User};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    post_id: Option<String>,
    draft: PostDraft,
}

impl EditorSession {
    pub fn open_new() -> Self {
        Self::default()
    }

    pub fn open_existing(store: &dyn PostStore, id: &str) -> Result<Self, SessionError> {
        let post = store
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        log::debug!("opened post {id} with {} stored blocks", post.blocks.len());
        Ok(Self {
            post_id: Some(post.id.clone()),
            draft: PostDraft::from_post(&post),
        })
    }

    /// Id of the stored post, `None` until the first save
    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PostDraft {
        &mut self.draft
    }

    fn require_user(auth: &dyn AuthProvider) -> Result<User, StoreError> {
        auth.current_user().ok_or(StoreError::NotAuthenticated)
    }

    /// Validate and persist the draft, creating the post on first save
    pub fn save(
        &mut self,
        store: &mut dyn PostStore,
        auth: &dyn AuthProvider,
    ) -> Result<Post, SessionError> {
        self.draft.validate()?;
        let user = Self::require_user(auth)?;

        let post = match &self.post_id {
            Some(id) => store.update(id, self.draft.to_update())?,
            None => store.create(self.draft.to_new_post(), &user)?,
        };
        log::debug!("saved post {}", post.id);
        self.post_id = Some(post.id.clone());
        Ok(post)
    }

    /// Delete the stored post. A never-saved session has nothing to delete.
    pub fn delete(self, store: &mut dyn PostStore) -> Result<(), SessionError> {
        if let Some(id) = &self.post_id {
            store.delete(id)?;
        }
        Ok(())
    }

    /// Upload an image and point `block_id` at it.
    ///
    /// The block is only updated once the upload has succeeded.
    pub fn upload_image(
        &mut self,
        images: &mut dyn ImageStore,
        auth: &dyn AuthProvider,
        block_id: &BlockId,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Patch, SessionError> {
        let user = Self::require_user(auth)?;
        let url = images.upload(&user, self.post_id.as_deref(), file_name, bytes)?;
        Ok(self
            .draft
            .editor
            .update(block_id, BlockPatch::image_url(url)))
    }
}
