use super::{AuthCallback, AuthProvider, StoreError, User};
use std::fmt;

/// Single-author identity for a local install.
///
/// Only the configured author's email can sign in; there are no passwords.
pub struct LocalAuth {
    author: User,
    current: Option<User>,
    listeners: Vec<AuthCallback>,
}

impl LocalAuth {
    pub fn new(author: User) -> Self {
        Self {
            author,
            current: None,
            listeners: Vec::new(),
        }
    }

    /// Already signed in as the configured author
    pub fn signed_in(author: User) -> Self {
        Self {
            current: Some(author.clone()),
            ..Self::new(author)
        }
    }

    fn notify(&mut self) {
        let current = self.current.as_ref();
        for listener in &mut self.listeners {
            listener(current);
        }
    }
}

impl fmt::Debug for LocalAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAuth")
            .field("author", &self.author)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    fn sign_in(&mut self, email: &str, _password: &str) -> Result<User, StoreError> {
        if !email.trim().eq_ignore_ascii_case(&self.author.email) {
            log::warn!("rejected sign-in for {email}");
            return Err(StoreError::NotAuthenticated);
        }
        self.current = Some(self.author.clone());
        self.notify();
        Ok(self.author.clone())
    }

    fn sign_out(&mut self) {
        if self.current.take().is_some() {
            self.notify();
        }
    }

    fn on_auth_state_change(&mut self, callback: AuthCallback) {
        self.listeners.push(callback);
    }
}
