pub mod convert;
pub mod editing;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{BlockEditor, Cmd, Patch};
pub use models::*;
pub use session::{EditorSession, SessionError};
pub use store::{AuthProvider, ImageStore, PostStore, StoreError, User};
