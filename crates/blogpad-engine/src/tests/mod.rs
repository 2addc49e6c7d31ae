use crate::store::User;
use tempfile::TempDir;

/// Create a temporary data directory for on-disk stores
pub fn create_test_data_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// The author every store test signs in as
pub fn test_user() -> User {
    User {
        id: "u1".to_string(),
        email: "me@example.com".to_string(),
    }
}
