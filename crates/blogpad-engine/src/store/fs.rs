use super::{ImageStore, PostStore, StoreError, User, image_key};
use crate::models::{NewPost, Post, PostUpdate};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

const POSTS_DIR: &str = "posts";
const IMAGES_DIR: &str = "images";

pub fn validate_data_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() || !path.is_dir() {
        return Err(StoreError::InvalidDataDir(format!(
            "{} does not exist",
            path.display()
        )));
    }
    Ok(())
}

/// Write `content` under `root`, creating parent directories
fn write_file(relative_path: &RelativePath, root: &Path, content: &[u8]) -> Result<(), StoreError> {
    let absolute_path = relative_path.to_path(root);
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&absolute_path, content)?;
    Ok(())
}

/// Post ids become file names, so anything path-like is rejected
fn is_valid_post_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// One pretty-printed JSON file per post under `<data>/posts/<id>.json`
#[derive(Debug, Clone)]
pub struct FsPostStore {
    root: PathBuf,
}

impl FsPostStore {
    pub fn open(data_path: &Path) -> Result<Self, StoreError> {
        validate_data_dir(data_path)?;
        fs::create_dir_all(data_path.join(POSTS_DIR))?;
        Ok(Self {
            root: data_path.to_path_buf(),
        })
    }

    fn post_path(id: &str) -> RelativePathBuf {
        RelativePath::new(POSTS_DIR).join(format!("{id}.json"))
    }

    fn read(&self, id: &str) -> Result<Option<Post>, StoreError> {
        if !is_valid_post_id(id) {
            return Ok(None);
        }
        let path = Self::post_path(id).to_path(&self.root);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&self, post: &Post) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(post)?;
        write_file(&Self::post_path(&post.id), &self.root, json.as_bytes())?;
        log::debug!("wrote post {}", post.id);
        Ok(())
    }
}

impl PostStore for FsPostStore {
    fn list(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = Vec::new();
        for entry in fs::read_dir(self.root.join(POSTS_DIR))? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|json| Ok(serde_json::from_str::<Post>(&json)?));
            match parsed {
                Ok(post) => posts.push(post),
                Err(e) => log::warn!("skipping unreadable post {}: {e}", path.display()),
            }
        }
        posts.sort_by(|a, b| {
            b.published_date
                .cmp(&a.published_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(posts)
    }

    fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.read(id)
    }

    fn create(&mut self, post: NewPost, author: &User) -> Result<Post, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let today = chrono::Local::now().date_naive();
        let post = Post::from_new(id, post, &author.id, today);
        self.write(&post)?;
        Ok(post)
    }

    fn update(&mut self, id: &str, update: PostUpdate) -> Result<Post, StoreError> {
        let mut post = self
            .read(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        post.apply_update(update);
        self.write(&post)?;
        Ok(post)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        if !is_valid_post_id(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let path = Self::post_path(id).to_path(&self.root);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        log::debug!("deleted post {id}");
        Ok(())
    }
}

/// Images written under `<data>/images/<key>` and served from `<public_url>/<key>`
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
    public_url: String,
}

impl FsImageStore {
    pub fn open(data_path: &Path, public_url: impl Into<String>) -> Result<Self, StoreError> {
        validate_data_dir(data_path)?;
        Ok(Self {
            root: data_path.join(IMAGES_DIR),
            public_url: public_url.into(),
        })
    }
}

impl ImageStore for FsImageStore {
    fn upload(
        &mut self,
        user: &User,
        post_id: Option<&str>,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<String, StoreError> {
        if post_id.is_some_and(|id| !is_valid_post_id(id)) {
            return Err(StoreError::NotFound(post_id.unwrap_or_default().to_string()));
        }
        let key = image_key(user, post_id, file_name, chrono::Utc::now().timestamp_millis());
        write_file(RelativePath::new(&key), &self.root, bytes)?;
        log::debug!("stored image {key} ({} bytes)", bytes.len());
        Ok(format!("{}/{key}", self.public_url.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostDraft;
    use crate::tests::{create_test_data_dir, test_user};
    use pretty_assertions::assert_eq;

    fn new_post(title: &str) -> NewPost {
        let mut draft = PostDraft::new();
        draft.title = title.to_string();
        draft.to_new_post()
    }

    #[test]
    fn test_open_rejects_missing_directory() {
        let result = FsPostStore::open(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(StoreError::InvalidDataDir(_))));
    }

    #[test]
    fn test_create_then_get() {
        let data_dir = create_test_data_dir();
        let mut store = FsPostStore::open(data_dir.path()).unwrap();

        let created = store.create(new_post("First"), &test_user()).unwrap();

        let loaded = store.get(&created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.author_id.as_deref(), Some("u1"));
        assert!(
            data_dir
                .path()
                .join("posts")
                .join(format!("{}.json", created.id))
                .exists()
        );
    }

    #[test]
    fn test_list_is_newest_first_and_skips_junk() {
        let data_dir = create_test_data_dir();
        let mut store = FsPostStore::open(data_dir.path()).unwrap();
        let older = store.create(new_post("Older"), &test_user()).unwrap();
        let newer = store.create(new_post("Newer"), &test_user()).unwrap();
        store
            .update(
                &older.id,
                PostUpdate {
                    published_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
                    ..PostUpdate::default()
                },
            )
            .unwrap();
        fs::write(data_dir.path().join("posts/broken.json"), "{not json").unwrap();
        fs::write(data_dir.path().join("posts/notes.txt"), "ignored").unwrap();

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|p| p.title).collect();

        assert_eq!(titles, ["Newer", "Older"]);
        assert_ne!(newer.id, older.id);
    }

    #[test]
    fn test_update_missing_post_is_not_found() {
        let data_dir = create_test_data_dir();
        let mut store = FsPostStore::open(data_dir.path()).unwrap();
        let result = store.update("nope", PostUpdate::default());
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_delete_removes_post() {
        let data_dir = create_test_data_dir();
        let mut store = FsPostStore::open(data_dir.path()).unwrap();
        let post = store.create(new_post("Gone"), &test_user()).unwrap();

        store.delete(&post.id).unwrap();

        assert_eq!(store.get(&post.id).unwrap(), None);
        assert!(matches!(store.delete(&post.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_path_like_ids_are_never_read() {
        let data_dir = create_test_data_dir();
        let store = FsPostStore::open(data_dir.path()).unwrap();
        assert_eq!(store.get("../secrets").unwrap(), None);
    }

    #[test]
    fn test_image_upload_writes_file_and_returns_url() {
        let data_dir = create_test_data_dir();
        let mut images = FsImageStore::open(data_dir.path(), "https://cdn.example.com/").unwrap();

        let url = images
            .upload(&test_user(), Some("p1"), "cat.png", b"png-bytes")
            .unwrap();

        let key = url.strip_prefix("https://cdn.example.com/").unwrap();
        assert!(key.starts_with("u1/p1/"));
        assert!(key.ends_with(".png"));
        let stored = fs::read(data_dir.path().join("images").join(key)).unwrap();
        assert_eq!(stored, b"png-bytes");
    }
}
