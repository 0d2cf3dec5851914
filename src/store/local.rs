use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};
use crate::models::Post;

/// File inside the data directory holding the serialized timeline.
pub const POSTS_FILE: &str = "tweets.json";

/// Atomically write content to a file using a temporary file + rename.
/// The temporary file is removed again if any step after creating it fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> SyncResult<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp = path.with_file_name(temp_name);

    let file = File::create(&temp).map_err(|e| {
        SyncError::StorageUnavailable(format!("create {}: {e}", temp.display()))
    })?;
    let result = write_locked(file, &temp, content).and_then(|()| {
        fs::rename(&temp, path)
            .map_err(|e| SyncError::StorageUnavailable(format!("rename to {}: {e}", path.display())))
    });
    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp) {
            debug!(path = %temp.display(), error = %e, "could not remove temp file");
        }
    }
    result
}

fn write_locked(mut file: File, temp: &Path, content: &[u8]) -> SyncResult<()> {
    file.lock_exclusive()
        .map_err(|e| SyncError::StorageUnavailable(format!("lock {}: {e}", temp.display())))?;
    file.write_all(content)?;
    file.sync_all()?;
    file.unlock()?;
    Ok(())
}

/// Timeline snapshot persisted as one JSON array in the data directory.
/// No cross-process coordination beyond the write lock: the last writer wins.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(POSTS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored snapshot. `Ok(None)` when nothing has been stored.
    pub fn try_read(&self) -> SyncResult<Option<Vec<Post>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let posts: Vec<Post> = serde_json::from_str(&content)?;
        Ok(Some(posts))
    }

    /// Read the stored snapshot, treating any failure as "no data".
    pub fn read(&self) -> Vec<Post> {
        match self.try_read() {
            Ok(Some(posts)) => {
                debug!(count = posts.len(), path = %self.path.display(), "read local posts");
                posts
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "failed to read local posts");
                Vec::new()
            }
        }
    }

    pub fn write(&self, posts: &[Post]) -> SyncResult<()> {
        let content = serde_json::to_vec(posts)?;
        atomic_write(&self.path, &content).inspect_err(|e| {
            warn!(error = %e, path = %self.path.display(), "failed to write local posts");
        })
    }

    /// Remove the stored snapshot. Already absent is fine.
    pub fn purge(&self) -> SyncResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, seed_posts};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    /// A LocalStore rooted in a fresh temp directory.
    #[fixture]
    fn store() -> (TempDir, LocalStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        (dir, store)
    }

    // -- atomic_write --

    // atomic_write should persist exact byte content to disk via
    // tmp-file-then-rename, handling normal text, newlines, and empty content.
    #[rstest]
    #[case::plain_text(b"hello" as &[u8], "hello")]
    #[case::with_newlines(b"line1\nline2", "line1\nline2")]
    #[case::empty(b"", "")]
    fn atomic_write_persists_content(#[case] input: &[u8], #[case] expected: &str) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        atomic_write(&path, input).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    // Writing to the same path twice should replace the content, not append.
    #[rstest]
    fn atomic_write_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    // The temporary file used during the write must not remain on disk.
    #[rstest]
    fn atomic_write_no_leftover_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        atomic_write(&path, b"data").unwrap();
        assert!(!dir.path().join("test.json.tmp").exists());
    }

    // A failed rename (target is a non-empty directory) must not strand
    // the temporary file next to it.
    #[rstest]
    fn atomic_write_failure_removes_tmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), b"x").unwrap();

        let err = atomic_write(&path, b"data").unwrap_err();

        assert!(matches!(err, SyncError::StorageUnavailable(_)));
        assert!(!dir.path().join("test.json.tmp").exists());
        assert!(path.join("occupied").exists());
    }

    #[rstest]
    fn atomic_write_into_missing_dir_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("test.json");
        let err = atomic_write(&path, b"data").unwrap_err();
        assert!(matches!(err, SyncError::StorageUnavailable(_)));
    }

    // -- read / write --

    // A fresh directory has nothing stored; read yields an empty timeline.
    #[rstest]
    fn read_missing_file_is_empty(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        assert!(store.read().is_empty());
        assert!(store.try_read().unwrap().is_none());
    }

    #[rstest]
    fn write_then_read_preserves_order_and_fields(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        let posts = seed_posts();
        store.write(&posts).unwrap();
        assert_eq!(store.read(), posts);
    }

    // Corrupt content is logged and treated as no data rather than an error.
    #[rstest]
    fn read_corrupt_file_is_empty(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.read().is_empty());
        assert!(matches!(
            store.try_read(),
            Err(SyncError::StorageUnavailable(_))
        ));
    }

    // The on-disk layout is a bare JSON array of posts.
    #[rstest]
    fn write_stores_a_json_array(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        let post = Post::new(1, &Author::default(), "hi".into(), 0);
        store.write(std::slice::from_ref(&post)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["content"], "hi");
    }

    #[rstest]
    fn write_to_removed_dir_fails(store: (TempDir, LocalStore)) {
        let (dir, store) = store;
        let path = dir.path().to_path_buf();
        drop(dir);
        assert!(!path.exists());
        assert!(store.write(&seed_posts()).is_err());
    }

    // -- purge --

    #[rstest]
    fn purge_removes_file(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        store.write(&seed_posts()).unwrap();
        store.purge().unwrap();
        assert!(!store.path().exists());
        assert!(store.read().is_empty());
    }

    #[rstest]
    fn purge_missing_file_is_ok(store: (TempDir, LocalStore)) {
        let (_dir, store) = store;
        assert!(store.purge().is_ok());
    }
}
