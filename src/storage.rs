//! Blob storage for file-backed entity fields.
//!
//! Records keep only a relative path; the bytes live under the store root,
//! namespaced per entity (`articles/…`, `employees/…`). Stored names are
//! random UUIDs with the upload's extension so repeated uploads of the same
//! file never collide. Deletion during updates and entity removal is
//! best-effort: a failed delete is logged and the row mutation proceeds.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// A validated upload handed to the core by the request layer.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original client file name, used only to preserve the extension
    pub file_name: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Builds an upload from a name and contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Filesystem-backed blob store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// the first `store` call per namespace.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory the store writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stores an upload under `namespace` and returns the relative path to
    /// record in the owning row (always forward-slash separated).
    ///
    /// # Errors
    /// Returns [`Error::Upload`] when the upload's file name is empty or
    /// reduces to no usable name, and [`Error::Io`] on write failure.
    pub async fn store(&self, namespace: &str, upload: &Upload) -> Result<String> {
        let trimmed = upload.file_name.trim();
        if trimmed.is_empty() {
            return Err(Error::Upload {
                message: "uploaded file has no name".to_string(),
            });
        }

        let stored_name = match Path::new(trimmed).extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext.to_lowercase()),
            _ => Uuid::new_v4().to_string(),
        };

        let dir = self.root.join(namespace);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&stored_name), &upload.bytes).await?;

        Ok(format!("{namespace}/{stored_name}"))
    }

    /// True when `relative` points at a stored file.
    pub async fn exists(&self, relative: &str) -> bool {
        tokio::fs::try_exists(self.root.join(relative))
            .await
            .unwrap_or(false)
    }

    /// Deletes a stored file, erroring if the removal itself fails.
    /// Missing files are treated as already deleted.
    pub async fn delete(&self, relative: &str) -> Result<()> {
        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort delete used by update/delete flows: failures are logged
    /// and swallowed so the row mutation can proceed. Empty paths are a no-op.
    pub async fn remove_quiet(&self, relative: &str) {
        if relative.is_empty() {
            return;
        }
        if let Err(e) = self.delete(relative).await {
            warn!(path = relative, error = %e, "failed to delete stored file");
        }
    }

    /// Replaces the previous stored file (if any) with a new upload and
    /// returns the new relative path. The old file's removal is best-effort.
    pub async fn replace(
        &self,
        namespace: &str,
        previous: Option<&str>,
        upload: &Upload,
    ) -> Result<String> {
        if let Some(old) = previous {
            self.remove_quiet(old).await;
        }
        self.store(namespace, upload).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn store_in_tempdir() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_store_and_exists() {
        let (_dir, store) = store_in_tempdir();
        let upload = Upload::new("photo.JPG", vec![1, 2, 3]);

        let path = store.store("banners", &upload).await.unwrap();
        assert!(path.starts_with("banners/"));
        assert!(path.ends_with(".jpg"));
        assert!(store.exists(&path).await);
    }

    #[tokio::test]
    async fn test_store_without_extension() {
        let (_dir, store) = store_in_tempdir();
        let path = store
            .store("docs", &Upload::new("README", vec![0]))
            .await
            .unwrap();
        assert!(store.exists(&path).await);
    }

    #[tokio::test]
    async fn test_store_rejects_empty_name() {
        let (_dir, store) = store_in_tempdir();
        let result = store.store("docs", &Upload::new("   ", vec![0])).await;
        assert!(matches!(result, Err(Error::Upload { .. })));
    }

    #[tokio::test]
    async fn test_same_upload_twice_gets_distinct_paths() {
        let (_dir, store) = store_in_tempdir();
        let upload = Upload::new("logo.png", vec![9]);
        let first = store.store("settings", &upload).await.unwrap();
        let second = store.store("settings", &upload).await.unwrap();
        assert_ne!(first, second);
        assert!(store.exists(&first).await);
        assert!(store.exists(&second).await);
    }

    #[tokio::test]
    async fn test_delete_and_missing_file() {
        let (_dir, store) = store_in_tempdir();
        let path = store
            .store("gallery", &Upload::new("a.png", vec![1]))
            .await
            .unwrap();

        store.delete(&path).await.unwrap();
        assert!(!store.exists(&path).await);

        // Deleting again is treated as already done.
        store.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_replace_removes_previous() {
        let (_dir, store) = store_in_tempdir();
        let old = store
            .store("employees", &Upload::new("old.png", vec![1]))
            .await
            .unwrap();

        let new = store
            .replace("employees", Some(&old), &Upload::new("new.png", vec![2]))
            .await
            .unwrap();

        assert!(!store.exists(&old).await);
        assert!(store.exists(&new).await);
    }

    #[tokio::test]
    async fn test_remove_quiet_ignores_empty_and_missing() {
        let (_dir, store) = store_in_tempdir();
        store.remove_quiet("").await;
        store.remove_quiet("nope/missing.png").await;
    }
}
