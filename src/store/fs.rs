//! Filesystem-backed object store.

use super::ObjectStore;
use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Object store rooted at a local directory.
///
/// Object paths map directly to files under the root; URLs are `file://`
/// URLs of the stored files.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created if it does
    /// not exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, object_path: &str) -> PathBuf {
        self.root.join(object_path)
    }

    fn url_for(&self, object_path: &str) -> String {
        format!("file://{}", self.file_path(object_path).display())
    }
}

impl ObjectStore for FsStore {
    fn get(&self, path: &str) -> Result<Vec<u8>> {
        match fs::read(self.file_path(path)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::ObjectNotFound(path.to_string()))
            }
            Err(e) => Err(Error::Backend(format!("read {path}: {e}"))),
        }
    }

    fn put(&self, path: &str, data: &[u8], _content_type: &str) -> Result<String> {
        let file_path = self.file_path(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Backend(format!("mkdir for {path}: {e}")))?;
        }
        fs::write(&file_path, data).map_err(|e| Error::Backend(format!("write {path}: {e}")))?;
        Ok(self.url_for(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        let url = store
            .put("doc-1/ir.json", b"{\"a\":1}", "application/json")
            .unwrap();
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("doc-1/ir.json"));

        let data = store.get("doc-1/ir.json").unwrap();
        assert_eq!(data, b"{\"a\":1}");
    }

    #[test]
    fn test_get_missing_is_object_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        let err = store.get("doc-1/ir.json").unwrap_err();
        assert!(matches!(err, Error::ObjectNotFound(_)));
    }

    #[test]
    fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path()).unwrap();

        store.put("x", b"old", "text/plain").unwrap();
        store.put("x", b"new", "text/plain").unwrap();
        assert_eq!(store.get("x").unwrap(), b"new");
    }
}
