//! IR persistence: an abstract object-store backend plus the typed
//! load/save-by-identifier layer on top of it.
//!
//! The backend holds opaque objects at slash-separated paths and hands back
//! durable public URLs. The IR layer knows the canonical object locations
//! and the JSON encoding, nothing else. No locking is provided: concurrent
//! saves against the same document race and the later save wins.

mod fs;

pub use fs::FsStore;

use crate::error::{Error, Result};
use crate::model::Document;
use std::sync::Arc;

/// Canonical object path for a document's IR JSON.
pub fn ir_object_path(document_id: &str) -> String {
    format!("{}/ir.json", document_id)
}

/// Canonical object path for a document's full Markdown export.
pub fn markdown_export_path(document_id: &str) -> String {
    format!("{}/exports/markdown/full_document.md", document_id)
}

/// Persistence backend collaborator.
///
/// Implementations store bytes at a path and return a public URL for each
/// stored object. A missing object surfaces as [`Error::ObjectNotFound`];
/// every other failure is a backend fault.
pub trait ObjectStore: Send + Sync {
    /// Fetch the object at `path`.
    fn get(&self, path: &str) -> Result<Vec<u8>>;

    /// Store `data` at `path`, overwriting any prior version. Returns the
    /// object's public URL.
    fn put(&self, path: &str, data: &[u8], content_type: &str) -> Result<String>;

    /// Fetch the object at `path` as UTF-8 text.
    fn get_text(&self, path: &str) -> Result<String> {
        let data = self.get(path)?;
        String::from_utf8(data).map_err(|e| Error::Backend(format!("invalid UTF-8 at {path}: {e}")))
    }

    /// Store a text object at `path`. Returns the object's public URL.
    fn put_text(&self, path: &str, text: &str, content_type: &str) -> Result<String> {
        self.put(path, text.as_bytes(), content_type)
    }
}

/// Typed load/save of IR documents over an object-store backend.
///
/// The backend handle is constructed once at process start and passed in
/// explicitly; the store itself holds no other state.
#[derive(Clone)]
pub struct IrStore {
    backend: Arc<dyn ObjectStore>,
}

impl IrStore {
    /// Create a store over the given backend.
    pub fn new(backend: Arc<dyn ObjectStore>) -> Self {
        Self { backend }
    }

    /// The underlying backend handle.
    pub fn backend(&self) -> &Arc<dyn ObjectStore> {
        &self.backend
    }

    /// Load the persisted IR for a document.
    ///
    /// Fails with [`Error::DocumentNotFound`] if nothing is persisted at the
    /// canonical location for that id.
    pub fn load(&self, document_id: &str) -> Result<Document> {
        let path = ir_object_path(document_id);
        let text = match self.backend.get_text(&path) {
            Ok(text) => text,
            Err(Error::ObjectNotFound(_)) => {
                return Err(Error::DocumentNotFound(document_id.to_string()))
            }
            Err(e) => return Err(e),
        };
        serde_json::from_str(&text).map_err(|e| Error::Serialize(format!("invalid IR JSON: {e}")))
    }

    /// Persist the full IR for a document, overwriting any prior version.
    /// Returns the public URL of the stored object.
    pub fn save(&self, document_id: &str, doc: &Document) -> Result<String> {
        let path = ir_object_path(document_id);
        let text = serde_json::to_string(doc)
            .map_err(|e| Error::Serialize(format!("JSON serialization error: {e}")))?;
        let url = self.backend.put_text(&path, &text, "application/json")?;
        log::info!("saved IR for {} ({} blocks)", document_id, doc.block_count());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_paths() {
        assert_eq!(ir_object_path("doc-1"), "doc-1/ir.json");
        assert_eq!(
            markdown_export_path("doc-1"),
            "doc-1/exports/markdown/full_document.md"
        );
    }
}
