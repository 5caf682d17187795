//! External collaborator seams.
//!
//! Document-to-IR conversion and source-document fetching are external
//! services: the core consumes them through these traits and never looks
//! inside. Timeouts, retries, and cancellation belong to the implementations,
//! not to the core; their failures propagate as fatal errors for the call.

use crate::error::Result;
use crate::model::Document;
use std::path::{Path, PathBuf};

/// A pipeline-produced file written alongside the IR (extracted image,
/// table CSV, manifest), addressed by its path relative to the IR.
#[derive(Debug, Clone)]
pub struct AssetFile {
    /// Path relative to the document's output directory
    pub relative_path: String,

    /// File contents
    pub data: Vec<u8>,

    /// MIME type of the file
    pub content_type: String,
}

impl AssetFile {
    /// Create an asset file.
    pub fn new(
        relative_path: impl Into<String>,
        data: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            data,
            content_type: content_type.into(),
        }
    }
}

/// Everything the conversion pipeline produces for one source document.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The initial IR document
    pub document: Document,

    /// Files produced alongside the IR, with pipeline-local relative paths
    pub assets: Vec<AssetFile>,
}

/// The document-to-IR conversion pipeline (layout detection, text/table/image
/// extraction). Consumed via a single call that yields an initial IR document
/// plus its extracted assets.
pub trait ConversionPipeline: Send + Sync {
    /// Convert the document at `source` into its initial IR.
    fn convert(&self, source: &Path) -> Result<ConversionOutput>;
}

/// Retrieval of source documents from remote locations.
pub trait FileFetcher: Send + Sync {
    /// Download the document at `url` to a local file and return its path.
    /// The caller owns the returned file for the duration of the call.
    fn fetch(&self, url: &str) -> Result<PathBuf>;
}
