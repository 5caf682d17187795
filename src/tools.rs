//! Tool surface: one method per externally callable operation.
//!
//! Each method is a complete, independent load → operate → save cycle over
//! the IR store; no state is held between calls. Not-Found and malformed
//! input come back as typed errors before anything is persisted, so a failed
//! call never leaves the stored document partially updated.

use crate::error::{Error, Result};
use crate::model::{BlockType, Document};
use crate::mutate::{self, BlockPatch};
use crate::pipeline::{ConversionPipeline, FileFetcher};
use crate::render::{self, JsonFormat};
use crate::rewrite::rewrite_asset_paths;
use crate::store::{markdown_export_path, IrStore};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Response of a successful document conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    pub document_id: String,
    pub block_count: usize,
    pub ir_url: String,
    pub message: String,
}

/// Response of a successful block edit.
#[derive(Debug, Clone, Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub block_id: String,
    pub message: String,
}

/// Response of a successful block insertion.
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    pub success: bool,
    pub new_block_id: String,
    pub message: String,
}

/// Response of a successful block deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub block_id: String,
    pub message: String,
}

/// Response of a successful Markdown export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub markdown: String,
    pub url: String,
    pub message: String,
}

/// The `{error}` payload shape returned to callers for failed operations.
pub fn error_payload(err: &Error) -> serde_json::Value {
    json!({ "error": err.to_string() })
}

/// Stateless handler exposing the document operations.
///
/// Holds the IR store and the external collaborators, all injected at
/// construction. Documents are referenced by opaque id only; the full IR
/// never travels through a call's arguments.
pub struct DocumentTools {
    store: IrStore,
    pipeline: Arc<dyn ConversionPipeline>,
    fetcher: Arc<dyn FileFetcher>,
}

impl DocumentTools {
    /// Create a handler over the given store and collaborators.
    pub fn new(
        store: IrStore,
        pipeline: Arc<dyn ConversionPipeline>,
        fetcher: Arc<dyn FileFetcher>,
    ) -> Self {
        Self {
            store,
            pipeline,
            fetcher,
        }
    }

    /// Convert a source document into IR and persist it.
    ///
    /// Fetches the source, runs the conversion pipeline, uploads every
    /// produced asset, rewrites the IR's local asset paths to the uploaded
    /// URLs (exactly once), and saves the IR at its canonical location.
    pub fn convert_document(&self, file_url: &str) -> Result<ConvertResponse> {
        let local = self.fetcher.fetch(file_url)?;
        let output = self.pipeline.convert(&local)?;

        let mut doc = output.document;
        let document_id = doc.document_id.clone();
        log::info!(
            "converted {} -> {} ({} blocks, {} assets)",
            file_url,
            document_id,
            doc.block_count(),
            output.assets.len()
        );

        let mut url_map = HashMap::new();
        for asset in &output.assets {
            let object_path = format!("{}/{}", document_id, asset.relative_path);
            let url = self
                .store
                .backend()
                .put(&object_path, &asset.data, &asset.content_type)?;
            url_map.insert(asset.relative_path.clone(), url);
        }

        rewrite_asset_paths(&mut doc, &url_map);
        let ir_url = self.store.save(&document_id, &doc)?;

        Ok(ConvertResponse {
            block_count: doc.block_count(),
            message: format!(
                "Document converted. Use read_ir(document_id='{}') to see the structure.",
                document_id
            ),
            ir_url,
            document_id,
        })
    }

    /// Read the full IR for a document.
    pub fn read_ir(&self, document_id: &str) -> Result<Document> {
        self.store.load(document_id)
    }

    /// Read the raw serialized IR JSON for a document.
    pub fn get_ir_json(&self, document_id: &str) -> Result<String> {
        let doc = self.store.load(document_id)?;
        render::to_json(&doc, JsonFormat::Compact)
    }

    /// Edit a block's content, type, and/or metadata.
    ///
    /// `new_metadata` is a JSON object string; it is parsed before the
    /// document is touched, so a malformed payload mutates nothing.
    pub fn edit_ir_block(
        &self,
        document_id: &str,
        block_id: &str,
        new_content: Option<&str>,
        new_type: Option<&str>,
        new_metadata: Option<&str>,
    ) -> Result<EditResponse> {
        let mut patch = BlockPatch::new();
        if let Some(content) = new_content {
            patch = patch.with_content(content);
        }
        if let Some(block_type) = new_type {
            patch = patch.with_type(BlockType::from(block_type));
        }
        if let Some(metadata) = new_metadata {
            patch = patch.with_metadata_json(metadata)?;
        }

        let mut doc = self.store.load(document_id)?;
        mutate::edit_block(&mut doc, block_id, &patch)?;
        self.store.save(document_id, &doc)?;

        Ok(EditResponse {
            success: true,
            block_id: block_id.to_string(),
            message: format!("Block {} updated successfully.", block_id),
        })
    }

    /// Add a new block after an existing one.
    pub fn add_ir_block(
        &self,
        document_id: &str,
        after_block_id: &str,
        content: &str,
        block_type: Option<&str>,
        label: Option<&str>,
    ) -> Result<AddResponse> {
        let block_type = BlockType::from(block_type.unwrap_or("paragraph"));
        let label = label.unwrap_or("text");

        let mut doc = self.store.load(document_id)?;
        let new_block_id =
            mutate::add_block(&mut doc, after_block_id, content, block_type.clone(), label)?;
        self.store.save(document_id, &doc)?;

        Ok(AddResponse {
            success: true,
            message: format!("New {} block added after {}.", block_type, after_block_id),
            new_block_id,
        })
    }

    /// Delete a block by id.
    pub fn delete_ir_block(&self, document_id: &str, block_id: &str) -> Result<DeleteResponse> {
        let mut doc = self.store.load(document_id)?;
        mutate::delete_block(&mut doc, block_id)?;
        self.store.save(document_id, &doc)?;

        Ok(DeleteResponse {
            success: true,
            block_id: block_id.to_string(),
            message: format!("Block {} deleted successfully.", block_id),
        })
    }

    /// Render a document to Markdown and persist the export artifact.
    pub fn export_to_markdown(&self, document_id: &str) -> Result<ExportResponse> {
        let doc = self.store.load(document_id)?;
        let markdown = render::to_markdown(&doc);

        let export_path = markdown_export_path(document_id);
        let url = self
            .store
            .backend()
            .put_text(&export_path, &markdown, "text/markdown")?;

        Ok(ExportResponse {
            markdown,
            url,
            message: format!("Markdown exported for document {}.", document_id),
        })
    }
}
