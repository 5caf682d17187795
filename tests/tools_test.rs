//! Integration tests for the tool surface, with mock external collaborators.

use docir::model::{Block, BlockType, Document, DocumentStats, ImageData};
use docir::pipeline::{AssetFile, ConversionOutput, ConversionPipeline, FileFetcher};
use docir::store::{FsStore, IrStore, ObjectStore};
use docir::tools::{error_payload, DocumentTools};
use docir::{generate_block_id, Error};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pipeline that returns a canned two-block document with one image asset.
struct MockPipeline;

impl ConversionPipeline for MockPipeline {
    fn convert(&self, _source: &Path) -> docir::Result<ConversionOutput> {
        let mut doc = Document::new("doc-mock");
        doc.push_block(
            Block::new("blk_a", BlockType::Heading, "Title", 0)
                .with_label("section_header")
                .with_level(1),
        );
        let mut image = Block::new("blk_img", BlockType::Image, "", 1);
        image.image_data = Some(ImageData {
            extracted_path: Some("images/img_1.png".to_string()),
            ..Default::default()
        });
        doc.push_block(image);
        doc.stats = Some(DocumentStats::default());
        doc.refresh_stats();

        Ok(ConversionOutput {
            document: doc,
            assets: vec![AssetFile::new(
                "images/img_1.png",
                vec![0x89, 0x50, 0x4E, 0x47],
                "image/png",
            )],
        })
    }
}

/// Fetcher that hands back a fixed local path without touching the network.
struct MockFetcher(PathBuf);

impl FileFetcher for MockFetcher {
    fn fetch(&self, _url: &str) -> docir::Result<PathBuf> {
        Ok(self.0.clone())
    }
}

fn tools_over(dir: &tempfile::TempDir) -> (DocumentTools, Arc<FsStore>) {
    let backend = Arc::new(FsStore::new(dir.path()).unwrap());
    let store = IrStore::new(backend.clone());
    let tools = DocumentTools::new(
        store,
        Arc::new(MockPipeline),
        Arc::new(MockFetcher(dir.path().join("source.pdf"))),
    );
    (tools, backend)
}

/// Seed a simple two-block document directly through the store.
fn seed_document(dir: &tempfile::TempDir) -> String {
    let store = IrStore::new(Arc::new(FsStore::new(dir.path()).unwrap()));
    let mut doc = Document::new("doc-1");
    doc.push_block(
        Block::new("blk_a", BlockType::Heading, "Title", 0)
            .with_label("section_header")
            .with_level(1),
    );
    doc.push_block(Block::new("blk_b", BlockType::Paragraph, "Body", 1).with_label("text"));
    doc.stats = Some(DocumentStats::default());
    doc.refresh_stats();
    store.save("doc-1", &doc).unwrap();
    "doc-1".to_string()
}

fn stored_ir(backend: &Arc<FsStore>, document_id: &str) -> String {
    backend
        .get_text(&format!("{}/ir.json", document_id))
        .unwrap()
}

#[test]
fn test_convert_uploads_assets_and_rewrites_paths() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);

    let response = tools
        .convert_document("https://example.com/report.pdf")
        .unwrap();
    assert_eq!(response.document_id, "doc-mock");
    assert_eq!(response.block_count, 2);
    assert!(response.ir_url.ends_with("doc-mock/ir.json"));

    // The asset was uploaded under the document's prefix.
    let asset = backend.get("doc-mock/images/img_1.png").unwrap();
    assert_eq!(asset, vec![0x89, 0x50, 0x4E, 0x47]);

    // The persisted IR references the uploaded URL, not the local path.
    let doc = tools.read_ir("doc-mock").unwrap();
    let image = doc.blocks[1].image_data.as_ref().unwrap();
    let path = image.extracted_path.as_deref().unwrap();
    assert!(path.starts_with("file://"));
    assert!(path.ends_with("doc-mock/images/img_1.png"));
}

#[test]
fn test_read_ir_returns_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);
    let id = seed_document(&dir);

    let doc = tools.read_ir(&id).unwrap();
    assert_eq!(doc.document_id, "doc-1");
    assert_eq!(doc.block_count(), 2);
    assert_eq!(doc.blocks[0].content, "Title");
}

#[test]
fn test_get_ir_json_is_raw_serialization() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);
    let id = seed_document(&dir);

    let json = tools.get_ir_json(&id).unwrap();
    let parsed: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, tools.read_ir(&id).unwrap());
}

#[test]
fn test_edit_persists_only_supplied_fields() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);
    let id = seed_document(&dir);

    let response = tools
        .edit_ir_block(&id, "blk_b", Some("New body"), None, None)
        .unwrap();
    assert!(response.success);
    assert_eq!(response.block_id, "blk_b");

    let doc = tools.read_ir(&id).unwrap();
    let block = doc.find_block("blk_b").unwrap();
    assert_eq!(block.content, "New body");
    assert_eq!(block.block_type, BlockType::Paragraph);
    assert_eq!(block.order, 1);
}

#[test]
fn test_edit_unknown_block_leaves_persisted_form_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);
    let id = seed_document(&dir);
    let before = stored_ir(&backend, &id);

    let err = tools
        .edit_ir_block(&id, "blk_missing", Some("x"), None, None)
        .unwrap_err();
    assert!(matches!(err, Error::BlockNotFound(_)));
    assert_eq!(error_payload(&err)["error"], "Block blk_missing not found");
    assert_eq!(stored_ir(&backend, &id), before);
}

#[test]
fn test_edit_malformed_metadata_leaves_persisted_form_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);
    let id = seed_document(&dir);
    let before = stored_ir(&backend, &id);

    let err = tools
        .edit_ir_block(&id, "blk_b", Some("x"), None, Some("{broken"))
        .unwrap_err();
    assert!(matches!(err, Error::MalformedMetadata(_)));
    assert_eq!(stored_ir(&backend, &id), before);
}

#[test]
fn test_add_then_delete_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);
    let id = seed_document(&dir);

    let added = tools
        .add_ir_block(&id, "blk_a", "New", Some("paragraph"), None)
        .unwrap();
    assert!(added.success);
    assert_eq!(
        added.new_block_id,
        generate_block_id("New", &BlockType::Paragraph, 1)
    );

    let doc = tools.read_ir(&id).unwrap();
    assert_eq!(doc.block_count(), 3);
    assert_eq!(doc.find_block(&added.new_block_id).unwrap().order, 1);
    assert_eq!(doc.find_block("blk_b").unwrap().order, 2);

    let deleted = tools.delete_ir_block(&id, "blk_b").unwrap();
    assert!(deleted.success);

    let doc = tools.read_ir(&id).unwrap();
    assert_eq!(doc.block_count(), 2);
    assert_eq!(doc.stats.as_ref().unwrap().block_count, 2);
    let orders: Vec<u32> = doc.blocks.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![0, 1]);
}

#[test]
fn test_add_with_unknown_reference_block() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);
    let id = seed_document(&dir);
    let before = stored_ir(&backend, &id);

    let err = tools
        .add_ir_block(&id, "blk_missing", "x", None, None)
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(stored_ir(&backend, &id), before);
}

#[test]
fn test_delete_unknown_block() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);
    let id = seed_document(&dir);
    let before = stored_ir(&backend, &id);

    let err = tools.delete_ir_block(&id, "blk_missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(stored_ir(&backend, &id), before);
}

#[test]
fn test_operations_on_unknown_document() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);

    assert!(matches!(
        tools.read_ir("ghost").unwrap_err(),
        Error::DocumentNotFound(_)
    ));
    assert!(matches!(
        tools
            .edit_ir_block("ghost", "b", Some("x"), None, None)
            .unwrap_err(),
        Error::DocumentNotFound(_)
    ));
    assert!(matches!(
        tools.export_to_markdown("ghost").unwrap_err(),
        Error::DocumentNotFound(_)
    ));
}

#[test]
fn test_export_renders_and_persists_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, backend) = tools_over(&dir);
    let id = seed_document(&dir);

    let response = tools.export_to_markdown(&id).unwrap();
    assert_eq!(response.markdown, "# Title\n\nBody\n");
    assert!(response
        .url
        .ends_with("doc-1/exports/markdown/full_document.md"));

    let stored = backend
        .get_text("doc-1/exports/markdown/full_document.md")
        .unwrap();
    assert_eq!(stored, response.markdown);
}

#[test]
fn test_edit_then_export_full_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let (tools, _) = tools_over(&dir);
    let id = seed_document(&dir);

    tools
        .add_ir_block(&id, "blk_a", "New", Some("paragraph"), Some("text"))
        .unwrap();
    tools.delete_ir_block(&id, "blk_b").unwrap();

    let export = tools.export_to_markdown(&id).unwrap();
    assert_eq!(export.markdown, "# Title\n\nNew\n");
}
