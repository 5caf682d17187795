//! # docir
//!
//! Canonical, mutable intermediate representation (IR) of a document — an
//! ordered list of typed content blocks — with operations to read, edit,
//! insert, delete, and render it.
//!
//! Documents are referenced by an opaque id and persisted whole through an
//! abstract object store; each operation is an independent load → operate →
//! save cycle. Block identity is a stable creation-time handle derived from
//! `(content, type, order)` and never recomputed after an edit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docir::model::{Block, BlockType, Document};
//! use docir::store::{FsStore, IrStore};
//! use docir::{mutate, render};
//! use std::sync::Arc;
//!
//! fn main() -> docir::Result<()> {
//!     let store = IrStore::new(Arc::new(FsStore::new("./output")?));
//!
//!     let mut doc = store.load("my-document")?;
//!     let heading_id = doc.blocks[0].block_id.clone();
//!     mutate::add_block(
//!         &mut doc,
//!         &heading_id,
//!         "A new paragraph",
//!         BlockType::Paragraph,
//!         "text",
//!     )?;
//!     store.save("my-document", &doc)?;
//!
//!     println!("{}", render::to_markdown(&doc));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod id;
pub mod model;
pub mod mutate;
pub mod pipeline;
pub mod render;
pub mod rewrite;
pub mod store;
pub mod tools;

// Re-export commonly used types
pub use error::{Error, Result};
pub use id::generate_block_id;
pub use model::{Block, BlockType, BoundingBox, Document, DocumentStats, ImageData, TableData};
pub use mutate::{add_block, delete_block, edit_block, BlockPatch};
pub use pipeline::{AssetFile, ConversionOutput, ConversionPipeline, FileFetcher};
pub use render::{to_json, to_markdown, JsonFormat};
pub use rewrite::rewrite_asset_paths;
pub use store::{FsStore, IrStore, ObjectStore};
pub use tools::DocumentTools;
