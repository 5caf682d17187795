//! IR data model: the ordered block sequence describing a document's
//! structure and content, independent of its source format.
//!
//! The model is open where the producing pipeline is open: block types,
//! block metadata, and stats all round-trip unknown keys losslessly.

mod block;
mod document;

pub use block::{Block, BlockType, BoundingBox, ImageData, TableData};
pub use document::{Document, DocumentStats, SCHEMA_VERSION};
