//! Document-level types.

use super::Block;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current IR schema version written by this crate.
pub const SCHEMA_VERSION: &str = "1.0";

/// Derived counters over the block sequence.
///
/// `block_count` is kept equal to the number of blocks after every mutation;
/// any other pipeline-produced counters pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of blocks in the document
    pub block_count: usize,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A document's intermediate representation: an ordered sequence of typed
/// content blocks plus document-level metadata.
///
/// The whole `Document` is the unit of persistence; there is no partial write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque document identifier
    pub document_id: String,

    /// IR schema version
    pub schema_version: String,

    /// Open document-level metadata mapping
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Derived counters, if the producing pipeline emitted them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<DocumentStats>,

    /// Ordered block sequence
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document with the current schema version.
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            schema_version: SCHEMA_VERSION.to_string(),
            metadata: Map::new(),
            stats: None,
            blocks: Vec::new(),
        }
    }

    /// Get the number of blocks in the document.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find the first block with the given id.
    ///
    /// Ids are expected unique, but lookup does not rely on it: the first
    /// match in sequence order wins deterministically.
    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.block_id == block_id)
    }

    /// Find the first block with the given id, mutably.
    pub fn find_block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.block_id == block_id)
    }

    /// Sequence index of the first block with the given id.
    pub fn position_of(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.block_id == block_id)
    }

    /// Append a block and keep stats in sync.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
        self.refresh_stats();
    }

    /// Recompute `stats.block_count` if stats are present.
    pub fn refresh_stats(&mut self) {
        if let Some(stats) = self.stats.as_mut() {
            stats.block_count = self.blocks.len();
        }
    }

    /// Blocks in ascending `order`, without assuming they are stored sorted.
    pub fn blocks_in_order(&self) -> Vec<&Block> {
        let mut ordered: Vec<&Block> = self.blocks.iter().collect();
        ordered.sort_by_key(|b| b.order);
        ordered
    }
}
