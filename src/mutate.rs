//! Mutation engine: edit, add, and delete operations over a document's
//! block sequence.
//!
//! Every operation either completes fully, leaving the document invariants
//! intact (unique ids, dense zero-based `order`, accurate stats), or fails
//! with a typed error and leaves the document untouched. Lookup is
//! first-match-wins in sequence order: ids are expected unique, but the
//! engine must stay deterministic even on data that violates that.

use crate::error::{Error, Result};
use crate::id::generate_block_id;
use crate::model::{Block, BlockType, Document};
use serde_json::{Map, Value};

/// A partial-field edit to apply to a single block.
///
/// Only explicitly supplied fields are applied; `order` and `block_id` can
/// never be touched through a patch.
#[derive(Debug, Clone, Default)]
pub struct BlockPatch {
    /// Replacement content text
    pub content: Option<String>,

    /// Replacement block type
    pub block_type: Option<BlockType>,

    /// Replacement metadata mapping (wholesale, not merged)
    pub metadata: Option<Map<String, Value>>,
}

impl BlockPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set replacement content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set replacement block type.
    pub fn with_type(mut self, block_type: BlockType) -> Self {
        self.block_type = Some(block_type);
        self
    }

    /// Set replacement metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Parse a metadata JSON string into a patch field.
    ///
    /// Fails with [`Error::MalformedMetadata`] if the payload is not a JSON
    /// object, before any block field is mutated.
    pub fn with_metadata_json(mut self, json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::MalformedMetadata(e.to_string()))?;
        match value {
            Value::Object(map) => {
                self.metadata = Some(map);
                Ok(self)
            }
            other => Err(Error::MalformedMetadata(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.block_type.is_none() && self.metadata.is_none()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Apply a partial-field edit to the first block matching `block_id`.
///
/// Fails with [`Error::BlockNotFound`] if no block matches, in which case no
/// field is applied.
pub fn edit_block(doc: &mut Document, block_id: &str, patch: &BlockPatch) -> Result<()> {
    let block = doc
        .find_block_mut(block_id)
        .ok_or_else(|| Error::BlockNotFound(block_id.to_string()))?;

    if let Some(ref content) = patch.content {
        block.content = content.clone();
    }
    if let Some(ref block_type) = patch.block_type {
        block.block_type = block_type.clone();
    }
    if let Some(ref metadata) = patch.metadata {
        block.metadata = metadata.clone();
    }

    log::debug!("edited block {} in {}", block_id, doc.document_id);
    Ok(())
}

/// Insert a new block immediately after the block matching `after_block_id`.
///
/// The new block takes `order = ref.order + 1`; every existing block whose
/// `order` is at or past that point is shifted up by one, so a dense
/// `0..N-1` sequence stays dense at `0..N`. Page number and geometry are
/// inherited from the reference block. Returns the generated block id.
pub fn add_block(
    doc: &mut Document,
    after_block_id: &str,
    content: &str,
    block_type: BlockType,
    label: &str,
) -> Result<String> {
    let insert_idx = doc
        .position_of(after_block_id)
        .ok_or_else(|| Error::BlockNotFound(after_block_id.to_string()))?
        + 1;

    let reference = &doc.blocks[insert_idx - 1];
    let new_order = reference.order + 1;
    let page_number = reference.page_number;
    let bbox = reference.bbox.clone();

    for block in &mut doc.blocks {
        if block.order >= new_order {
            block.order += 1;
        }
    }

    let block_id = generate_block_id(content, &block_type, new_order);
    let block = Block::new(block_id.clone(), block_type, content, new_order)
        .with_label(label)
        .with_geometry(page_number, bbox);

    doc.blocks.insert(insert_idx, block);
    doc.refresh_stats();

    log::debug!(
        "added block {} after {} in {}",
        block_id,
        after_block_id,
        doc.document_id
    );
    Ok(block_id)
}

/// Remove the first block matching `block_id` and recompact every remaining
/// block's `order` to its zero-based positional index.
///
/// Compaction ignores prior order values entirely, so a dense sequence is
/// restored even if it had drifted before the call.
pub fn delete_block(doc: &mut Document, block_id: &str) -> Result<()> {
    let idx = doc
        .position_of(block_id)
        .ok_or_else(|| Error::BlockNotFound(block_id.to_string()))?;

    doc.blocks.remove(idx);
    for (i, block) in doc.blocks.iter_mut().enumerate() {
        block.order = i as u32;
    }
    doc.refresh_stats();

    log::debug!("deleted block {} from {}", block_id, doc.document_id);
    Ok(())
}
