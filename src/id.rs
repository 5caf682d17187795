//! Deterministic block identity.
//!
//! A block id is a stable creation-time handle, not a content fingerprint:
//! content edits never regenerate it, so ids stay valid across edits. Other
//! components rely on that stability; do not rederive ids from current
//! content.

use crate::model::BlockType;
use sha2::{Digest, Sha256};

/// Prefix tag carried by every generated block id.
pub const BLOCK_ID_PREFIX: &str = "blk_";

/// Number of hex characters of the digest kept in the id.
const ID_HEX_LEN: usize = 16;

/// Derive a stable block identifier from creation-time inputs.
///
/// The id is `blk_` followed by the first 16 lowercase hex characters of
/// `SHA-256("{content}:{type}:{order}")`. The same triple always yields the
/// same id, so idempotent reprocessing from identical inputs reproduces
/// identical identities.
pub fn generate_block_id(content: &str, block_type: &BlockType, order: u32) -> String {
    let raw = format!("{}:{}:{}", content, block_type, order);
    let digest = Sha256::digest(raw.as_bytes());
    let hex = hex::encode(digest);
    format!("{}{}", BLOCK_ID_PREFIX, &hex[..ID_HEX_LEN])
}
