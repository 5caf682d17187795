//! Block-level types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The type of a content block.
///
/// The set is open: unknown type strings survive a serialization round trip
/// via the `Other` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Section heading
    Heading,
    /// Body text paragraph
    Paragraph,
    /// List item
    List,
    /// Table (content pre-formatted as markup)
    Table,
    /// Image reference
    Image,
    /// Code block
    Code,
    /// Any other type string
    #[serde(untagged)]
    Other(String),
}

impl BlockType {
    /// The canonical string form, as persisted in IR JSON.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::List => "list",
            BlockType::Table => "table",
            BlockType::Image => "image",
            BlockType::Code => "code",
            BlockType::Other(s) => s,
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BlockType {
    fn from(s: &str) -> Self {
        match s {
            "heading" => BlockType::Heading,
            "paragraph" => BlockType::Paragraph,
            "list" => BlockType::List,
            "table" => BlockType::Table,
            "image" => BlockType::Image,
            "code" => BlockType::Code,
            other => BlockType::Other(other.to_string()),
        }
    }
}

impl FromStr for BlockType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(BlockType::from(s))
    }
}

/// Bounding-box geometry locating a block on its source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,

    /// Width of the source page, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f64>,

    /// Height of the source page, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f64>,
}

impl BoundingBox {
    /// A degenerate box at the page origin, used when geometry is unknown.
    pub fn zero() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: 0.0,
            y1: 0.0,
            page_width: None,
            page_height: None,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Structured table payload attached to a table block.
///
/// Carries an optional reference to an externally stored CSV artifact; all
/// other pipeline-produced keys pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Public URL of the extracted CSV artifact, once uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Image payload attached to an image block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Path of the extracted image: pipeline-local at first, rewritten to a
    /// public URL after upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_path: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An atomic content unit of the IR: a heading, paragraph, list item, table,
/// or image, with position, geometry, and order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identifier, assigned once at creation, never recomputed
    pub block_id: String,

    /// Block type (open set)
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Weak reference to a parent block's id, for hierarchy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Source page index
    pub page_number: u32,

    /// Geometry on the source page
    pub bbox: BoundingBox,

    /// Text payload
    pub content: String,

    /// Open metadata mapping; `label` classifies the block semantically
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Structured table payload, if this block is a table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,

    /// Image payload, if this block is an image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<ImageData>,

    /// Heading depth, used only when the type is heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Nesting depth for list items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_level: Option<u8>,

    /// Position within the document; dense and zero-based at rest
    pub order: u32,
}

impl Block {
    /// Create a block with the given identity, type, content, and order.
    /// Geometry defaults to page 1 at the origin.
    pub fn new(
        block_id: impl Into<String>,
        block_type: BlockType,
        content: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            block_type,
            parent_id: None,
            page_number: 1,
            bbox: BoundingBox::zero(),
            content: content.into(),
            metadata: Map::new(),
            table_data: None,
            image_data: None,
            level: None,
            list_level: None,
            order,
        }
    }

    /// Set the semantic label in metadata.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.metadata
            .insert("label".to_string(), Value::String(label.into()));
        self
    }

    /// Set the heading level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the source page and geometry.
    pub fn with_geometry(mut self, page_number: u32, bbox: BoundingBox) -> Self {
        self.page_number = page_number;
        self.bbox = bbox;
        self
    }

    /// The semantic label from metadata, if present.
    pub fn label(&self) -> Option<&str> {
        self.metadata.get("label").and_then(Value::as_str)
    }

    /// Whether the trimmed content is empty (such blocks render to nothing).
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trip() {
        let known: BlockType = serde_json::from_str("\"heading\"").unwrap();
        assert_eq!(known, BlockType::Heading);
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"heading\"");

        let open: BlockType = serde_json::from_str("\"sidebar\"").unwrap();
        assert_eq!(open, BlockType::Other("sidebar".to_string()));
        assert_eq!(serde_json::to_string(&open).unwrap(), "\"sidebar\"");
    }

    #[test]
    fn test_block_type_from_str() {
        assert_eq!(BlockType::from("paragraph"), BlockType::Paragraph);
        assert_eq!(BlockType::from("table"), BlockType::Table);
        assert_eq!(
            BlockType::from("footnote"),
            BlockType::Other("footnote".to_string())
        );
        assert_eq!(BlockType::from("footnote").as_str(), "footnote");
    }

    #[test]
    fn test_block_label() {
        let block = Block::new("blk_1", BlockType::Paragraph, "text", 0).with_label("text");
        assert_eq!(block.label(), Some("text"));

        let unlabeled = Block::new("blk_2", BlockType::Paragraph, "text", 1);
        assert_eq!(unlabeled.label(), None);
    }

    #[test]
    fn test_block_is_blank() {
        assert!(Block::new("b", BlockType::Paragraph, "", 0).is_blank());
        assert!(Block::new("b", BlockType::Paragraph, "  \n\t ", 0).is_blank());
        assert!(!Block::new("b", BlockType::Paragraph, "x", 0).is_blank());
    }

    #[test]
    fn test_optional_fields_stay_absent() {
        let block = Block::new("blk_1", BlockType::Paragraph, "hello", 0);
        let json = serde_json::to_string(&block).unwrap();
        assert!(!json.contains("parent_id"));
        assert!(!json.contains("table_data"));
        assert!(!json.contains("image_data"));
        assert!(!json.contains("level"));

        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
