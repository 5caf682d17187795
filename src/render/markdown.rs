//! Markdown projection of the block sequence.

use crate::model::{Block, BlockType, Document};

/// Maximum heading depth emitted.
const MAX_HEADING_LEVEL: u8 = 6;

/// Render a document to Markdown.
///
/// Blocks are visited in ascending `order`. A block whose trimmed content is
/// empty contributes nothing, not even a blank line. Headings, list items,
/// and tables get their own treatment; everything else renders as a plain
/// paragraph followed by a blank line.
pub fn to_markdown(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in doc.blocks_in_order() {
        let content = block.content.trim();
        if content.is_empty() {
            continue;
        }

        if is_heading(block) {
            let level = block.level.unwrap_or(1).clamp(1, MAX_HEADING_LEVEL);
            lines.push(format!("{} {}", "#".repeat(level as usize), content));
            lines.push(String::new());
        } else if is_list_item(block) {
            // List items stay contiguous: no trailing blank line.
            lines.push(format!("- {}", content));
        } else if block.block_type == BlockType::Table {
            // Table content is assumed pre-formatted as markup.
            lines.push(content.to_string());
            lines.push(String::new());
        } else {
            lines.push(content.to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn is_heading(block: &Block) -> bool {
    block.block_type == BlockType::Heading || block.label() == Some("section_header")
}

fn is_list_item(block: &Block) -> bool {
    block.block_type == BlockType::List || block.label() == Some("list_item")
}
