//! Asset path rewriting.
//!
//! The conversion pipeline writes assets (images, table CSVs) next to the IR
//! using process-local relative paths. After those files have been uploaded,
//! the paths inside the IR are replaced once with their durable public URLs.

use crate::model::Document;
use std::collections::HashMap;

/// Conventional relative path of a table's extracted CSV artifact.
pub fn table_csv_path(table_id: &str) -> String {
    format!("tables/{}.csv", table_id)
}

/// Replace local asset paths in the document with their uploaded URLs.
///
/// `url_map` maps a pipeline-local relative path to its public URL. Image
/// blocks have `image_data.extracted_path` substituted when mapped; table
/// blocks with a `table_id` in metadata get `table_data.csv_url` attached
/// when the conventional CSV path is mapped. Paths absent from the map are
/// left exactly as they were; this never fails.
pub fn rewrite_asset_paths(doc: &mut Document, url_map: &HashMap<String, String>) {
    let mut rewritten = 0usize;

    for block in &mut doc.blocks {
        if let Some(image) = block.image_data.as_mut() {
            if let Some(local_path) = image.extracted_path.as_ref() {
                if let Some(url) = url_map.get(local_path) {
                    image.extracted_path = Some(url.clone());
                    rewritten += 1;
                }
            }
        }

        if block.table_data.is_some() {
            let table_id = block
                .metadata
                .get("table_id")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            if let Some(table_id) = table_id {
                if let Some(url) = url_map.get(&table_csv_path(&table_id)) {
                    if let Some(table) = block.table_data.as_mut() {
                        table.csv_url = Some(url.clone());
                        rewritten += 1;
                    }
                }
            }
        }
    }

    log::debug!(
        "rewrote {} asset path(s) in {}",
        rewritten,
        doc.document_id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BlockType, ImageData, TableData};
    use serde_json::Value;

    fn image_block(id: &str, path: &str, order: u32) -> Block {
        let mut block = Block::new(id, BlockType::Image, "", order);
        block.image_data = Some(ImageData {
            extracted_path: Some(path.to_string()),
            ..Default::default()
        });
        block
    }

    fn table_block(id: &str, table_id: &str, order: u32) -> Block {
        let mut block = Block::new(id, BlockType::Table, "| a |", order);
        block.table_data = Some(TableData::default());
        block
            .metadata
            .insert("table_id".to_string(), Value::String(table_id.to_string()));
        block
    }

    #[test]
    fn test_rewrites_mapped_image_path() {
        let mut doc = Document::new("doc-1");
        doc.push_block(image_block("i1", "images/img_1.png", 0));

        let mut map = HashMap::new();
        map.insert(
            "images/img_1.png".to_string(),
            "https://cdn.example/doc-1/images/img_1.png".to_string(),
        );
        rewrite_asset_paths(&mut doc, &map);

        let image = doc.blocks[0].image_data.as_ref().unwrap();
        assert_eq!(
            image.extracted_path.as_deref(),
            Some("https://cdn.example/doc-1/images/img_1.png")
        );
    }

    #[test]
    fn test_attaches_csv_url_by_convention() {
        let mut doc = Document::new("doc-1");
        doc.push_block(table_block("t1", "tbl_7", 0));

        let mut map = HashMap::new();
        map.insert(
            "tables/tbl_7.csv".to_string(),
            "https://cdn.example/doc-1/tables/tbl_7.csv".to_string(),
        );
        rewrite_asset_paths(&mut doc, &map);

        let table = doc.blocks[0].table_data.as_ref().unwrap();
        assert_eq!(
            table.csv_url.as_deref(),
            Some("https://cdn.example/doc-1/tables/tbl_7.csv")
        );
    }

    #[test]
    fn test_unmapped_paths_left_untouched() {
        let mut doc = Document::new("doc-1");
        doc.push_block(image_block("i1", "images/img_1.png", 0));
        doc.push_block(table_block("t1", "tbl_7", 1));
        let before = doc.clone();

        rewrite_asset_paths(&mut doc, &HashMap::new());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_blocks_without_assets_ignored() {
        let mut doc = Document::new("doc-1");
        doc.push_block(Block::new("p1", BlockType::Paragraph, "text", 0));
        let before = doc.clone();

        let mut map = HashMap::new();
        map.insert("images/img_1.png".to_string(), "https://x".to_string());
        rewrite_asset_paths(&mut doc, &map);
        assert_eq!(doc, before);
    }
}
