//! docir CLI - inspect and edit document IR stored on disk

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use docir::model::Document;
use docir::render::{self, JsonFormat};
use docir::store::{markdown_export_path, FsStore, IrStore, ObjectStore};
use docir::{mutate, BlockPatch, BlockType};

#[derive(Parser)]
#[command(name = "docir")]
#[command(version)]
#[command(about = "Inspect and edit document IR stored on disk", long_about = None)]
struct Cli {
    /// Store root directory
    #[arg(long, value_name = "DIR", env = "DOCIR_STORE", default_value = "./output")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a document from an existing IR JSON file
    Import {
        /// IR JSON file produced by a conversion pipeline
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show a document's block structure
    Read {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,
    },

    /// Print the raw IR JSON
    Json {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Edit a block's content, type, and/or metadata
    Edit {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,

        /// Block id
        #[arg(value_name = "BLOCK_ID")]
        block_id: String,

        /// New content text
        #[arg(long)]
        content: Option<String>,

        /// New block type (heading, paragraph, list, ...)
        #[arg(long = "type")]
        block_type: Option<String>,

        /// New metadata as a JSON object string
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Add a new block after an existing one
    Add {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,

        /// Insert after this block id
        #[arg(value_name = "AFTER_BLOCK_ID")]
        after_block_id: String,

        /// Content text for the new block
        #[arg(value_name = "CONTENT")]
        content: String,

        /// Block type
        #[arg(long = "type", default_value = "paragraph")]
        block_type: String,

        /// Metadata label
        #[arg(long, default_value = "text")]
        label: String,
    },

    /// Delete a block
    Delete {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,

        /// Block id
        #[arg(value_name = "BLOCK_ID")]
        block_id: String,
    },

    /// Export a document to Markdown
    Export {
        /// Document id
        #[arg(value_name = "DOC_ID")]
        document_id: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> docir::Result<()> {
    let backend = Arc::new(FsStore::new(&cli.store)?);
    let store = IrStore::new(backend.clone());

    match cli.command {
        Commands::Import { input } => {
            let text = fs::read_to_string(&input)?;
            let doc: Document = serde_json::from_str(&text)
                .map_err(|e| docir::Error::Serialize(format!("invalid IR JSON: {e}")))?;
            let document_id = doc.document_id.clone();
            let url = store.save(&document_id, &doc)?;
            println!(
                "{} imported {} ({} blocks) -> {}",
                "ok:".green().bold(),
                document_id,
                doc.block_count(),
                url
            );
        }

        Commands::Read { document_id } => {
            let doc = store.load(&document_id)?;
            println!(
                "{} ({} blocks, schema {})",
                doc.document_id.bold(),
                doc.block_count(),
                doc.schema_version
            );
            for block in doc.blocks_in_order() {
                let label = block.label().unwrap_or("-");
                let preview: String = block.content.chars().take(60).collect();
                println!(
                    "  [{:>3}] {} {:<10} {:<16} {}",
                    block.order,
                    block.block_id.dimmed(),
                    block.block_type.to_string(),
                    label,
                    preview
                );
            }
        }

        Commands::Json {
            document_id,
            compact,
        } => {
            let doc = store.load(&document_id)?;
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            println!("{}", render::to_json(&doc, format)?);
        }

        Commands::Edit {
            document_id,
            block_id,
            content,
            block_type,
            metadata,
        } => {
            let mut patch = BlockPatch::new();
            if let Some(content) = content {
                patch = patch.with_content(content);
            }
            if let Some(block_type) = block_type {
                patch = patch.with_type(BlockType::from(block_type.as_str()));
            }
            if let Some(metadata) = metadata {
                patch = patch.with_metadata_json(&metadata)?;
            }

            let mut doc = store.load(&document_id)?;
            mutate::edit_block(&mut doc, &block_id, &patch)?;
            store.save(&document_id, &doc)?;
            println!("{} block {} updated", "ok:".green().bold(), block_id);
        }

        Commands::Add {
            document_id,
            after_block_id,
            content,
            block_type,
            label,
        } => {
            let mut doc = store.load(&document_id)?;
            let new_id = mutate::add_block(
                &mut doc,
                &after_block_id,
                &content,
                BlockType::from(block_type.as_str()),
                &label,
            )?;
            store.save(&document_id, &doc)?;
            println!(
                "{} added {} after {}",
                "ok:".green().bold(),
                new_id,
                after_block_id
            );
        }

        Commands::Delete {
            document_id,
            block_id,
        } => {
            let mut doc = store.load(&document_id)?;
            mutate::delete_block(&mut doc, &block_id)?;
            store.save(&document_id, &doc)?;
            println!("{} block {} deleted", "ok:".green().bold(), block_id);
        }

        Commands::Export {
            document_id,
            output,
        } => {
            let doc = store.load(&document_id)?;
            let markdown = render::to_markdown(&doc);
            let url = backend.put_text(
                &markdown_export_path(&document_id),
                &markdown,
                "text/markdown",
            )?;
            match output {
                Some(path) => {
                    fs::write(&path, &markdown)?;
                    println!(
                        "{} exported to {} (stored at {})",
                        "ok:".green().bold(),
                        path.display(),
                        url
                    );
                }
                None => println!("{}", markdown),
            }
        }
    }

    Ok(())
}
