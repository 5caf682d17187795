//! Rendering: pure projections of the block sequence to output formats.

mod json;
mod markdown;

pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
