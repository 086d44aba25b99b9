//! Parser module — dispatch by file extension.

pub mod luadoc;
pub mod matcher;
pub mod merge;
pub mod validate;

use crate::model::Document;
use anyhow::{anyhow, Result};
use luadoc::ParseOptions;
use std::path::Path;

/// Whether `path` has a `.lua` extension (any case).
pub fn is_lua_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("lua"))
}

/// Parse a source file into a Document based on its extension.
pub fn parse_file(path: &Path, content: &str, options: &ParseOptions) -> Result<Document> {
    if is_lua_file(path) {
        Ok(luadoc::parse_with(content, options))
    } else {
        Err(anyhow!("unsupported file type: {}", path.display()))
    }
}
