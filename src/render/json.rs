//! JSON renderer — the codex format consumed by editor tooling.

use crate::codex::Codex;
use crate::render::Renderer;
use anyhow::{Context, Result};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, codex: &Codex) -> Result<String> {
        let mut out = serde_json::to_string_pretty(codex).context("failed to serialize codex")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
