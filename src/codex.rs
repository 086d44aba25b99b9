//! Codex assembly: parsed classes plus supplementary data.
//!
//! The supplement is merged AFTER parsing, so anything it defines overrides
//! the parsed tree for the same key.

use crate::model::{ClassEntry, Document};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scripting global and the class it is an instance of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEntry {
    #[serde(rename = "type")]
    pub ty: String,
}

impl GlobalEntry {
    pub fn of(ty: &str) -> Self {
        Self { ty: ty.to_string() }
    }
}

/// Externally supplied entries merged over the parsed tree.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Supplement {
    #[serde(default)]
    pub classes: BTreeMap<String, ClassEntry>,
    #[serde(default)]
    pub globals: BTreeMap<String, GlobalEntry>,
}

impl Supplement {
    /// Globals every programming board exposes.
    pub fn builtin() -> Self {
        let globals = [
            ("library", "Library"),
            ("system", "System"),
            ("unit", "ControlUnit"),
            ("player", "Player"),
            ("construct", "Construct"),
            ("DULibrary", "Library"),
            ("DUSystem", "System"),
            ("DUPlayer", "Player"),
            ("DUConstruct", "Construct"),
        ]
        .into_iter()
        .map(|(name, ty)| (name.to_string(), GlobalEntry::of(ty)))
        .collect();

        Self {
            classes: BTreeMap::new(),
            globals,
        }
    }

    /// Load a supplement from its JSON form (`{"classes": {...}, "globals": {...}}`).
    pub fn from_json(text: &str) -> Result<Self> {
        let mut supplement: Supplement =
            serde_json::from_str(text).context("invalid supplement JSON")?;
        for (name, class) in &mut supplement.classes {
            class.name = name.clone();
        }
        Ok(supplement)
    }

    /// Overlay `other` on top of this supplement, key by key.
    pub fn extend(&mut self, other: Supplement) {
        self.classes.extend(other.classes);
        self.globals.extend(other.globals);
    }
}

/// The final merged tree written to disk.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Codex {
    pub classes: BTreeMap<String, ClassEntry>,
    pub globals: BTreeMap<String, GlobalEntry>,
}

impl Codex {
    /// Parsed classes first, then supplement entries override by key.
    pub fn build(document: Document, supplement: Supplement) -> Self {
        let mut classes = document.classes;
        for (name, class) in supplement.classes {
            if classes.contains_key(&name) {
                log::info!("supplement overrides class {}", name);
            }
            classes.insert(name, class);
        }

        Codex {
            classes,
            globals: supplement.globals,
        }
    }
}
