//! Data model for the extracted API tree — format-agnostic.
//!
//! Field names serialize to the codex JSON layout consumed by editor
//! tooling (`isMethodStatic`, optional `deprecated`, optional return `name`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of parsing a single source unit.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    /// Classes keyed by name
    pub classes: BTreeMap<String, ClassEntry>,
    /// Signature mismatches found while parsing (advisory only)
    pub advisories: Vec<SignatureReport>,
}

/// A single documented class.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Mapping key in the output; not repeated inside the entry.
    #[serde(skip)]
    pub name: String,
    /// `self = Parent()` inside the class body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default)]
    pub methods: BTreeMap<String, MethodEntry>,
    #[serde(default)]
    pub events: BTreeMap<String, EventEntry>,
}

impl ClassEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Annotations shared by methods and events.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocBlock {
    /// @deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Free-form comment lines, newline-joined
    #[serde(default)]
    pub description: String,
    /// @param entries in encounter order
    #[serde(default)]
    pub params: Vec<ParamEntry>,
    /// @return entries in encounter order
    #[serde(default)]
    pub returns: Vec<ReturnEntry>,
}

impl DocBlock {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// A documented method.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEntry {
    /// `function self.name()` is static, `function self:name()` is not
    #[serde(rename = "isMethodStatic")]
    pub is_static: bool,
    #[serde(flatten)]
    pub doc: DocBlock,
}

/// A documented event (`self.name = Event:new()`).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    #[serde(flatten)]
    pub doc: DocBlock,
}

/// Parsed @param entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamEntry {
    pub name: String,
    /// Empty when the tag carries no type
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub description: String,
}

/// Parsed @return entry.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnEntry {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Mismatch between a function's formal arguments and its @param tags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SignatureReport {
    pub function: String,
    /// Formal arguments without a @param tag
    pub missing_docs: Vec<String>,
    /// @param tags naming no formal argument
    pub missing_args: Vec<String>,
}

impl SignatureReport {
    /// True when every argument is documented and every tag names an argument.
    pub fn is_complete(&self) -> bool {
        self.missing_docs.is_empty() && self.missing_args.is_empty()
    }
}
