//! luadoc — extract a structured API codex from LuaDoc-annotated Lua.
//!
//! The parser walks source text line by line, recognizing `---@class`,
//! `---@param`, `---@return`, `---@deprecated` and free-form `---` comments
//! plus the declarations they document (`function self.f()`,
//! `function self:f()`, `self.e = Event:new()`, `self = Parent()`).
//!
//! ```text
//! let doc = luadoc::parse(source);
//! let codex = luadoc::codex::Codex::build(doc, luadoc::codex::Supplement::builtin());
//! ```

pub mod codex;
pub mod model;
pub mod parser;
pub mod render;

pub use parser::luadoc::{parse, parse_with, ParseOptions};
