//! Line recognizers for LuaDoc annotations and Lua declarations.
//!
//! Each recognizer maps one trimmed line to an [`Annotation`] or `None`.
//! [`RULES`] fixes the trial order; the generic `---` comment matches any
//! doc-comment line, so it must stay last.

use crate::model::{ParamEntry, ReturnEntry};

/// Doc-comment prefix (Lua triple dash).
const DOC_PREFIX: &str = "---";

/// Typed capture of a recognized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// `---@class Name`
    Class(String),
    /// `self = Parent()` or `local self = Parent()`
    Parent(String),
    /// `function self.name(args)` / `function self:name(args)`
    Method(MethodSig),
    /// `self.name = Event:new()`
    Event(String),
    /// `---@param name type description...`
    Param(ParamEntry),
    /// `---@return type [name] description...`
    Return(ReturnEntry),
    /// `---@deprecated [text]`
    Deprecated(Option<String>),
    /// Any other `---` line
    Comment(String),
}

/// Captured method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    /// Formal argument names, trimmed, empties dropped
    pub args: Vec<String>,
    pub is_static: bool,
}

/// How `@return` remainders are split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnShape {
    /// `type name description...`
    #[default]
    Named,
    /// `type description...`, no name field
    Folded,
}

/// A named recognizer in the dispatch table.
pub struct Rule {
    pub name: &'static str,
    recognize: fn(&str, ReturnShape) -> Option<Annotation>,
}

impl Rule {
    pub fn recognize(&self, line: &str, shape: ReturnShape) -> Option<Annotation> {
        (self.recognize)(line, shape)
    }
}

/// Recognizers in priority order. First match wins.
pub static RULES: [Rule; 9] = [
    Rule { name: "class", recognize: rule_class },
    Rule { name: "parent", recognize: rule_parent },
    Rule { name: "static-method", recognize: rule_static_method },
    Rule { name: "instance-method", recognize: rule_instance_method },
    Rule { name: "event", recognize: rule_event },
    Rule { name: "param", recognize: rule_param },
    Rule { name: "return", recognize: rule_return },
    Rule { name: "deprecated", recognize: rule_deprecated },
    Rule { name: "comment", recognize: rule_comment },
];

/// Run the rule table against a line.
pub fn classify(line: &str, shape: ReturnShape) -> Option<Annotation> {
    RULES.iter().find_map(|rule| rule.recognize(line, shape))
}

// -- Rule adapters ------------------------------------------------------------

fn rule_class(line: &str, _: ReturnShape) -> Option<Annotation> {
    class_decl(line).map(Annotation::Class)
}

fn rule_parent(line: &str, _: ReturnShape) -> Option<Annotation> {
    parent_marker(line).map(Annotation::Parent)
}

fn rule_static_method(line: &str, _: ReturnShape) -> Option<Annotation> {
    method_sig(line)
        .filter(|sig| sig.is_static)
        .map(Annotation::Method)
}

fn rule_instance_method(line: &str, _: ReturnShape) -> Option<Annotation> {
    method_sig(line)
        .filter(|sig| !sig.is_static)
        .map(Annotation::Method)
}

fn rule_event(line: &str, _: ReturnShape) -> Option<Annotation> {
    event_decl(line).map(Annotation::Event)
}

fn rule_param(line: &str, _: ReturnShape) -> Option<Annotation> {
    param_tag(line).map(Annotation::Param)
}

fn rule_return(line: &str, shape: ReturnShape) -> Option<Annotation> {
    return_tag(line, shape).map(Annotation::Return)
}

fn rule_deprecated(line: &str, _: ReturnShape) -> Option<Annotation> {
    deprecated_tag(line).map(Annotation::Deprecated)
}

fn rule_comment(line: &str, _: ReturnShape) -> Option<Annotation> {
    comment(line).map(Annotation::Comment)
}

// -- Recognizers --------------------------------------------------------------

/// `---@class Name` → "Name"
pub fn class_decl(line: &str) -> Option<String> {
    tag(line, "class").map(|rest| rest.trim().to_string())
}

/// `[local] self = Parent(...)` → "Parent"
pub fn parent_marker(line: &str) -> Option<String> {
    let line = line.trim_start();
    if line.starts_with("--") {
        return None;
    }
    let rest = keyword(line, "local").unwrap_or(line);
    let rest = strip_prefix_ci(rest, "self")?.trim_start();
    let rest = rest.strip_prefix('=')?;
    if rest.starts_with('=') {
        // `self == x` is a comparison
        return None;
    }
    let (expr, call) = rest.split_once('(')?;
    if !call.contains(')') {
        return None;
    }
    let expr = expr.trim();
    (!expr.is_empty()).then(|| expr.to_string())
}

/// `function self.name(a, b)` (static) or `function self:name(a, b)` (instance)
pub fn method_sig(line: &str) -> Option<MethodSig> {
    let rest = strip_prefix_ci(line.trim_start(), "function")?.trim_start();
    let rest = strip_prefix_ci(rest, "self")?;
    let (is_static, rest) = match rest.strip_prefix('.') {
        Some(rest) => (true, rest),
        None => (false, rest.strip_prefix(':')?),
    };
    let (name, rest) = rest.split_once('(')?;
    let (args, _) = rest.split_once(')')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(MethodSig {
        name: name.to_string(),
        args: split_args(args),
        is_static,
    })
}

/// `self.onClick = Event:new()` → "onClick"
pub fn event_decl(line: &str) -> Option<String> {
    let rest = strip_prefix_ci(line.trim_start(), "self.")?;
    let (name, value) = rest.split_once('=')?;
    strip_prefix_ci(value.trim_start(), "Event:new")?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// `---@param name type description...`
pub fn param_tag(line: &str) -> Option<ParamEntry> {
    let rest = tag(line, "param")?;
    let mut tokens = rest.split(' ');
    let name = tokens.next().unwrap_or_default().to_string();
    let ty = tokens.next().unwrap_or_default().to_string();
    let description = tokens.collect::<Vec<_>>().join(" ");
    Some(ParamEntry {
        name,
        ty,
        description,
    })
}

/// `---@return type [name] description...`, split according to `shape`.
pub fn return_tag(line: &str, shape: ReturnShape) -> Option<ReturnEntry> {
    let rest = tag(line, "return")?;
    let mut tokens = rest.split(' ');
    let ty = tokens.next().unwrap_or_default().to_string();
    let name = match shape {
        ReturnShape::Named => tokens.next().map(str::to_string),
        ReturnShape::Folded => None,
    };
    let description = tokens.collect::<Vec<_>>().join(" ");
    Some(ReturnEntry {
        ty,
        name,
        description,
    })
}

/// `---@deprecated [text]` → trailing text, if any
pub fn deprecated_tag(line: &str) -> Option<Option<String>> {
    let rest = tag(line, "deprecated")?.trim_end();
    Some((!rest.is_empty()).then(|| rest.to_string()))
}

/// Any `---` line → text after the prefix
pub fn comment(line: &str) -> Option<String> {
    doc_body(line).map(|rest| rest.trim_start().to_string())
}

// -- Helpers ------------------------------------------------------------------

/// Text after the `---` prefix.
fn doc_body(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix(DOC_PREFIX)
}

/// Remainder after `--- @marker`, leading whitespace removed.
/// The marker must end at whitespace or end of line.
fn tag<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let body = doc_body(line)?.trim_start().strip_prefix('@')?;
    let rest = strip_prefix_ci(body, marker)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

/// Strip a keyword that must be followed by whitespace.
fn keyword<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = strip_prefix_ci(s, word)?;
    rest.starts_with(char::is_whitespace)
        .then(|| rest.trim_start())
}

/// ASCII case-insensitive `strip_prefix`.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Split a raw argument list on commas, trimming and dropping empties.
fn split_args(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}
