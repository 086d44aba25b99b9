//! LuaDoc annotation parser — line-by-line state machine.
//!
//! Doc-comment lines accumulate into a pending object. A method or event
//! declaration names the object and arms a commit, which fires at the start
//! of the next line and files the object under the current class. Two blank
//! lines in a row also force a commit (unnamed objects are discarded).
//!
//! Classes are stored when the next `---@class` line arrives and at end of
//! input. An object still pending at end of input is dropped, so a
//! declaration on the very last line only survives if the input ends with
//! a newline.

use crate::model::*;
use crate::parser::matcher::{self, Annotation, MethodSig, ReturnShape};
use crate::parser::validate;
use std::collections::BTreeMap;

/// Knobs for a parse run.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub return_shape: ReturnShape,
    /// Cross-check @param tags against formal arguments of non-deprecated methods
    pub validate_signatures: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            return_shape: ReturnShape::Named,
            validate_signatures: true,
        }
    }
}

// -- Parser state -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectKind {
    Method { is_static: bool },
    Event,
}

struct ParserState<'o> {
    options: &'o ParseOptions,

    // Results
    classes: BTreeMap<String, ClassEntry>,
    advisories: Vec<SignatureReport>,

    current_class: Option<ClassEntry>,

    // Current object
    object: DocBlock,
    object_name: Option<String>,
    object_kind: Option<ObjectKind>,

    // Boundary tracking
    last_blank: bool,
    should_commit: bool,
}

impl<'o> ParserState<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            classes: BTreeMap::new(),
            advisories: Vec::new(),
            current_class: None,
            object: DocBlock::default(),
            object_name: None,
            object_kind: None,
            // Input behaves as if preceded by a blank line.
            last_blank: true,
            should_commit: false,
        }
    }
}

// -- Public API ---------------------------------------------------------------

/// Parse annotated Lua source with default options.
pub fn parse(input: &str) -> Document {
    parse_with(input, &ParseOptions::default())
}

/// Parse annotated Lua source into classes keyed by name.
pub fn parse_with(input: &str, options: &ParseOptions) -> Document {
    let mut state = ParserState::new(options);

    // A trailing newline yields a final empty line, which fires an armed commit.
    for line in input.split('\n') {
        process_line(&mut state, line);
    }

    if let Some(class) = state.current_class.take() {
        store_class(&mut state, class);
    }
    if let Some(name) = state.object_name.take() {
        log::debug!("dropping uncommitted object {} at end of input", name);
    }

    Document {
        classes: state.classes,
        advisories: state.advisories,
    }
}

// -- Line processing ----------------------------------------------------------

fn process_line(s: &mut ParserState, line: &str) {
    let line = line.trim();
    let blank = line.is_empty();

    // 1. Double blank line closes the current block
    if blank && s.last_blank {
        s.should_commit = true;
    }

    // 2. Commit armed by the previous line (or by the boundary above)
    if s.should_commit {
        commit(s);
    }

    // 3..11. First matching recognizer wins
    if let Some(annotation) = matcher::classify(line, s.options.return_shape) {
        apply(s, annotation);
    }

    // 12.
    s.last_blank = blank;
}

fn apply(s: &mut ParserState, annotation: Annotation) {
    match annotation {
        Annotation::Class(name) => {
            if let Some(previous) = s.current_class.replace(ClassEntry::new(name)) {
                store_class(s, previous);
            }
        }
        Annotation::Parent(parent) => match s.current_class.as_mut() {
            Some(class) => class.parent = Some(parent),
            None => log::debug!("parent {} outside of any class", parent),
        },
        Annotation::Method(sig) => declare_method(s, sig),
        Annotation::Event(name) => {
            s.object_name = Some(name);
            s.object_kind = Some(ObjectKind::Event);
            s.should_commit = true;
        }
        Annotation::Param(param) => s.object.params.push(param),
        Annotation::Return(ret) => s.object.returns.push(ret),
        Annotation::Deprecated(text) => {
            s.object.deprecated = Some(true);
            if let Some(text) = text {
                append_description(&mut s.object.description, &text);
            }
        }
        Annotation::Comment(text) => append_description(&mut s.object.description, &text),
    }
}

fn declare_method(s: &mut ParserState, sig: MethodSig) {
    if s.options.validate_signatures && !s.object.is_deprecated() {
        let report = validate::validate(&sig.name, &sig.args, &s.object);
        if !report.is_complete() {
            s.advisories.push(report);
        }
    }

    s.object_name = Some(sig.name);
    s.object_kind = Some(ObjectKind::Method {
        is_static: sig.is_static,
    });
    s.should_commit = true;
}

/// File the current object under the current class and reset it.
/// Without a class, name and kind the object is dropped.
fn commit(s: &mut ParserState) {
    let doc = std::mem::take(&mut s.object);
    let name = s.object_name.take();
    let kind = s.object_kind.take();
    s.should_commit = false;

    let (Some(class), Some(name), Some(kind)) = (s.current_class.as_mut(), name, kind) else {
        return;
    };

    match kind {
        ObjectKind::Method { is_static } => {
            class.methods.insert(name, MethodEntry { is_static, doc });
        }
        ObjectKind::Event => {
            class.events.insert(name, EventEntry { doc });
        }
    }
}

fn store_class(s: &mut ParserState, class: ClassEntry) {
    log::debug!(
        "class {}: {} method(s), {} event(s)",
        class.name,
        class.methods.len(),
        class.events.len()
    );
    s.classes.insert(class.name.clone(), class);
}

/// Join with a newline, then trim the whole description.
fn append_description(dest: &mut String, text: &str) {
    let joined = format!("{}\n{}", dest, text);
    *dest = joined.trim().to_string();
}
