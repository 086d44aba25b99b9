//! GitHub-flavored markdown renderer.
//!
//! One section per class: parent, methods (`Class.name` for static,
//! `Class:name` for instance), events, then the globals table.

use crate::codex::Codex;
use crate::model::*;
use crate::render::toc;
use crate::render::Renderer;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, codex: &Codex) -> Result<String> {
        let mut output = String::from("# Codex\n\n");

        if !codex.classes.is_empty() {
            output.push_str("## Index\n\n");
            for name in codex.classes.keys() {
                output.push_str(&toc::render_toc_item(name));
                output.push('\n');
            }
            output.push('\n');
        }

        for (name, class) in &codex.classes {
            output.push_str(&render_class(name, class));
            output.push('\n');
        }

        if !codex.globals.is_empty() {
            output.push_str("## Globals\n\n");
            output.push_str("| Name | Type |\n| --- | --- |\n");
            for (name, global) in &codex.globals {
                output.push_str(&format!("| `{}` | {} |\n", name, global.ty));
            }
        }

        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_class(name: &str, class: &ClassEntry) -> String {
    let mut lines: Vec<String> = vec![format!("## {}\n", name)];

    if let Some(ref parent) = class.parent {
        lines.push(format!("> Extends `{}`\n", parent));
    }

    if !class.methods.is_empty() {
        lines.push("### Methods\n".to_string());
        for (method_name, method) in &class.methods {
            let sep = if method.is_static { '.' } else { ':' };
            lines.push(format!("#### {}{}{}\n", name, sep, method_name));
            render_doc(&mut lines, &method.doc);
        }
    }

    if !class.events.is_empty() {
        lines.push("### Events\n".to_string());
        for (event_name, event) in &class.events {
            lines.push(format!("#### {}\n", event_name));
            render_doc(&mut lines, &event.doc);
        }
    }

    lines.join("\n")
}

fn render_doc(lines: &mut Vec<String>, doc: &DocBlock) {
    if doc.is_deprecated() {
        lines.push("_Deprecated._\n".to_string());
    }

    if !doc.description.is_empty() {
        lines.push(doc.description.clone());
        lines.push(String::new());
    }

    if !doc.params.is_empty() {
        lines.push("**Parameters**\n".to_string());
        for param in &doc.params {
            lines.push(format!("* {}", render_param(param)));
        }
        lines.push(String::new());
    }

    if !doc.returns.is_empty() {
        lines.push("**Returns**\n".to_string());
        for ret in &doc.returns {
            lines.push(format!("* {}", render_return(ret)));
        }
        lines.push(String::new());
    }
}

// -- Style transforms ---------------------------------------------------------

/// `x number the x value` → `**x** (number): the x value`
fn render_param(param: &ParamEntry) -> String {
    let mut out = format!("**{}**", param.name);
    if !param.ty.is_empty() {
        out.push_str(&format!(" ({})", param.ty));
    }
    if !param.description.is_empty() {
        out.push_str(&format!(": {}", param.description));
    }
    out
}

/// `boolean success done` → `(boolean) **success**: done`
fn render_return(ret: &ReturnEntry) -> String {
    let mut out = format!("({})", ret.ty);
    if let Some(ref name) = ret.name {
        if !name.is_empty() {
            out.push_str(&format!(" **{}**", name));
        }
    }
    if !ret.description.is_empty() {
        out.push_str(&format!(": {}", ret.description));
    }
    out
}
