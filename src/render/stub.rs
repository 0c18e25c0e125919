//! EmmyLua stub renderer — declarations for editor auto-completion.
//!
//! The output is never executed; function bodies are empty.

use crate::model::*;
use crate::render::Renderer;

pub struct StubRenderer;

impl Renderer for StubRenderer {
    fn render(&self, groups: &[NamespaceGroup]) -> String {
        let mut out = String::from("---@meta\n\n");
        for group in groups {
            out.push_str(&format!("---@class {}\n", group.namespace));
            out.push_str(&format!("{} = {{}}\n\n", group.namespace));

            for member in &group.members {
                if member.kind != MemberKind::Function {
                    continue;
                }
                let Some(ref doc) = member.doc else {
                    continue;
                };
                for line in doc.brief.lines() {
                    if line.is_empty() {
                        out.push_str("---\n");
                    } else {
                        out.push_str(&format!("--- {}\n", line));
                    }
                }
                for p in &doc.params {
                    out.push_str(&annotation(
                        "param",
                        &[p.name.as_str(), p.ty.as_str(), p.description.as_str()],
                    ));
                }
                for r in &doc.returns {
                    out.push_str(&annotation(
                        "return",
                        &[r.ty.as_str(), r.description.as_str()],
                    ));
                }
                out.push_str(&format!(
                    "function {}.{}({}) end\n\n",
                    member.namespace, member.name, member.args
                ));
            }
        }
        out
    }

    fn file_name(&self) -> &str {
        "agi_emmy.lua"
    }
}

/// `---@tag part part ...`, skipping empty trailing parts.
fn annotation(tag: &str, parts: &[&str]) -> String {
    let words: Vec<&str> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
    format!("---@{} {}\n", tag, words.join(" "))
}
