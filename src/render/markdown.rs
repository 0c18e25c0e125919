//! GitHub-flavored markdown renderer — the human-readable API reference.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, groups: &[NamespaceGroup]) -> String {
        let mut output = String::from("# API Reference\n\n");

        if !groups.is_empty() {
            output.push_str("## Index\n\n");
            for group in groups {
                output.push_str(&toc::render_toc_item(&group.namespace));
                output.push('\n');
            }
            output.push('\n');
        }

        for group in groups {
            output.push_str(&format!("## {}\n\n", group.namespace));
            for member in &group.members {
                output.push_str(&render_member(member));
                output.push('\n');
            }
        }

        output
    }

    fn file_name(&self) -> &str {
        "agi_api.md"
    }
}

/// Render a single member's documentation block.
fn render_member(member: &Member) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### `{}`\n", signature(member)));

    if let Some(ref doc) = member.doc {
        if !doc.brief.is_empty() {
            lines.push(doc.brief.clone());
            lines.push(String::new());
        }

        if !doc.params.is_empty() {
            lines.push("#### Parameters\n".to_string());
            for p in &doc.params {
                lines.push(with_description(
                    format!("* **{}** (`{}`)", p.name, p.ty),
                    &p.description,
                ));
            }
            lines.push(String::new());
        }

        if !doc.returns.is_empty() {
            lines.push("#### Returns\n".to_string());
            for r in &doc.returns {
                lines.push(with_description(format!("* `{}`", r.ty), &r.description));
            }
            lines.push(String::new());
        }
    }

    if let Some(location) = member.location() {
        lines.push(format!("_Defined in {}_", location));
        lines.push(String::new());
    }

    lines.join("\n")
}

/// `name(args)` for functions, `name = value` for constants.
fn signature(member: &Member) -> String {
    match member.kind {
        MemberKind::Function => format!("{}({})", member.fqn, member.args),
        MemberKind::Constant => format!(
            "{} = {}",
            member.fqn,
            member.value.as_deref().unwrap_or("nil")
        ),
    }
}

fn with_description(term: String, description: &str) -> String {
    if description.is_empty() {
        term
    } else {
        format!("{}: {}", term, description)
    }
}
