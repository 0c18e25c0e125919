//! Static signature scanner — finds namespaced function declarations.
//!
//! Two productions are recognized, one per line:
//!
//! 1. `function <ns-path>.<name>(<args>)`
//! 2. `<ns-path>.<name> = function(<args>)`
//!
//! `<ns-path>` is one or more dot-separated identifiers. The argument text is
//! kept verbatim (trimmed), never split into parameter names.

use crate::model::{Member, Source};
use crate::parser::docblock;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_FUNCTION_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:blank:]]*function[[:blank:]]+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\.([A-Za-z_]\w*)[[:blank:]]*\(([^)]*)\)")
        .unwrap()
});

static RE_FUNCTION_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:blank:]]*([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\.([A-Za-z_]\w*)[[:blank:]]*=[[:blank:]]*function[[:blank:]]*\(([^)]*)\)")
        .unwrap()
});

/// A declaration matched on a single line.
#[derive(Debug, PartialEq, Eq)]
pub struct Declaration<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub args: &'a str,
}

/// Match one line against both productions.
pub fn match_declaration(line: &str) -> Option<Declaration<'_>> {
    let caps = RE_FUNCTION_STMT
        .captures(line)
        .or_else(|| RE_FUNCTION_ASSIGN.captures(line))?;
    Some(Declaration {
        namespace: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str(),
        args: caps.get(3)?.as_str().trim(),
    })
}

/// Scan a file on disk. Missing or unreadable files yield no declarations.
pub fn scan_file(path: &Path) -> Vec<Member> {
    match fs::read_to_string(path) {
        Ok(content) => scan_source(&path.to_string_lossy(), &content),
        Err(_) => Vec::new(),
    }
}

/// Scan source text, attaching the comment block above every declaration.
pub fn scan_source(file: &str, content: &str) -> Vec<Member> {
    // `lines()` accepts both `\n` and `\r\n` and keeps an unterminated last line
    let lines: Vec<&str> = content.lines().collect();
    let mut members = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(decl) = match_declaration(line) else {
            continue;
        };
        let line_no = idx + 1;
        let mut member = Member::function(decl.namespace, decl.name);
        member.args = decl.args.to_string();
        member.source = Source::File(file.to_string());
        member.line = Some(line_no);
        member.doc = Some(docblock::parse(&lines, line_no));
        members.push(member);
    }

    members
}
