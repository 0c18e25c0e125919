//! Comment-block parser — recovers the doc block above a declaration.
//!
//! Reads upward from the declaration line over contiguous `--` comment lines:
//!
//! ```lua
//! -- Creates a new dimension.
//! -- @param params table Dimension settings
//! -- @return Dimension the created dimension
//! function AGI.Physics.CreateDimension(params)
//! ```

use crate::model::{DocBlock, ParamDoc, ReturnDoc};
use regex::Regex;
use std::sync::LazyLock;

// `--` and EmmyLua's `---` are the same marker; one following space belongs to it.
static RE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*-{2,} ?(.*)$").unwrap());

static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@param[[:blank:]]+([\w.]+\??)[[:blank:]]+([\w.\[\]|?]+)[[:blank:]]*(.*)$").unwrap()
});

static RE_RETURN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@returns?[[:blank:]]+([\w.\[\]|?]+)[[:blank:]]*(.*)$").unwrap()
});

/// Parse the comment block preceding the 1-based `line` in `lines`.
///
/// Stops at the first non-comment line (blank lines included) or at the top
/// of the buffer. Never fails: no comments yields an empty block, malformed
/// `@param`/`@return` lines are dropped.
pub fn parse(lines: &[&str], line: usize) -> DocBlock {
    let mut brief: Vec<String> = Vec::new();
    let mut params: Vec<ParamDoc> = Vec::new();
    let mut returns: Vec<ReturnDoc> = Vec::new();

    // Lines above the declaration, nearest first
    let start = line.saturating_sub(1).min(lines.len());
    for raw in lines[..start].iter().rev() {
        let Some(caps) = RE_COMMENT.captures(raw) else {
            break;
        };
        let text = caps[1].trim_end();

        if text.starts_with("@param") {
            if let Some(p) = RE_PARAM.captures(text) {
                params.insert(
                    0,
                    ParamDoc {
                        name: p[1].to_string(),
                        ty: p[2].to_string(),
                        description: p[3].trim().to_string(),
                    },
                );
            }
            continue;
        }

        if text.starts_with("@return") {
            if let Some(r) = RE_RETURN.captures(text) {
                returns.insert(
                    0,
                    ReturnDoc {
                        ty: r[1].to_string(),
                        description: r[2].trim().to_string(),
                    },
                );
            }
            continue;
        }

        brief.insert(0, text.to_string());
    }

    DocBlock {
        brief: brief.join("\n").trim().to_string(),
        params,
        returns,
    }
}
