//! Static side of discovery: declaration scanning and comment blocks.

pub mod docblock;
pub mod signature;

use crate::model::Member;
use std::path::PathBuf;

/// Scan every candidate file in order. Files that cannot be read contribute nothing.
pub fn scan_all(files: &[PathBuf]) -> Vec<Member> {
    files
        .iter()
        .flat_map(|path| signature::scan_file(path))
        .collect()
}
