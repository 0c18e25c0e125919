//! agidoc — generate API documentation for the AGI scripting namespaces.
//!
//! Combines two views of the same API: a static scan of the module sources
//! (argument names, `--` doc comments) and the live namespace tables after
//! loading those modules (everything that actually exists). Writes
//! `agi_api.json`, `agi_api.md` and `agi_emmy.lua` to the output directory.

mod merge;
mod model;
mod parser;
mod pipeline;
mod render;
mod runtime;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Modules shipped with the plugin, in load order.
const DEFAULT_MODULES: &[&str] = &[
    "agi_core.lua",
    "agi_physics.lua",
    "agi_forge.lua",
    "agi_dimension.lua",
];

/// Directories searched for the default modules.
const DEFAULT_BASE_DIRS: &[&str] = &[".", "lua", "scripts"];

#[derive(Parser)]
#[command(
    name = "agidoc",
    about = "Generate API documentation from AGI script modules and their live namespaces"
)]
struct Cli {
    /// Extra source files, directories or glob patterns to scan
    files: Vec<String>,

    /// Module file name to resolve against the base directories (repeatable).
    /// Defaults to the built-in module list when no files are given.
    #[arg(short = 'm', long = "module")]
    modules: Vec<String>,

    /// Base directory tried for each module, first match wins (repeatable)
    #[arg(short = 'b', long = "base-dir")]
    base_dirs: Vec<PathBuf>,

    /// Namespace root to introspect (repeatable)
    #[arg(short = 'r', long = "root", default_value = "AGI")]
    roots: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "agi_docs")]
    output: PathBuf,

    /// Scan sources only; do not load modules into the namespace registry
    #[arg(long)]
    no_load: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    let config = build_config(&cli)?;
    pipeline::run(&config, &mut runtime::loader::LuaLoader::new());
    Ok(())
}

fn build_config(cli: &Cli) -> Result<pipeline::Config> {
    let modules = if cli.modules.is_empty() && cli.files.is_empty() {
        DEFAULT_MODULES.iter().map(|m| m.to_string()).collect()
    } else {
        cli.modules.clone()
    };
    let base_dirs = if cli.base_dirs.is_empty() {
        DEFAULT_BASE_DIRS.iter().map(|d| PathBuf::from(*d)).collect()
    } else {
        cli.base_dirs.clone()
    };

    Ok(pipeline::Config {
        modules,
        base_dirs,
        files: expand_globs(&cli.files)?,
        roots: cli.roots.clone(),
        output_dir: cli.output.clone(),
        no_load: cli.no_load,
    })
}

/// File extensions recognized as script modules.
const SUPPORTED_EXTENSIONS: &[&str] = &["lua"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_supported_extension(p))
                .collect();
            // Sort for deterministic load order
            found.sort();
            files.extend(found);
            continue;
        }
        // Try as glob
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
