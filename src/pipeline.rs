//! Orchestrator: load → scan → introspect → merge → render → write.
//!
//! Every failure inside a run is isolated. Modules that fail to load are
//! still scanned, and a failed artifact write does not stop the others.

use crate::merge;
use crate::model::NamespaceGroup;
use crate::parser;
use crate::render;
use crate::runtime::registry::Registry;
use crate::runtime::{self, ModuleLoader};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Inputs of one run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Module file names, resolved against `base_dirs`
    pub modules: Vec<String>,
    pub base_dirs: Vec<PathBuf>,
    /// Extra source files, used as given
    pub files: Vec<PathBuf>,
    /// Namespace roots to introspect
    pub roots: Vec<String>,
    pub output_dir: PathBuf,
    /// Skip loading modules into the registry (static scan only)
    pub no_load: bool,
}

/// Outcome of one run.
#[derive(Debug)]
pub struct Report {
    pub written: usize,
    pub total: usize,
    pub namespaces: usize,
    pub members: usize,
    pub elapsed: Duration,
}

/// Resolve module names against the base directories (first existing wins),
/// then append explicit files. Duplicates (by canonical path) are dropped,
/// order is kept.
pub fn candidate_files(config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for module in &config.modules {
        let found = config
            .base_dirs
            .iter()
            .map(|dir| dir.join(module))
            .find(|path| path.is_file());
        match found {
            Some(path) => files.push(path),
            None => warn!(module = %module, "module not found in any base directory"),
        }
    }
    files.extend(config.files.iter().cloned());

    // `./a.lua` and `a.lua` are the same module
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|path| seen.insert(fs::canonicalize(path).unwrap_or_else(|_| path.clone())))
        .collect()
}

/// Run the whole pipeline once.
pub fn run(config: &Config, loader: &mut dyn ModuleLoader) -> Report {
    let started = Instant::now();
    let files = candidate_files(config);

    let registry = if config.no_load {
        Registry::new()
    } else {
        for path in &files {
            if let Err(e) = loader.load(path) {
                warn!("failed to load {}: {}", path.display(), e);
            }
        }
        loader.snapshot(&config.roots).unwrap_or_else(|e| {
            warn!("failed to read live namespaces: {}", e);
            Registry::new()
        })
    };

    // Static scanning does not depend on a successful load
    let discovered = parser::scan_all(&files);
    let live = runtime::introspect_all(&registry, &config.roots);
    debug!(
        files = files.len(),
        static_members = discovered.len(),
        runtime_members = live.len(),
        "discovery finished"
    );

    let groups = merge::merge(live, discovered);
    let members = groups.iter().map(|g| g.members.len()).sum();
    let (written, total) = write_artifacts(&config.output_dir, &groups);

    let report = Report {
        written,
        total,
        namespaces: groups.len(),
        members,
        elapsed: started.elapsed(),
    };
    info!(
        "wrote {}/{} artifacts for {} namespaces ({} members) in {:.2?}",
        report.written, report.total, report.namespaces, report.members, report.elapsed
    );
    report
}

/// Render and write every artifact; returns (written, attempted).
fn write_artifacts(output_dir: &Path, groups: &[NamespaceGroup]) -> (usize, usize) {
    if let Err(e) = fs::create_dir_all(output_dir) {
        error!(
            "failed to create output directory {}: {}",
            output_dir.display(),
            e
        );
    }

    let renderers = render::renderers();
    let mut written = 0;
    for renderer in &renderers {
        let path = output_dir.join(renderer.file_name());
        match write_one(&path, &renderer.render(groups)) {
            Ok(()) => written += 1,
            Err(e) => error!("{:#}", e),
        }
    }
    (written, renderers.len())
}

fn write_one(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
