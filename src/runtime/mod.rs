//! Runtime side of discovery: the live registry, loading and introspection.

pub mod introspect;
pub mod loader;
pub mod registry;

use crate::model::Member;
use registry::Registry;
use std::path::Path;

pub use loader::LoadError;

/// Scripting host that runs modules and exposes their live tables.
pub trait ModuleLoader {
    fn load(&mut self, path: &Path) -> Result<(), LoadError>;

    /// Copy everything reachable from each root into a fresh registry.
    fn snapshot(&self, roots: &[String]) -> Result<Registry, LoadError>;
}

/// Introspect every root in order.
pub fn introspect_all(registry: &Registry, roots: &[String]) -> Vec<Member> {
    roots
        .iter()
        .flat_map(|root| introspect::introspect(registry, root))
        .collect()
}
