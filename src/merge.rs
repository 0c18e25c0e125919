//! Identity merge: combine runtime and static discoveries by fully-qualified name.
//!
//! Runtime discoveries seed the result, so everything that exists live is
//! documented even without a source declaration. Static discoveries are then
//! overlaid since they are the only source of argument names and doc blocks.

use crate::model::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Merge both discovery sets and group the result by namespace.
///
/// Namespaces come out sorted, members within a namespace sorted by
/// fully-qualified name.
pub fn merge(runtime: Vec<Member>, discovered: Vec<Member>) -> Vec<NamespaceGroup> {
    let mut members: HashMap<String, Member> = HashMap::new();

    for member in runtime {
        members.insert(member.fqn.clone(), member);
    }

    let mut seen_static: HashSet<String> = HashSet::new();
    for member in discovered {
        if !seen_static.insert(member.fqn.clone()) {
            // Later declarations win
            debug!(name = %member.fqn, "duplicate static declaration");
        }
        match members.get_mut(&member.fqn) {
            Some(existing) => overlay(existing, member),
            None => {
                members.insert(member.fqn.clone(), member);
            }
        }
    }

    group(members.into_values())
}

/// Apply a static discovery on top of an existing member.
fn overlay(existing: &mut Member, from_source: Member) {
    if !from_source.args.is_empty() {
        existing.args = from_source.args;
    }
    existing.doc = from_source.doc;
    if from_source.line.is_some() {
        existing.line = from_source.line;
    }
    if let Source::File(_) = from_source.source {
        existing.source = from_source.source;
    }
}

/// Group members by their namespace field.
pub fn group(members: impl IntoIterator<Item = Member>) -> Vec<NamespaceGroup> {
    let mut groups: BTreeMap<String, Vec<Member>> = BTreeMap::new();
    for member in members {
        groups
            .entry(member.namespace.clone())
            .or_default()
            .push(member);
    }

    groups
        .into_iter()
        .map(|(namespace, mut members)| {
            members.sort_by(|a, b| a.fqn.cmp(&b.fqn));
            NamespaceGroup { namespace, members }
        })
        .collect()
}
