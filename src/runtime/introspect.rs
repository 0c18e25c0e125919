//! Runtime introspector — enumerates what actually exists under a root.

use crate::model::{Member, Source};
use crate::runtime::registry::{Key, Registry, TableId, Value};
use std::collections::HashSet;

/// A table slot classified once, at discovery time.
#[derive(Debug, PartialEq)]
pub enum Entry {
    Function(Source),
    Constant(String),
    Nested(TableId),
    Opaque,
}

/// Classify a value by shape.
pub fn classify(value: &Value) -> Entry {
    match value {
        Value::Function(Some(origin)) => Entry::Function(Source::File(origin.file.clone())),
        Value::Function(None) => Entry::Function(Source::Native),
        Value::Table(id) => Entry::Nested(*id),
        other => match other.render() {
            Some(text) => Entry::Constant(text),
            None => Entry::Opaque,
        },
    }
}

/// Walk the table named `root` (dotted paths allowed) and report every
/// function and constant reachable from it.
///
/// A missing or non-table root yields nothing. Each table is entered at most
/// once, so aliased and cyclic tables terminate.
pub fn introspect(registry: &Registry, root: &str) -> Vec<Member> {
    let mut found = Vec::new();
    if let Some(Value::Table(id)) = registry.lookup(root) {
        let mut visited = HashSet::new();
        walk(registry, *id, root, &mut visited, &mut found);
    }
    found
}

fn walk(
    registry: &Registry,
    id: TableId,
    path: &str,
    visited: &mut HashSet<TableId>,
    found: &mut Vec<Member>,
) {
    if !visited.insert(id) {
        return;
    }

    for (key, value) in registry.table(id).iter() {
        // Array positions are list contents, not named members
        if key.is_numeric() {
            continue;
        }
        let Key::Str(name) = key else {
            continue;
        };

        match classify(value) {
            Entry::Function(source) => {
                let mut member = Member::function(path, name);
                if let Value::Function(Some(origin)) = value {
                    member.line = Some(origin.line);
                }
                member.source = source;
                found.push(member);
            }
            Entry::Constant(text) => found.push(Member::constant(path, name, text)),
            Entry::Nested(child) => {
                let child_path = format!("{}.{}", path, name);
                walk(registry, child, &child_path, visited, found);
            }
            Entry::Opaque => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberKind;
    use crate::runtime::registry::Origin;

    fn agi() -> (Registry, TableId, TableId, TableId) {
        let mut reg = Registry::new();
        let agi = reg.new_table();
        let physics = reg.new_table();
        let forge = reg.new_table();
        reg.set(reg.globals(), "AGI", Value::Table(agi));
        reg.set(agi, "Physics", Value::Table(physics));
        reg.set(agi, "Forge", Value::Table(forge));
        (reg, agi, physics, forge)
    }

    fn fqns(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.fqn.as_str()).collect()
    }

    #[test]
    fn functions_and_constants() {
        let (mut reg, _, physics, forge) = agi();
        reg.set(
            physics,
            "CreateDimension",
            Value::Function(Some(Origin {
                file: "physics.lua".to_string(),
                line: 7,
            })),
        );
        reg.set(forge, "MAX_BUDGET", Value::Integer(100));
        reg.set(forge, "Native", Value::Function(None));

        let found = introspect(&reg, "AGI");
        assert_eq!(
            fqns(&found),
            [
                "AGI.Forge.MAX_BUDGET",
                "AGI.Forge.Native",
                "AGI.Physics.CreateDimension"
            ]
        );

        let budget = &found[0];
        assert_eq!(budget.kind, MemberKind::Constant);
        assert_eq!(budget.namespace, "AGI.Forge");
        assert_eq!(budget.value.as_deref(), Some("100"));

        assert_eq!(found[1].source, Source::Native);
        assert_eq!(found[1].line, None);

        let create = &found[2];
        assert_eq!(create.kind, MemberKind::Function);
        assert_eq!(create.args, "");
        assert_eq!(create.source, Source::File("physics.lua".to_string()));
        assert_eq!(create.line, Some(7));
        assert!(create.doc.is_none());
    }

    #[test]
    fn numeric_keys_are_skipped() {
        let (mut reg, agi, _, _) = agi();
        let list = reg.new_table();
        reg.set(agi, "Presets", Value::Table(list));
        reg.set(list, 1i64, Value::String("low".to_string()));
        reg.set(list, "2", Value::String("high".to_string()));
        let nested = reg.new_table();
        reg.set(agi, 1i64, Value::Table(nested));
        reg.set(nested, "hidden", Value::Integer(1));
        reg.set(agi, "7", Value::Integer(7));

        assert!(introspect(&reg, "AGI").is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let (mut reg, agi, physics, _) = agi();
        reg.set(physics, "Root", Value::Table(agi));
        reg.set(physics, "Self", Value::Table(physics));
        reg.set(physics, "G", Value::Float(9.81));

        let found = introspect(&reg, "AGI");
        assert_eq!(fqns(&found), ["AGI.Physics.G"]);
    }

    #[test]
    fn shared_table_is_reported_once() {
        let (mut reg, agi, physics, _) = agi();
        reg.set(physics, "Step", Value::Function(None));
        reg.set(agi, "Alias", Value::Table(physics));

        let found = introspect(&reg, "AGI");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn opaque_values_skipped() {
        let (mut reg, agi, _, _) = agi();
        reg.set(agi, "Handle", Value::Opaque);
        assert!(introspect(&reg, "AGI").is_empty());
    }

    #[test]
    fn missing_and_non_table_roots() {
        let (mut reg, _, _, _) = agi();
        reg.set(reg.globals(), "VERSION", Value::Integer(3));
        assert!(introspect(&reg, "Nope").is_empty());
        assert!(introspect(&reg, "VERSION").is_empty());
    }

    #[test]
    fn dotted_root() {
        let (mut reg, _, physics, _) = agi();
        reg.set(physics, "Step", Value::Function(None));
        let found = introspect(&reg, "AGI.Physics");
        assert_eq!(fqns(&found), ["AGI.Physics.Step"]);
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(classify(&Value::Boolean(false)), Entry::Constant("false".to_string()));
        assert_eq!(classify(&Value::Opaque), Entry::Opaque);
        assert_eq!(classify(&Value::Function(None)), Entry::Function(Source::Native));
    }
}
