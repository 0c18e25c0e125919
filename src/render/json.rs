//! JSON renderer — structured index for tooling integration.
//!
//! The groups are lowered into registry tables and encoded by a generic
//! table encoder: a table whose keys are exactly `1..=n` becomes an array,
//! anything else an object with stringified keys. A table re-entered on the
//! current descent path is written as [`CYCLE_MARKER`].

use crate::model::*;
use crate::render::Renderer;
use crate::runtime::registry::{Key, Registry, TableId, Value};
use serde_json::{Map, Number, Value as Json};
use std::collections::HashSet;

pub const CYCLE_MARKER: &str = "<cycle>";

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, groups: &[NamespaceGroup]) -> String {
        let (registry, root) = lower(groups);
        format!("{:#}\n", encode(&registry, &root))
    }

    fn file_name(&self) -> &str {
        "agi_api.json"
    }
}

/// Encode a registry value as JSON.
pub fn encode(registry: &Registry, value: &Value) -> Json {
    let mut path = HashSet::new();
    encode_value(registry, value, &mut path)
}

fn encode_value(registry: &Registry, value: &Value, path: &mut HashSet<TableId>) -> Json {
    match value {
        Value::Nil => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
        Value::Function(_) => Json::String("<function>".to_string()),
        Value::Opaque => Json::String("<userdata>".to_string()),
        Value::Table(id) => {
            if !path.insert(*id) {
                return Json::String(CYCLE_MARKER.to_string());
            }
            let encoded = encode_table(registry, *id, path);
            path.remove(id);
            encoded
        }
    }
}

fn encode_table(registry: &Registry, id: TableId, path: &mut HashSet<TableId>) -> Json {
    let table = registry.table(id);
    if is_sequence(registry, id) {
        return Json::Array(
            table
                .iter()
                .map(|(_, v)| encode_value(registry, v, path))
                .collect(),
        );
    }
    let mut object = Map::new();
    for (key, v) in table.iter() {
        object.insert(key.to_string(), encode_value(registry, v, path));
    }
    Json::Object(object)
}

/// Keys are exactly the consecutive integers starting at 1.
fn is_sequence(registry: &Registry, id: TableId) -> bool {
    // Integer keys iterate first and in ascending order
    registry
        .table(id)
        .iter()
        .enumerate()
        .all(|(i, (key, _))| *key == Key::Int(i as i64 + 1))
}

/// Build the table tree describing every namespace group.
fn lower(groups: &[NamespaceGroup]) -> (Registry, Value) {
    let mut reg = Registry::new();
    let root = reg.new_table();
    for group in groups {
        let members = reg.new_table();
        for (i, member) in group.members.iter().enumerate() {
            let entry = lower_member(&mut reg, member);
            reg.set(members, i as i64 + 1, Value::Table(entry));
        }
        let ns = reg.new_table();
        reg.set(ns, "namespace", Value::String(group.namespace.clone()));
        reg.set(ns, "members", Value::Table(members));
        reg.set(root, group.namespace.as_str(), Value::Table(ns));
    }
    (reg, Value::Table(root))
}

fn lower_member(reg: &mut Registry, member: &Member) -> TableId {
    let t = reg.new_table();
    reg.set(t, "fqn", Value::String(member.fqn.clone()));
    reg.set(t, "namespace", Value::String(member.namespace.clone()));
    reg.set(t, "name", Value::String(member.name.clone()));
    reg.set(t, "kind", Value::String(member.kind.as_str().to_string()));

    match member.kind {
        MemberKind::Function => reg.set(t, "args", Value::String(member.args.clone())),
        MemberKind::Constant => {
            if let Some(ref value) = member.value {
                reg.set(t, "value", Value::String(value.clone()));
            }
        }
    }

    match member.source {
        Source::File(ref file) => reg.set(t, "file", Value::String(file.clone())),
        Source::Native => reg.set(t, "file", Value::String("[native]".to_string())),
        Source::Unknown => {}
    }
    if let Some(line) = member.line {
        reg.set(t, "line", Value::Integer(line as i64));
    }

    if let Some(ref doc) = member.doc {
        let d = reg.new_table();
        reg.set(d, "brief", Value::String(doc.brief.clone()));

        let params = reg.new_table();
        for (i, p) in doc.params.iter().enumerate() {
            let entry = reg.new_table();
            reg.set(entry, "name", Value::String(p.name.clone()));
            reg.set(entry, "type", Value::String(p.ty.clone()));
            reg.set(entry, "description", Value::String(p.description.clone()));
            reg.set(params, i as i64 + 1, Value::Table(entry));
        }
        reg.set(d, "params", Value::Table(params));

        let returns = reg.new_table();
        for (i, r) in doc.returns.iter().enumerate() {
            let entry = reg.new_table();
            reg.set(entry, "type", Value::String(r.ty.clone()));
            reg.set(entry, "description", Value::String(r.description.clone()));
            reg.set(returns, i as i64 + 1, Value::Table(entry));
        }
        reg.set(d, "returns", Value::Table(returns));

        reg.set(t, "doc", Value::Table(d));
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<NamespaceGroup> {
        let mut create = Member::function("AGI.Physics", "CreateDimension");
        create.args = "params".to_string();
        create.source = Source::File("physics.lua".to_string());
        create.line = Some(4);
        create.doc = Some(DocBlock {
            brief: "Creates a dimension.".to_string(),
            params: vec![ParamDoc {
                name: "params".to_string(),
                ty: "table".to_string(),
                description: "settings".to_string(),
            }],
            returns: Vec::new(),
        });
        vec![
            NamespaceGroup {
                namespace: "AGI.Forge".to_string(),
                members: vec![Member::constant("AGI.Forge", "MAX_BUDGET", "100")],
            },
            NamespaceGroup {
                namespace: "AGI.Physics".to_string(),
                members: vec![create],
            },
        ]
    }

    #[test]
    fn renders_groups() {
        let out = JsonRenderer.render(&sample());
        let parsed: Json = serde_json::from_str(&out).unwrap();

        let budget = &parsed["AGI.Forge"]["members"][0];
        assert_eq!(budget["kind"], "constant");
        assert_eq!(budget["value"], "100");
        assert!(budget.get("doc").is_none());

        let create = &parsed["AGI.Physics"]["members"][0];
        assert_eq!(create["fqn"], "AGI.Physics.CreateDimension");
        assert_eq!(create["args"], "params");
        assert_eq!(create["line"], 4);
        assert_eq!(create["doc"]["params"][0]["type"], "table");
        assert_eq!(create["doc"]["returns"], Json::Array(Vec::new()));
    }

    #[test]
    fn sequence_detection() {
        let mut reg = Registry::new();
        let seq = reg.new_table();
        reg.set(seq, 1i64, Value::Integer(10));
        reg.set(seq, 2i64, Value::Integer(20));
        assert_eq!(encode(&reg, &Value::Table(seq)).to_string(), "[10,20]");

        let gap = reg.new_table();
        reg.set(gap, 1i64, Value::Integer(10));
        reg.set(gap, 3i64, Value::Integer(30));
        assert_eq!(
            encode(&reg, &Value::Table(gap)).to_string(),
            r#"{"1":10,"3":30}"#
        );

        let zero = reg.new_table();
        reg.set(zero, 0i64, Value::Boolean(true));
        assert_eq!(encode(&reg, &Value::Table(zero)).to_string(), r#"{"0":true}"#);

        let mixed = reg.new_table();
        reg.set(mixed, 1i64, Value::Integer(1));
        reg.set(mixed, "n", Value::Integer(1));
        assert_eq!(
            encode(&reg, &Value::Table(mixed)).to_string(),
            r#"{"1":1,"n":1}"#
        );
    }

    #[test]
    fn strings_escape_and_round_trip() {
        let original = "back\\slash \"quoted\"\nnext line";
        let reg = Registry::new();
        let encoded = encode(&reg, &Value::String(original.to_string())).to_string();
        assert!(encoded.contains("\\\\"));
        assert!(encoded.contains("\\n"));
        assert!(encoded.contains("\\\""));
        let decoded: String = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn self_reference_becomes_marker() {
        let mut reg = Registry::new();
        let t = reg.new_table();
        reg.set(t, "name", Value::String("loop".to_string()));
        reg.set(t, "self", Value::Table(t));
        let json = encode(&reg, &Value::Table(t));
        assert_eq!(json["self"], CYCLE_MARKER);
        assert_eq!(json["name"], "loop");
    }

    #[test]
    fn shared_subtable_is_not_a_cycle() {
        let mut reg = Registry::new();
        let shared = reg.new_table();
        reg.set(shared, "x", Value::Integer(1));
        let t = reg.new_table();
        reg.set(t, "a", Value::Table(shared));
        reg.set(t, "b", Value::Table(shared));
        let json = encode(&reg, &Value::Table(t));
        assert_eq!(json["a"]["x"], 1);
        assert_eq!(json["b"]["x"], 1);
    }

    #[test]
    fn primitives() {
        let reg = Registry::new();
        assert_eq!(encode(&reg, &Value::Nil), Json::Null);
        assert_eq!(encode(&reg, &Value::Float(1.5)).to_string(), "1.5");
        assert_eq!(encode(&reg, &Value::Float(f64::NAN)), Json::Null);
        assert_eq!(encode(&reg, &Value::Function(None)), "<function>");
    }
}
