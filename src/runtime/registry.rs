//! Introspectable registry — the live namespace graph.
//!
//! Tables live in an arena and are addressed by [`TableId`], so aliasing and
//! cycles are plain ids and identity is id equality. The registry is filled
//! by mirroring the live Lua state after loading and only read afterwards.

use std::collections::BTreeMap;
use std::fmt;

/// Identity of a table inside one [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(usize);

/// Table key. Integer keys sort before string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Integer keys and all-digit string keys are array positions, not names.
    pub fn is_numeric(&self) -> bool {
        match self {
            Key::Int(_) => true,
            Key::Str(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

/// Where a live function was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub file: String,
    pub line: usize,
}

/// A value held by a table slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Table(TableId),
    /// `None` origin means a host-provided (native) function
    Function(Option<Origin>),
    /// Handle with no textual rendering (userdata, threads)
    Opaque,
}

impl Value {
    /// Text used for constants; `None` for tables, functions and opaque handles.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Nil => Some("nil".to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(render_float(*f)),
            Value::String(s) => Some(format!("{:?}", s)),
            Value::Table(_) | Value::Function(_) | Value::Opaque => None,
        }
    }
}

/// Floats keep a fractional part so they stay distinguishable from integers.
fn render_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

#[derive(Debug, Default)]
pub struct Table {
    entries: BTreeMap<Key, Value>,
}

impl Table {
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }
}

#[derive(Debug)]
pub struct Registry {
    tables: Vec<Table>,
    globals: TableId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry holding only the globals table.
    pub fn new() -> Self {
        Registry {
            tables: vec![Table::default()],
            globals: TableId(0),
        }
    }

    pub fn globals(&self) -> TableId {
        self.globals
    }

    pub fn new_table(&mut self) -> TableId {
        self.tables.push(Table::default());
        TableId(self.tables.len() - 1)
    }

    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn get(&self, id: TableId, key: &Key) -> Option<&Value> {
        self.tables[id.0].get(key)
    }

    /// Store a value; assigning `Nil` removes the slot.
    pub fn set(&mut self, id: TableId, key: impl Into<Key>, value: Value) {
        let key = key.into();
        let table = &mut self.tables[id.0];
        if matches!(value, Value::Nil) {
            table.entries.remove(&key);
        } else {
            table.entries.insert(key, value);
        }
    }

    /// Resolve a dotted path (`AGI.Physics`) starting at the globals table.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.get(self.globals, &Key::from(segments.next()?))?;
        for segment in segments {
            let Value::Table(id) = current else {
                return None;
            };
            current = self.get(*id, &Key::from(segment))?;
        }
        Some(current)
    }
}
