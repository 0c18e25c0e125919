//! Lua module loader — runs modules in an embedded Lua state.
//!
//! All modules share one state, so later modules see the tables earlier ones
//! created. A module that raises an error keeps the effects of the
//! statements that ran before it. After loading, the namespace roots are
//! mirrored into a [`Registry`] for introspection.

use crate::runtime::registry::{Key, Origin, Registry, TableId, Value};
use crate::runtime::ModuleLoader;
use mlua::{Function, Lua, Table, Value as LuaValue};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// `file:line: message` as reported by Lua
    #[error("{0}")]
    Syntax(String),
    #[error("{0}")]
    Runtime(String),
}

impl From<mlua::Error> for LoadError {
    fn from(err: mlua::Error) -> Self {
        match err {
            mlua::Error::SyntaxError { message, .. } => LoadError::Syntax(first_line(&message)),
            mlua::Error::RuntimeError(message) => LoadError::Runtime(first_line(&message)),
            other => LoadError::Runtime(first_line(&other.to_string())),
        }
    }
}

/// Drop the stack traceback Lua appends below the message.
fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_string()
}

pub struct LuaLoader {
    lua: Lua,
}

impl Default for LuaLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LuaLoader {
    pub fn new() -> Self {
        LuaLoader { lua: Lua::new() }
    }

    /// Run one chunk; `name` is what function origins report as their file.
    pub fn exec_source(&self, name: &str, source: &str) -> Result<(), LoadError> {
        self.lua
            .load(source)
            .set_name(format!("@{}", name))
            .exec()?;
        Ok(())
    }
}

impl ModuleLoader for LuaLoader {
    fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let file = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: file.clone(),
            source,
        })?;
        self.exec_source(&file, &source)
    }

    fn snapshot(&self, roots: &[String]) -> Result<Registry, LoadError> {
        let mut mirror = Mirror {
            registry: Registry::new(),
            seen: HashMap::new(),
        };
        let globals = self.lua.globals();
        for root in roots {
            // Dotted roots are resolved later against the mirrored top table
            let name = root.split('.').next().unwrap_or(root);
            let value = globals.raw_get::<LuaValue>(name)?;
            let value = mirror.value(value)?;
            let g = mirror.registry.globals();
            mirror.registry.set(g, name, value);
        }
        Ok(mirror.registry)
    }
}

/// Copies live Lua values into the registry arena.
struct Mirror {
    registry: Registry,
    /// Lua table address to arena id; aliases and cycles map to one table
    seen: HashMap<usize, TableId>,
}

impl Mirror {
    fn value(&mut self, value: LuaValue) -> mlua::Result<Value> {
        Ok(match value {
            LuaValue::Nil => Value::Nil,
            LuaValue::Boolean(b) => Value::Boolean(b),
            LuaValue::Integer(i) => Value::Integer(i),
            LuaValue::Number(n) => Value::Float(n),
            LuaValue::String(s) => Value::String(s.to_string_lossy().to_string()),
            LuaValue::Table(t) => Value::Table(self.table(&t)?),
            LuaValue::Function(f) => Value::Function(origin(&f)),
            // Userdata, light userdata, threads
            _ => Value::Opaque,
        })
    }

    fn table(&mut self, table: &Table) -> mlua::Result<TableId> {
        let address = table.to_pointer() as usize;
        if let Some(id) = self.seen.get(&address) {
            return Ok(*id);
        }
        let id = self.registry.new_table();
        self.seen.insert(address, id);

        for pair in table.clone().pairs::<LuaValue, LuaValue>() {
            let (key, value) = pair?;
            let Some(key) = mirror_key(&key) else {
                continue;
            };
            let value = self.value(value)?;
            self.registry.set(id, key, value);
        }
        Ok(id)
    }
}

/// Float, boolean and reference keys never name a member.
fn mirror_key(key: &LuaValue) -> Option<Key> {
    match key {
        LuaValue::Integer(i) => Some(Key::Int(*i)),
        LuaValue::String(s) => Some(Key::Str(s.to_string_lossy().to_string())),
        _ => None,
    }
}

/// Where a Lua function was defined; `None` for native (C) functions.
fn origin(function: &Function) -> Option<Origin> {
    let info = function.info();
    let file = info.source?.strip_prefix('@')?.to_string();
    Some(Origin {
        file,
        line: info.line_defined?,
    })
}
