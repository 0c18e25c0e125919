//! Data model for discovered API members — format-agnostic.

/// One documented member of a namespace, keyed by its fully-qualified name.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// `namespace.name`, unique across a run
    pub fqn: String,
    pub namespace: String,
    pub name: String,
    pub kind: MemberKind,
    /// Raw argument text between the parentheses (functions only)
    pub args: String,
    pub source: Source,
    /// 1-based line of the declaration
    pub line: Option<usize>,
    /// Only static scanning produces doc blocks
    pub doc: Option<DocBlock>,
    /// Textual rendering of a constant's value
    pub value: Option<String>,
}

impl Member {
    /// A function member with no provenance and no documentation yet.
    pub fn function(namespace: &str, name: &str) -> Self {
        Member {
            fqn: qualify(namespace, name),
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind: MemberKind::Function,
            args: String::new(),
            source: Source::Unknown,
            line: None,
            doc: None,
            value: None,
        }
    }

    /// A constant member carrying its rendered value.
    pub fn constant(namespace: &str, name: &str, value: impl Into<String>) -> Self {
        Member {
            kind: MemberKind::Constant,
            value: Some(value.into()),
            ..Member::function(namespace, name)
        }
    }

    /// `path:line` when the member was traced back to a file.
    pub fn location(&self) -> Option<String> {
        match (&self.source, self.line) {
            (Source::File(path), Some(line)) => Some(format!("{}:{}", path, line)),
            (Source::File(path), None) => Some(path.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Function,
    Constant,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Function => "function",
            MemberKind::Constant => "constant",
        }
    }
}

/// Where a member came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Defined in a source file
    File(String),
    /// A live function with no recoverable origin (host-provided)
    Native,
    /// Nothing is known (e.g. runtime constants)
    Unknown,
}

/// Structured comment content attached to one function declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocBlock {
    pub brief: String,
    /// @param entries, top-to-bottom
    pub params: Vec<ParamDoc>,
    /// @return entries, top-to-bottom
    pub returns: Vec<ReturnDoc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDoc {
    pub name: String,
    /// e.g. "number", "Vec3[]", "string|nil"
    pub ty: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnDoc {
    pub ty: String,
    pub description: String,
}

/// Members sharing a namespace. Derived from the merged member set.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceGroup {
    pub namespace: String,
    /// Sorted by fully-qualified name
    pub members: Vec<Member>,
}

/// Join a namespace path and a short name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
