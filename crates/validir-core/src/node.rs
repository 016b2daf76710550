//! Core tree data structures for validir.
//!
//! A template and an observed directory are both represented as a tree of
//! [`Node`]s rooted at a [`Directory`] named [`ROOT_NAME`].
//!
//! Builders produce these structures.
//! The comparator consumes them.

use crate::value::Value;

/// Name of the synthetic directory at the top of every tree.
pub const ROOT_NAME: &str = "root";

/// Characters that turn a name into a glob pattern.
const GLOB_CHARS: [char; 4] = ['?', '*', '[', ']'];

/// Whether a node is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

/// A leaf entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,

    /// Name starts with `.`.
    pub hidden: bool,

    /// Name contains no glob characters.
    ///
    /// Only meaningful for declared nodes; observed nodes are never required.
    pub required: bool,
}

impl File {
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        File {
            hidden: is_hidden_name(&name),
            required: is_required_name(&name),
            name,
        }
    }

    /// Same as [`File::from_name`] but never required.
    pub fn observed(name: impl Into<String>) -> Self {
        File {
            required: false,
            ..File::from_name(name)
        }
    }
}

/// A directory entry with its children in insertion order.
///
/// Child order carries no meaning for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    pub hidden: bool,
    pub required: bool,
    pub children: Vec<Node>,
}

impl Directory {
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Directory {
            hidden: is_hidden_name(&name),
            required: is_required_name(&name),
            name,
            children: Vec::new(),
        }
    }

    pub fn observed(name: impl Into<String>) -> Self {
        Directory {
            required: false,
            ..Directory::from_name(name)
        }
    }

    /// The synthetic top of a tree: never hidden, never required.
    pub fn root() -> Self {
        Directory {
            name: ROOT_NAME.to_string(),
            hidden: false,
            required: false,
            children: Vec::new(),
        }
    }

    pub fn dump(&self) -> Value {
        let children = self.children.iter().map(Node::dump).collect();
        Value::Mapping(vec![(
            Value::String(self.name.clone()),
            Value::Sequence(children),
        )])
    }
}

/// One entry in a declared or observed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(File),
    Directory(Directory),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Directory(d) => &d.name,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Node::File(f) => f.hidden,
            Node::Directory(d) => d.hidden,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Node::File(f) => f.required,
            Node::Directory(d) => d.required,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Node::File(_) => EntryKind::File,
            Node::Directory(_) => EntryKind::Directory,
        }
    }

    /// Children of a directory; empty for files.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::File(_) => &[],
            Node::Directory(d) => &d.children,
        }
    }

    /// Convert back into the declaration shape.
    ///
    /// A file dumps to its bare name, a directory to `{name: [children]}`.
    pub fn dump(&self) -> Value {
        match self {
            Node::File(f) => Value::String(f.name.clone()),
            Node::Directory(d) => d.dump(),
        }
    }
}

impl From<File> for Node {
    fn from(f: File) -> Self {
        Node::File(f)
    }
}

impl From<Directory> for Node {
    fn from(d: Directory) -> Self {
        Node::Directory(d)
    }
}

pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

pub fn is_required_name(name: &str) -> bool {
    !name.contains(&GLOB_CHARS[..])
}
