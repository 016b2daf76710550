use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use glob::Pattern;

use crate::compare::compare_level;
use crate::error::Error;
use crate::format::Format;
use crate::node::{Directory, File, Node, ROOT_NAME};
use crate::parse::build_tree;
use crate::report::Report;
use crate::value::Value;
use crate::walk::walk_tree;

const SKIP_HIDDEN_KEY: &str = "skip_hidden";
const ALLOW_EXTRA_KEY: &str = "allow_extra";

/// How hidden and unlisted entries are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// Drop entries whose name starts with `.` from both trees.
    pub skip_hidden: bool,

    /// Accept entries on disk that no template entry accounts for.
    pub allow_extra: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            skip_hidden: true,
            allow_extra: false,
        }
    }
}

/// How [`Template::generate_with`] records the files it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNames {
    /// Every file under its own name, which makes it required.
    #[default]
    Exact,

    /// One optional `*.<ext>` pattern per extension in each directory.
    ///
    /// The extension is everything after the first dot that does not start
    /// the name, so `a.tar.gz` gives `*.tar.gz`. Files without an extension
    /// keep their name.
    ByExtension,
}

/// A declared directory layout plus the policy to check it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    root: Directory,
    policy: Policy,
}

impl Template {
    pub fn new(root: Directory, policy: Policy) -> Self {
        Template { root, policy }
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Build a template from a parsed declaration.
    ///
    /// The value must be a mapping with a `root` sequence. `skip_hidden`
    /// and `allow_extra` are optional booleans.
    pub fn from_value(value: &Value) -> Result<Template, Error> {
        let Value::Mapping(pairs) = value else {
            return Err(Error::malformed(format!(
                "template must be a mapping, found {}",
                value.kind()
            )));
        };

        for (key, _) in pairs {
            match key.as_str() {
                Some(ROOT_NAME | SKIP_HIDDEN_KEY | ALLOW_EXTRA_KEY) => {}
                Some(other) => tracing::warn!(key = other, "ignoring unknown template key"),
                None => tracing::warn!(key = ?key, "ignoring non-string template key"),
            }
        }

        let defaults = Policy::default();
        let policy = Policy {
            skip_hidden: flag(value, SKIP_HIDDEN_KEY, defaults.skip_hidden)?,
            allow_extra: flag(value, ALLOW_EXTRA_KEY, defaults.allow_extra)?,
        };

        let root = value
            .get(ROOT_NAME)
            .ok_or_else(|| Error::malformed(format!("missing required key '{ROOT_NAME}'")))?;
        let root = build_tree(root, policy.skip_hidden)?;

        Ok(Template { root, policy })
    }

    pub fn from_str_with(text: &str, format: Format) -> Result<Template, Error> {
        Template::from_value(&format.parse(text)?)
    }

    /// Read a template file; the format follows the extension.
    pub fn load(path: &Path) -> Result<Template, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "loading template");
        Template::from_str_with(&text, Format::from_path(path))
    }

    /// Convert back into the declaration shape, policy included.
    pub fn dump(&self) -> Value {
        let children = self.root.children.iter().map(Node::dump).collect();
        Value::Mapping(vec![
            (ROOT_NAME.into(), Value::Sequence(children)),
            (SKIP_HIDDEN_KEY.into(), self.policy.skip_hidden.into()),
            (ALLOW_EXTRA_KEY.into(), self.policy.allow_extra.into()),
        ])
    }

    pub fn to_string_with(&self, format: Format) -> Result<String, Error> {
        format.render(&self.dump())
    }

    /// Write the template; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = self.to_string_with(Format::from_path(path))?;
        fs::write(path, text).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "wrote template");
        Ok(())
    }

    /// Derive a template from an existing directory.
    ///
    /// The observed tree goes through its own dump, so the result is the
    /// template that loading the saved file would give: names without
    /// glob characters become required.
    pub fn generate(dir: &Path, policy: Policy) -> Result<Template, Error> {
        Template::generate_with(dir, policy, FileNames::Exact)
    }

    /// Like [`Template::generate`], choosing how files are named.
    pub fn generate_with(dir: &Path, policy: Policy, names: FileNames) -> Result<Template, Error> {
        tracing::info!(dir = %dir.display(), ?policy, ?names, "generating template");
        let mut root = walk_tree(dir, policy.skip_hidden)?;
        if names == FileNames::ByExtension {
            root = by_extension(root);
        }
        let observed = Template { root, policy };
        Template::from_value(&observed.dump())
    }

    /// Check `dir` against this template with its own policy.
    pub fn validate(&self, dir: &Path) -> Result<Report, Error> {
        self.validate_with(dir, self.policy.allow_extra)
    }

    /// Check `dir` against this template, overriding `allow_extra`.
    ///
    /// Hidden entries are handled the same way on both sides.
    pub fn validate_with(&self, dir: &Path, allow_extra: bool) -> Result<Report, Error> {
        let policy = Policy {
            allow_extra,
            ..self.policy
        };
        tracing::info!(dir = %dir.display(), ?policy, "validating");

        let observed = walk_tree(dir, policy.skip_hidden)?;
        let mismatch = compare_level(&observed.children, &self.root.children, allow_extra).err();

        match &mismatch {
            None => tracing::info!(dir = %dir.display(), "directory matches template"),
            Some(m) => {
                tracing::info!(dir = %dir.display(), mismatch = %m, "directory does not match")
            }
        }

        Ok(Report::new(dir, policy, mismatch))
    }

    /// Entries directly under the root.
    pub fn entries(&self) -> &[Node] {
        &self.root.children
    }
}

impl FromStr for Template {
    type Err = Error;

    /// Parse a YAML template.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::from_str_with(s, Format::Yaml)
    }
}

/// Replace the files of every directory with sorted, deduplicated
/// extension patterns.
fn by_extension(mut dir: Directory) -> Directory {
    let mut patterns = BTreeSet::new();
    let mut children: Vec<Node> = Vec::new();

    for child in std::mem::take(&mut dir.children) {
        match child {
            Node::Directory(d) => children.push(by_extension(d).into()),
            Node::File(f) => {
                patterns.insert(extension_pattern(&f.name));
            }
        }
    }

    children.extend(patterns.into_iter().map(|p| Node::from(File::observed(p))));
    children.sort_by(|a, b| a.name().cmp(b.name()));
    dir.children = children;
    dir
}

fn extension_pattern(name: &str) -> String {
    let stem = name.trim_start_matches('.');
    match stem.split_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("*.{}", Pattern::escape(ext)),
        _ => name.to_string(),
    }
}

fn flag(value: &Value, key: &str, default: bool) -> Result<bool, Error> {
    match value.get(key) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(Error::malformed(format!(
            "'{key}' must be a boolean, found {}",
            other.kind()
        ))),
    }
}
