use std::fmt;
use std::path::{Path, PathBuf};

use crate::node::EntryKind;
use crate::template::Policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// A required template entry has no counterpart on disk.
    MissingRequired,
    /// An entry on disk has no counterpart in the template.
    Unexpected,
}

impl MismatchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MismatchKind::MissingRequired => "missing_required",
            MismatchKind::Unexpected => "unexpected",
        }
    }
}

/// The first offending entry found by a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub entry: EntryKind,
    /// Slash-joined path relative to the validated directory. For a missing
    /// entry the last segment is the template name, which may be a pattern.
    pub path: String,
}

impl Mismatch {
    pub(crate) fn missing(entry: EntryKind, parent: &str, name: &str) -> Self {
        Mismatch {
            kind: MismatchKind::MissingRequired,
            entry,
            path: join(parent, name),
        }
    }

    pub(crate) fn unexpected(entry: EntryKind, parent: &str, name: &str) -> Self {
        Mismatch {
            kind: MismatchKind::Unexpected,
            entry,
            path: join(parent, name),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MismatchKind::MissingRequired => write!(
                f,
                "missing required {} '{}'",
                self.entry.as_str(),
                self.path
            ),
            MismatchKind::Unexpected => {
                write!(f, "unexpected {} '{}'", self.entry.as_str(), self.path)
            }
        }
    }
}

pub(crate) fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Outcome of validating one directory against a template.
#[derive(Debug, Clone)]
pub struct Report {
    directory: PathBuf,
    policy: Policy,
    mismatch: Option<Mismatch>,
}

impl Report {
    pub(crate) fn new(directory: &Path, policy: Policy, mismatch: Option<Mismatch>) -> Report {
        Report {
            directory: directory.to_path_buf(),
            policy,
            mismatch,
        }
    }

    pub fn is_match(&self) -> bool {
        self.mismatch.is_none()
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        self.mismatch.as_ref()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Policy the comparison actually ran with, after any overrides.
    pub fn policy(&self) -> Policy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_entry() {
        let m = Mismatch::missing(EntryKind::File, "src", "config.yaml");
        assert_eq!(m.path, "src/config.yaml");
        assert_eq!(m.to_string(), "missing required file 'src/config.yaml'");

        let m = Mismatch::unexpected(EntryKind::Directory, "", "target");
        assert_eq!(m.to_string(), "unexpected directory 'target'");
    }

    #[test]
    fn report_without_mismatch_is_a_match() {
        let r = Report::new(Path::new("x"), Policy::default(), None);
        assert!(r.is_match());
        assert_eq!(r.mismatch(), None);
        assert_eq!(r.directory(), Path::new("x"));
    }
}
