//! Validate directory trees against declarative templates.
//!
//! A template lists the files and directories expected under a root, using
//! shell-glob names for entries that may vary:
//!
//! ```yaml
//! root:
//!   - README.md
//!   - src:
//!       - "*.py"
//! skip_hidden: true
//! allow_extra: false
//! ```
//!
//! Names without glob characters are required. Hidden entries are dropped
//! from both sides when `skip_hidden` is set, and entries on disk that the
//! template does not account for are rejected unless `allow_extra` is set.

mod compare;
mod error;
mod format;
mod matcher;
mod node;
mod parse;
mod report;
mod template;
mod value;
mod walk;

pub use compare::compare_level;
pub use error::Error;
pub use format::Format;
pub use matcher::{matches, matches_name};
pub use node::{Directory, EntryKind, File, Node, ROOT_NAME};
pub use parse::build_tree;
pub use report::{Mismatch, MismatchKind, Report};
pub use template::{FileNames, Policy, Template};
pub use value::Value;
pub use walk::walk_tree;

use std::path::Path;

/// Load the template at `template` and check `dir` against it.
pub fn validate(dir: &Path, template: &Path) -> Result<Report, Error> {
    Template::load(template)?.validate(dir)
}

/// Derive a template from `dir` and write it to `output`.
pub fn generate(
    dir: &Path,
    output: &Path,
    policy: Policy,
    names: FileNames,
) -> Result<Template, Error> {
    let template = Template::generate_with(dir, policy, names)?;
    template.save(output)?;
    Ok(template)
}
