use crate::error::Error;
use crate::node::{Directory, File, Node, ROOT_NAME};
use crate::value::Value;

/// Build a declared tree from the value stored under the `root` key.
///
/// The value must be a sequence. Hidden entries are dropped when
/// `skip_hidden` is set, together with everything below them.
pub fn build_tree(root: &Value, skip_hidden: bool) -> Result<Directory, Error> {
    if !matches!(root, Value::Sequence(_)) {
        return Err(Error::malformed(format!(
            "'{ROOT_NAME}' must be a sequence, found {}",
            root.kind()
        )));
    }

    let mut dir = Directory::root();
    push_children(&mut dir, root, skip_hidden, ROOT_NAME)?;
    Ok(dir)
}

/// Process one declaration value into `parent`'s children.
///
/// `at` is the slash-joined location used in error messages.
fn push_children(
    parent: &mut Directory,
    value: &Value,
    skip_hidden: bool,
    at: &str,
) -> Result<(), Error> {
    match value {
        Value::String(name) => {
            check_name(name, at)?;
            let file = File::from_name(name.as_str());
            if skip_hidden && file.hidden {
                tracing::trace!(at, name = %file.name, "skipping hidden file");
                return Ok(());
            }
            parent.children.push(Node::File(file));
        }

        Value::Sequence(items) => {
            for item in items {
                push_children(parent, item, skip_hidden, at)?;
            }
        }

        Value::Mapping(pairs) => {
            for (key, content) in pairs {
                let name = key.as_str().ok_or_else(|| {
                    Error::malformed(format!(
                        "directory names must be strings, found {} under '{at}'",
                        key.kind()
                    ))
                })?;
                check_name(name, at)?;

                let mut dir = Directory::from_name(name);
                if skip_hidden && dir.hidden {
                    tracing::trace!(at, name, "skipping hidden directory");
                    continue;
                }

                let child_at = format!("{at}/{name}");
                if !matches!(content, Value::Sequence(_)) {
                    return Err(Error::malformed(format!(
                        "contents of '{child_at}' must be a sequence, found {}",
                        content.kind()
                    )));
                }
                push_children(&mut dir, content, skip_hidden, &child_at)?;
                parent.children.push(Node::Directory(dir));
            }
        }

        other => {
            return Err(Error::malformed(format!(
                "unexpected {} under '{at}'; only names, sequences and mappings are allowed",
                other.kind()
            )));
        }
    }

    Ok(())
}

fn check_name(name: &str, at: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::malformed(format!("empty entry name under '{at}'")));
    }
    Ok(())
}
