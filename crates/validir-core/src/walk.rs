use std::fs;
use std::path::{Path, PathBuf};

use crate::Error;
use crate::node::{Directory, File, Node, is_hidden_name};

/// Per-directory traversal state.
#[derive(Debug, Clone)]
struct WalkCtx {
    /// Directory being checked.
    root: PathBuf,

    /// Current path relative to root ("" means root itself).
    rel: PathBuf,

    /// Depth from root, for log indentation.
    depth: usize,

    skip_hidden: bool,
}

/// Read a real directory into an observed tree.
///
/// Entries are sorted by name. Nothing in the result is required.
pub fn walk_tree(root: &Path, skip_hidden: bool) -> Result<Directory, Error> {
    let meta = fs::metadata(root).map_err(|e| Error::Io {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !meta.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut ctx = WalkCtx {
        root: root.to_path_buf(),
        rel: PathBuf::new(),
        depth: 0,
        skip_hidden,
    };

    tracing::debug!(root = %root.display(), skip_hidden, "walk: start");
    let mut dir = Directory::root();
    walk_dir(&mut ctx, &mut dir)?;

    Ok(dir)
}

fn walk_dir(ctx: &mut WalkCtx, into: &mut Directory) -> Result<(), Error> {
    let abs = ctx.root.join(&ctx.rel);

    tracing::debug!("{}> enter {}", indent(ctx.depth), rel_display(&ctx.rel));

    let rd = fs::read_dir(&abs).map_err(|e| Error::Io {
        path: abs.clone(),
        source: e,
    })?;

    // Sort for deterministic output.
    let mut entries: Vec<fs::DirEntry> = Vec::new();
    for ent in rd {
        let ent = ent.map_err(|e| Error::Io {
            path: abs.clone(),
            source: e,
        })?;
        entries.push(ent);
    }
    entries.sort_by_key(|e| e.file_name());

    for ent in entries {
        let name = ent.file_name();
        let name = name.to_string_lossy().into_owned();

        if ctx.skip_hidden && is_hidden_name(&name) {
            tracing::trace!("{}- skip {}", indent(ctx.depth + 1), name);
            continue;
        }

        let ty = ent.file_type().map_err(|e| Error::Io {
            path: ent.path(),
            source: e,
        })?;

        if ty.is_dir() {
            let mut child = Directory::observed(name.as_str());

            let saved_rel = ctx.rel.clone();
            ctx.rel.push(&name);
            ctx.depth += 1;

            walk_dir(ctx, &mut child)?;

            ctx.rel = saved_rel;
            ctx.depth -= 1;

            into.children.push(Node::Directory(child));
        } else if ty.is_symlink() && points_to_dir(&ent.path()) {
            // Listed, not followed.
            tracing::trace!(
                "{}~ link {}",
                indent(ctx.depth + 1),
                ctx.rel.join(&name).display()
            );
            into.children.push(Node::Directory(Directory::observed(name)));
        } else {
            // Regular files, links to files, dangling links and special files.
            tracing::trace!(
                "{}- file {}",
                indent(ctx.depth + 1),
                ctx.rel.join(&name).display()
            );
            into.children.push(Node::File(File::observed(name)));
        }
    }

    tracing::debug!("{}< exit  {}", indent(ctx.depth), rel_display(&ctx.rel));
    Ok(())
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

fn rel_display(rel: &Path) -> String {
    if rel.as_os_str().is_empty() {
        ".".to_string()
    } else {
        rel.display().to_string()
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
