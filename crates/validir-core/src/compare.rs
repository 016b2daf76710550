//! Recursive comparison of an observed tree against a declared one.
//!
//! Each level runs two passes:
//!
//! 1. every required expected node must be matched by some observed node;
//! 2. unless extra entries are allowed, every observed node must be matched
//!    by some expected node, required or not.
//!
//! A name match between two directories only counts if their children
//! compare successfully as well. The first successful candidate wins; no
//! attempt is made to find an optimal assignment, so a template where one
//! observed entry could satisfy two rules may be rejected.

use crate::matcher::matches;
use crate::node::Node;
use crate::report::{Mismatch, join};

/// Compare one level of an observed tree against the expected entries.
///
/// `Err` carries the first mismatch found at this level or below.
pub fn compare_level(
    observed: &[Node],
    expected: &[Node],
    allow_extra: bool,
) -> Result<(), Mismatch> {
    Comparator { allow_extra }.level("", observed, expected)
}

/// Which tree the node being searched for comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Expected,
    Observed,
}

struct Comparator {
    allow_extra: bool,
}

impl Comparator {
    fn level(&self, at: &str, observed: &[Node], expected: &[Node]) -> Result<(), Mismatch> {
        // Observed entries that already satisfied a required entry. Pass 2
        // skips them; checking them again would walk each subtree twice per
        // level, which doubles with every level of nesting.
        let mut accounted = vec![false; observed.len()];

        for e in expected.iter().filter(|e| e.is_required()) {
            match self.find(at, e, Side::Expected, observed) {
                Ok(i) => accounted[i] = true,
                Err(deeper) => {
                    let mismatch =
                        deeper.unwrap_or_else(|| Mismatch::missing(e.kind(), at, e.name()));
                    tracing::debug!(%mismatch, "required entry not satisfied");
                    return Err(mismatch);
                }
            }
        }

        if !self.allow_extra {
            let pending = observed.iter().zip(&accounted).filter(|(_, done)| !**done);
            for (o, _) in pending {
                if let Err(deeper) = self.find(at, o, Side::Observed, expected) {
                    let mismatch =
                        deeper.unwrap_or_else(|| Mismatch::unexpected(o.kind(), at, o.name()));
                    tracing::debug!(%mismatch, "observed entry not accounted for");
                    return Err(mismatch);
                }
            }
        }

        Ok(())
    }

    /// Find the first candidate corresponding to `node` and return its index.
    ///
    /// On failure, returns the subtree mismatch of the first directory that
    /// matched by name but not by content, if there was one.
    fn find(
        &self,
        at: &str,
        node: &Node,
        side: Side,
        candidates: &[Node],
    ) -> Result<usize, Option<Mismatch>> {
        let mut deeper = None;

        for (i, c) in candidates.iter().enumerate() {
            if !matches(node, c) {
                continue;
            }

            let (Node::Directory(_), Node::Directory(_)) = (node, c) else {
                tracing::trace!(at, a = node.name(), b = c.name(), "file matched");
                return Ok(i);
            };

            let (obs, exp) = match side {
                Side::Expected => (c, node),
                Side::Observed => (node, c),
            };
            // Paths always name the real entry, never the pattern.
            let child_at = join(at, obs.name());

            match self.level(&child_at, obs.children(), exp.children()) {
                Ok(()) => {
                    tracing::trace!(at, a = node.name(), b = c.name(), "directory matched");
                    return Ok(i);
                }
                Err(m) => {
                    if deeper.is_none() {
                        deeper = Some(m);
                    }
                }
            }
        }

        Err(deeper)
    }
}
