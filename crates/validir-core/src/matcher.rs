use std::borrow::Cow;

use glob::{MatchOptions, Pattern};

use crate::node::Node;

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Whether `a` and `b` describe the same entry.
///
/// Nodes of different kinds never match. Otherwise either name may be the
/// pattern and either may be the concrete name, so both directions are tried.
///
/// This is not equality: `*.txt` matches `a.txt` but they are different nodes.
pub fn matches(a: &Node, b: &Node) -> bool {
    if a.kind() != b.kind() {
        return false;
    }
    matches_name(a.name(), b.name())
}

/// Symmetric shell-glob relation between two names.
pub fn matches_name(a: &str, b: &str) -> bool {
    a == b || glob_matches(a, b) || glob_matches(b, a)
}

fn glob_matches(pattern: &str, name: &str) -> bool {
    match Pattern::new(&collapse_stars(pattern)) {
        Ok(p) => p.matches_with(name, OPTIONS),
        // Not a usable pattern (e.g. unclosed `[`); the literal check already ran.
        Err(_) => false,
    }
}

/// Replace every run of `*` outside a bracket class with a single `*`.
///
/// `glob` treats `**` as the recursive path wildcard and rejects it unless it
/// fills a whole path component. Within one name, any run of stars means the
/// same as one.
fn collapse_stars(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("**") {
        return Cow::Borrowed(pattern);
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Index of the `]` closing the class opened at `start`.
///
/// As in `glob`, a `]` directly after `[` or `[!` is a member, not the end.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut first = start + 1;
    if chars.get(first) == Some(&'!') {
        first += 1;
    }
    let from = first + 1;
    chars
        .get(from..)?
        .iter()
        .position(|&c| c == ']')
        .map(|p| from + p)
}
