//! Line-oriented parser for the restricted array-of-tables config dialect.
//!
//! Each trimmed, non-blank, non-comment line is either a `[[name]]` section
//! header or a `key=value` pair; anything else is a hard parse failure and
//! the partially built tree is released with the error return.
//!
//! Section headers go through the scope-resolution walk (see
//! [`resolve_scope`]) so that a repeated section name stays a sibling under
//! its original ancestor instead of nesting ever deeper.

use crate::config::scope::{ScopeId, ScopeTree};
use crate::error::ConfigError;

/// Maximum accepted config-line length in bytes.
///
/// Matches the historical fixed buffer size; longer lines are an explicit
/// [`ConfigError::LineTooLong`] rather than a truncation.
pub const MAX_LINE_LEN: usize = 1024;

/// Parse a full config text into its scope tree.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedLine`] for a line that is neither a
/// section header nor a key-value pair, and [`ConfigError::LineTooLong`]
/// for a line over [`MAX_LINE_LEN`] bytes.
pub fn parse_str(input: &str) -> Result<ScopeTree, ConfigError> {
    let mut tree = ScopeTree::new();
    let mut current = tree.root();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        if raw.len() > MAX_LINE_LEN {
            return Err(ConfigError::LineTooLong {
                line,
                limit: MAX_LINE_LEN,
            });
        }
        let trimmed = raw.trim();

        // Comments are full-line only; there is no trailing-comment syntax.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(name) = section_name(trimmed) {
            let target = resolve_scope(&tree, current, name);
            current = tree.append_child(target, name);
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::MalformedLine {
                line,
                text: trimmed.to_string(),
            });
        };
        // Key is trimmed; the value is kept raw so the quoted-string grammar
        // sees exactly what followed `=`.
        tree.insert_pair(current, key.trim(), value);
    }

    Ok(tree)
}

/// Extract the name from a `[[name]]` header line, or `None` if the line is
/// not a well-formed header (empty name or embedded brackets included).
fn section_name(line: &str) -> Option<&str> {
    let name = line.strip_prefix("[[")?.strip_suffix("]]")?;
    if name.is_empty() || name.contains('[') || name.contains(']') {
        return None;
    }
    Some(name)
}

/// Decide which node receives a new `[[name]]` child.
///
/// From the current node: the root always receives the child itself.
/// Otherwise the ancestor chain (parent, grandparent, …) is walked and the
/// first ancestor that already has a direct child series named `name`
/// receives the child; if none does, the current node receives it (nesting
/// one level deeper).
///
/// This is what keeps repeated `[[monitor]]` sections siblings under the
/// same `[[screen]]`, while a new `[[screen]]` returns to the root. Known
/// limitation, kept deliberately: the same section name reused at unrelated
/// nesting depths can resolve to the wrong ancestor.
fn resolve_scope(tree: &ScopeTree, current: ScopeId, name: &str) -> ScopeId {
    if tree.parent(current).is_none() {
        return current;
    }
    let mut ancestor = tree.parent(current);
    while let Some(node) = ancestor {
        if tree.lookup_child_series(node, name).is_some() {
            return node;
        }
        ancestor = tree.parent(node);
    }
    current
}
