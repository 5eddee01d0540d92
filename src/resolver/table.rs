//! Namespace table and registration-time normalization.

use indexmap::IndexMap;

/// Trims namespace separators from both ends and appends exactly one.
///
/// An empty (or all-separator) prefix becomes a bare separator, which no
/// split boundary can ever produce, so such a registration is inert.
pub(crate) fn normalize_prefix(prefix: &str, separator: &str) -> String {
    let trimmed = prefix.trim_start_matches(separator).trim_end_matches(separator);
    format!("{trimmed}{separator}")
}

/// Strips trailing path separators and appends a single `/`.
pub(crate) fn normalize_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    format!("{trimmed}/")
}

/// Normalized prefix to ordered base directories.
///
/// Prefixes keep first-registration order so listings are deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct NamespaceTable {
    entries: IndexMap<String, Vec<String>>,
}

impl NamespaceTable {
    /// Adds an already-normalized directory under an already-normalized prefix.
    ///
    /// A directory appears at most once per prefix. Re-adding with `prepend`
    /// moves it to the front; re-adding without it keeps its position.
    pub(crate) fn insert(&mut self, prefix: String, dir: String, prepend: bool) {
        let dirs = self.entries.entry(prefix).or_default();
        let existing = dirs.iter().position(|d| *d == dir);
        match (existing, prepend) {
            (Some(0), true) | (Some(_), false) => {}
            (Some(idx), true) => {
                let dir = dirs.remove(idx);
                dirs.insert(0, dir);
            }
            (None, true) => dirs.insert(0, dir),
            (None, false) => dirs.push(dir),
        }
    }

    pub(crate) fn dirs(&self, prefix: &str) -> Option<&[String]> {
        self.entries.get(prefix).map(Vec::as_slice)
    }

    pub(crate) fn snapshot(&self) -> Vec<(String, Vec<String>)> {
        self.entries.iter().map(|(prefix, dirs)| (prefix.clone(), dirs.clone())).collect()
    }
}
