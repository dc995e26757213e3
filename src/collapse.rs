//! Collapsing flat engine errors into an error tree.
//!
//! Engines report every failed keyword separately: a value that fails all
//! branches of an `anyOf` yields one record per branch plus one for the `anyOf`
//! itself. [`collapse`] folds such a flat list into a tree in a single
//! left-to-right pass, so that each logical failure surfaces once at the top
//! level with its sub-violations nested underneath.
//!
//! # Example
//!
//! ```rust
//! use schema_tree::{collapse, ErrorKind, ErrorRecord};
//!
//! let errors = vec![
//!     ErrorRecord::new(".mode", ErrorKind::Type, "should be string"),
//!     ErrorRecord::new(".mode", ErrorKind::Type, "should be boolean"),
//!     ErrorRecord::new(".mode", ErrorKind::AnyOf, "should match some schema in anyOf"),
//! ];
//!
//! let tree = collapse(errors);
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree[0].kind, ErrorKind::AnyOf);
//! assert_eq!(tree[0].children.len(), 2);
//! ```

use crate::error::ErrorRecord;

/// How an incoming record decides which accepted records it absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Containment {
    /// An accepted record is absorbed when its path contains the incoming path
    /// as a substring. `.a` therefore also absorbs `.ab`.
    #[default]
    Substring,
    /// An accepted record is absorbed only when the incoming path is empty, equal
    /// to its path, or a prefix of it ending at a segment boundary (`.` or `[`).
    Segment,
}

impl Containment {
    /// Returns true if a record at `existing` is absorbed by one arriving at `incoming`.
    pub fn absorbs(self, existing: &str, incoming: &str) -> bool {
        match self {
            Containment::Substring => existing.contains(incoming),
            Containment::Segment => match existing.strip_prefix(incoming) {
                Some(rest) => incoming.is_empty() || rest.is_empty() || rest.starts_with(['.', '[']),
                None => false,
            },
        }
    }
}

/// Collapses a flat error list using substring containment.
pub fn collapse(errors: impl IntoIterator<Item = ErrorRecord>) -> Vec<ErrorRecord> {
    collapse_with(errors, Containment::Substring)
}

/// Collapses a flat error list using the given containment rule.
///
/// For each incoming record, every already-accepted record it absorbs is moved
/// under it: the absorbed record's own children first, then the absorbed record
/// itself with its children detached. Absorbed content is appended after any
/// children the incoming record already carried. Unrelated records keep their
/// relative order and the incoming record is appended last.
pub fn collapse_with(
    errors: impl IntoIterator<Item = ErrorRecord>,
    containment: Containment,
) -> Vec<ErrorRecord> {
    let mut result: Vec<ErrorRecord> = Vec::new();

    for mut error in errors {
        let (absorbed, kept): (Vec<_>, Vec<_>) = result
            .into_iter()
            .partition(|existing| containment.absorbs(&existing.path, &error.path));

        for mut existing in absorbed {
            error.children.append(&mut existing.children);
            error.children.push(existing);
        }

        result = kept;
        result.push(error);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn record(path: &str) -> ErrorRecord {
        ErrorRecord::new(path, ErrorKind::Type, format!("at {path}"))
    }

    fn paths(records: &[ErrorRecord]) -> Vec<&str> {
        records.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(collapse(Vec::new()).is_empty());
    }

    #[test]
    fn test_unrelated_records_keep_order() {
        let tree = collapse(vec![record(".b"), record(".a"), record(".c")]);
        assert_eq!(paths(&tree), vec![".b", ".a", ".c"]);
        assert!(tree.iter().all(ErrorRecord::is_leaf));
    }

    #[test]
    fn test_later_ancestor_absorbs_descendant() {
        let tree = collapse(vec![record(".a.b"), record(".a")]);
        assert_eq!(paths(&tree), vec![".a"]);
        assert_eq!(paths(&tree[0].children), vec![".a.b"]);
    }

    #[test]
    fn test_earlier_ancestor_does_not_absorb() {
        let tree = collapse(vec![record(".a"), record(".a.b")]);
        assert_eq!(paths(&tree), vec![".a", ".a.b"]);
        assert!(tree.iter().all(ErrorRecord::is_leaf));
    }

    #[test]
    fn test_ancestor_first_chain_stays_flat() {
        let tree = collapse(vec![record(".a"), record(".a.b"), record(".a.b.c")]);
        assert_eq!(paths(&tree), vec![".a", ".a.b", ".a.b.c"]);
    }

    #[test]
    fn test_grandchildren_are_hoisted_before_former_parent() {
        let tree = collapse(vec![record(".a.b.c"), record(".a.b"), record(".a")]);

        assert_eq!(paths(&tree), vec![".a"]);
        assert_eq!(paths(&tree[0].children), vec![".a.b.c", ".a.b"]);
        assert!(tree[0].children.iter().all(ErrorRecord::is_leaf));
    }

    #[test]
    fn test_equal_paths_absorb() {
        let tree = collapse(vec![record(".x"), record(".x")]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn test_root_absorbs_everything_before_it() {
        let tree = collapse(vec![record(".a"), record(".b[0]"), record(""), record(".c")]);
        assert_eq!(paths(&tree), vec!["", ".c"]);
        assert_eq!(paths(&tree[0].children), vec![".a", ".b[0]"]);
    }

    #[test]
    fn test_one_record_absorbs_several_and_keeps_unrelated_in_place() {
        let tree = collapse(vec![
            record(".x.y"),
            record(".z"),
            record(".x.w"),
            record(".x"),
        ]);
        assert_eq!(paths(&tree), vec![".z", ".x"]);
        assert_eq!(paths(&tree[1].children), vec![".x.y", ".x.w"]);
    }

    #[test]
    fn test_existing_children_precede_absorbed_content() {
        let incoming = record(".a").with_children(vec![record(".a.own")]);
        let tree = collapse(vec![record(".a.b"), incoming]);
        assert_eq!(paths(&tree[0].children), vec![".a.own", ".a.b"]);
    }

    #[test]
    fn test_substring_over_absorbs_sibling_names() {
        let tree = collapse(vec![record(".ab"), record(".a")]);
        assert_eq!(paths(&tree), vec![".a"]);
        assert_eq!(paths(&tree[0].children), vec![".ab"]);
    }

    #[test]
    fn test_segment_mode_respects_boundaries() {
        let tree = collapse_with(
            vec![record(".ab"), record(".a.b"), record(".a[0]"), record(".a")],
            Containment::Segment,
        );
        assert_eq!(paths(&tree), vec![".ab", ".a"]);
        assert_eq!(paths(&tree[1].children), vec![".a.b", ".a[0]"]);
    }

    #[test]
    fn test_segment_mode_does_not_match_mid_path() {
        assert!(Containment::Substring.absorbs(".x.a.b", ".a"));
        assert!(!Containment::Segment.absorbs(".x.a.b", ".a"));
        assert!(Containment::Segment.absorbs(".x", ""));
        assert!(Containment::Segment.absorbs(".x", ".x"));
    }
}
