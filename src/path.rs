//! Dotted section paths.
//!
//! A section name such as `a.b.c` addresses the nested section `a → b → c`.
//! A dot preceded by a backslash is part of the name: `x\.y` is the single
//! section `x.y`, and `\\` stands for one backslash.
//!
//! ```rust
//! use serde_ini::path::{dot_split, escape_segment, join_path, unescape_segment};
//!
//! let segments = dot_split("x\\.y.z");
//! assert_eq!(segments, vec!["x\\.y", "z"]);
//! assert_eq!(unescape_segment(&segments[0]), "x.y");
//! assert_eq!(join_path(&segments), "x\\.y\\.z");
//! assert_eq!(escape_segment("a\\b.c"), "a\\\\b\\.c");
//! ```

/// Key names that must never be written into a document.
const RESERVED_KEYS: [&str; 1] = ["__proto__"];

/// Returns `true` for names that alias an object's structural slot in
/// prototype-based hosts. Such keys are dropped on decode so that documents
/// can be handed to those hosts safely.
#[inline]
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Splits a dotted key on every dot that is not escaped by a backslash.
///
/// A backslash and the character after it always travel together, so a dot is
/// literal exactly when it follows an odd run of backslashes. Segments keep
/// their escapes; use [`unescape_segment`] to get the plain name.
///
/// # Examples
///
/// ```rust
/// use serde_ini::path::dot_split;
///
/// assert_eq!(dot_split("a.b.c"), vec!["a", "b", "c"]);
/// assert_eq!(dot_split("a\\.b"), vec!["a\\.b"]);
/// assert_eq!(dot_split("a\\\\.b"), vec!["a\\\\", "b"]);
/// assert_eq!(dot_split(""), vec![""]);
/// ```
#[must_use]
pub fn dot_split(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = key.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Joins segments with escaped dots. The encoder uses this to turn a key that
/// contains dots into a single section name.
#[must_use]
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\\.")
}

/// Escapes a single name so that it survives [`dot_split`] and
/// [`unescape_segment`] as one segment: `\` becomes `\\` and `.` becomes `\.`.
///
/// The encoder builds child section paths from these.
#[must_use]
pub fn escape_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, '\\' | '.') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Turns every `\.` in a segment into a plain `.` and every `\\` into a single
/// backslash; other escapes are kept.
///
/// # Examples
///
/// ```rust
/// use serde_ini::path::unescape_segment;
///
/// assert_eq!(unescape_segment("x\\.y\\.z"), "x.y.z");
/// assert_eq!(unescape_segment("a\\b"), "a\\b");
/// assert_eq!(unescape_segment("a\\\\"), "a\\");
/// ```
#[must_use]
pub fn unescape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(next @ ('.' | '\\')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(dot_split("log"), vec!["log"]);
        assert_eq!(dot_split("a.b.c"), vec!["a", "b", "c"]);
        assert_eq!(dot_split("a..b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_escaped() {
        assert_eq!(
            dot_split("x\\.y\\.z.a\\.b\\.c"),
            vec!["x\\.y\\.z", "a\\.b\\.c"]
        );
        assert_eq!(dot_split("trailing\\"), vec!["trailing\\"]);
    }

    #[test]
    fn test_split_backslash_parity() {
        // even run: the dot splits
        assert_eq!(dot_split("a\\\\.b"), vec!["a\\\\", "b"]);
        // odd run: the dot is literal
        assert_eq!(dot_split("a\\\\\\.b"), vec!["a\\\\\\.b"]);
    }

    #[test]
    fn test_split_is_lossless() {
        for key in ["a.b.c", "x\\.y.z", "plain", "a\\\\.b", "", "."] {
            assert_eq!(dot_split(key).join("."), key);
        }
    }

    #[test]
    fn test_join_escapes_dots() {
        assert_eq!(join_path(&dot_split("a.b")), "a\\.b");
        assert_eq!(join_path(&["x\\.y", "z"]), "x\\.y\\.z");
        let segments = dot_split(&join_path(&dot_split("a.b")));
        assert_eq!(segments, vec!["a\\.b"]);
        assert_eq!(unescape_segment(&segments[0]), "a.b");
    }

    #[test]
    fn test_escape_segment_is_undone_by_split() {
        for name in ["plain", "a.b", "a\\", "x\\.y", "\\\\.", "C:\\dir", ""] {
            let escaped = escape_segment(name);
            let segments = dot_split(&escaped);
            assert_eq!(segments.len(), 1, "{escaped}");
            assert_eq!(unescape_segment(&segments[0]), name);
        }
    }

    #[test]
    fn test_escaped_child_path_splits_at_the_real_dot() {
        let path = format!("{}.{}", escape_segment("a\\"), escape_segment("q"));
        assert_eq!(path, "a\\\\.q");
        let names: Vec<String> = dot_split(&path).iter().map(|s| unescape_segment(s)).collect();
        assert_eq!(names, vec!["a\\", "q"]);
    }

    #[test]
    fn test_control_characters_are_ordinary() {
        assert_eq!(
            dot_split("\u{1}LITERAL\\1LITERAL\u{2}.b"),
            vec!["\u{1}LITERAL\\1LITERAL\u{2}", "b"]
        );
    }

    #[test]
    fn test_reserved() {
        assert!(is_reserved_key("__proto__"));
        assert!(!is_reserved_key("constructor"));
        assert!(!is_reserved_key("proto"));
    }
}
