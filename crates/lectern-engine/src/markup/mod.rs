//! Inline marker recognition.
//!
//! Verse text is scanned once into an ordered span list; every rendering
//! stage then works against structured spans instead of re-matching raw text,
//! so no stage can accidentally re-match another stage's output.

pub mod cursor;
pub mod markers;
pub mod scan;
pub mod span;

pub use scan::{Emphasis, MarkerKind, MarkerSpan, scan_markers};
pub use span::Span;

use crate::registry::TagRegistry;

/// The explicit verse number on a line, if any.
pub fn explicit_verse_number(text: &str) -> Option<u32> {
    scan_markers(text, &TagRegistry::empty())
        .into_iter()
        .find_map(|m| match m.kind {
            MarkerKind::VerseNumber(n) => Some(n),
            _ => None,
        })
}

/// Interior text of every footnote-content marker on a line, left to right.
pub fn footnote_contents(text: &str) -> Vec<String> {
    scan_markers(text, &TagRegistry::empty())
        .into_iter()
        .filter_map(|m| match m.kind {
            MarkerKind::FootnoteContent { inner } => Some(text[inner.start..inner.end].to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_verse_number_found_anywhere_on_line() {
        assert_eq!(explicit_verse_number("<V>12</V>In the beginning"), Some(12));
        assert_eq!(explicit_verse_number("prefix <V>3</V> rest"), Some(3));
        assert_eq!(explicit_verse_number("no marker here"), None);
    }

    #[test]
    fn malformed_verse_marker_is_not_a_number() {
        assert_eq!(explicit_verse_number("<V>abc</V>"), None);
        assert_eq!(explicit_verse_number("<V>12"), None);
    }

    #[test]
    fn footnote_contents_in_order() {
        let contents = footnote_contents("a<FN>first</FN>b<FN>second</FN>");
        assert_eq!(contents, vec!["first".to_string(), "second".to_string()]);
    }
}
