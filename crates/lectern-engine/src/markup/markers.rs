//! # Marker Kinds
//!
//! Built-in marker types that own their delimiters. The scanner calls these
//! constants; it never hardcodes `<V>` or `<FN>` inline.

/// Explicit verse number: `<V>` integer `</V>`.
pub struct VerseNumber;

impl VerseNumber {
    pub const OPEN: &'static str = "<V>";
    pub const CLOSE: &'static str = "</V>";
}

/// Chapter boundary: `<CM>`, rendered as a layout divider at verse level.
pub struct ChapterBreak;

impl ChapterBreak {
    pub const MARKER: &'static str = "<CM>";
}

/// Footnote content: `<FN>` content `</FN>`.
pub struct FootnoteMark;

impl FootnoteMark {
    pub const OPEN: &'static str = "<FN>";
    pub const CLOSE: &'static str = "</FN>";
}

/// Cross-reference, a two-level pair: `<XR` anchor `>` content `</XR>`.
///
/// The anchor between `<XR` and the inner close is dropped from output; the
/// content becomes a collected footnote. The outer close is allowed to be
/// missing (dirty source data); recovery captures up to the next opening
/// marker or end of text.
pub struct CrossRef;

impl CrossRef {
    pub const OPEN: &'static str = "<XR";
    pub const INNER_CLOSE: char = '>';
    pub const OUTER_CLOSE: &'static str = "</XR>";
}

/// Citation + indent nesting: `<CL><PI>` ... `</PI></CL>`, a fixed structural
/// idiom independent of the configurable tag registry.
pub struct Citation;

impl Citation {
    pub const OPEN: &'static str = "<CL><PI>";
    pub const CLOSE: &'static str = "</PI></CL>";
}

/// Bold/italic/underline shorthand, normalized to semantic elements.
pub struct Shorthand;

impl Shorthand {
    pub const BOLD_OPEN: &'static str = "<B>";
    pub const BOLD_CLOSE: &'static str = "</B>";
    pub const ITALIC_OPEN: &'static str = "<I>";
    pub const ITALIC_CLOSE: &'static str = "</I>";
    pub const UNDERLINE_OPEN: &'static str = "<U>";
    pub const UNDERLINE_CLOSE: &'static str = "</U>";
}
