use crate::registry::TagRegistry;

use super::{
    cursor::Cursor,
    markers::{ChapterBreak, Citation, CrossRef, FootnoteMark, Shorthand, VerseNumber},
    span::Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Bold,
    Italic,
    Underline,
}

/// One recognized region of a verse's raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    /// Plain text between markers.
    Text,
    /// Explicit verse number with its parsed value.
    VerseNumber(u32),
    /// Chapter boundary marker.
    ChapterBreak,
    /// Footnote content marker; `inner` is the content between delimiters.
    FootnoteContent { inner: Span },
    /// Cross-reference. `complete` is false when the outer close was never
    /// found before the next opening marker or end of text; the captured
    /// `content` is still collected as a footnote in that case.
    CrossRef { content: Span, complete: bool },
    /// Start of a citation + indent block.
    CitationOpen,
    /// End of a citation + indent block.
    CitationClose,
    EmphasisOpen(Emphasis),
    EmphasisClose(Emphasis),
    /// Registry tag open delimiter (index into the registry).
    TagOpen(usize),
    /// Registry tag close delimiter (index into the registry).
    TagClose(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpan {
    pub span: Span,
    pub kind: MarkerKind,
}

/// Scans a verse's raw text into an ordered, non-overlapping span list.
///
/// Built-in markers take precedence over registry tags; anything unmatched
/// (including malformed markers, which restore the cursor) falls through to
/// `Text`. The scanner never fails: arbitrary input yields a span list that
/// covers the whole string.
pub fn scan_markers(s: &str, registry: &TagRegistry) -> Vec<MarkerSpan> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    fn flush_text(out: &mut Vec<MarkerSpan>, start: usize, end: usize) {
        if end > start {
            out.push(MarkerSpan {
                span: Span { start, end },
                kind: MarkerKind::Text,
            });
        }
    }

    while !cur.eof() {
        match try_parse_marker(&mut cur, registry) {
            Some(m) => {
                flush_text(&mut out, text_start, m.span.start);
                text_start = m.span.end;
                out.push(m);
            }
            None => {
                cur.bump();
            }
        }
    }

    flush_text(&mut out, text_start, cur.pos());
    out
}

fn try_parse_marker(cur: &mut Cursor<'_>, registry: &TagRegistry) -> Option<MarkerSpan> {
    if let Some(m) = try_parse_chapter_break(cur) {
        return Some(m);
    }
    if let Some(m) = try_parse_verse_number(cur) {
        return Some(m);
    }
    if let Some(m) = try_parse_footnote(cur) {
        return Some(m);
    }
    if let Some(m) = try_parse_citation(cur) {
        return Some(m);
    }
    if let Some(m) = try_parse_cross_ref(cur) {
        return Some(m);
    }
    if let Some(m) = try_parse_shorthand(cur) {
        return Some(m);
    }
    try_parse_registry_tag(cur, registry)
}

fn try_parse_chapter_break(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    if !cur.starts_with(ChapterBreak::MARKER.as_bytes()) {
        return None;
    }
    let start = cur.pos();
    cur.bump_n(ChapterBreak::MARKER.len());
    Some(MarkerSpan {
        span: Span {
            start,
            end: cur.pos(),
        },
        kind: MarkerKind::ChapterBreak,
    })
}

/// Requires `<V>`, one or more digits, `</V>`. Anything else (missing close,
/// non-digits, overflow) restores the cursor and falls through to text.
fn try_parse_verse_number(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    if !cur.starts_with(VerseNumber::OPEN.as_bytes()) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(VerseNumber::OPEN.len());

    let digits_start = cur.pos();
    while let Some(b) = cur.peek() {
        if !b.is_ascii_digit() {
            break;
        }
        cur.bump();
    }
    let digits_end = cur.pos();

    if digits_end == digits_start || !cur.starts_with(VerseNumber::CLOSE.as_bytes()) {
        *cur = saved;
        return None;
    }
    let Ok(number) = cur.s[digits_start..digits_end].parse::<u32>() else {
        *cur = saved;
        return None;
    };
    cur.bump_n(VerseNumber::CLOSE.len());

    Some(MarkerSpan {
        span: Span {
            start,
            end: cur.pos(),
        },
        kind: MarkerKind::VerseNumber(number),
    })
}

fn try_parse_footnote(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    if !cur.starts_with(FootnoteMark::OPEN.as_bytes()) {
        return None;
    }
    let start = cur.pos();
    let body_start = start + FootnoteMark::OPEN.len();
    // Unclosed footnote markers degrade to literal text
    let rel = cur.s[body_start..].find(FootnoteMark::CLOSE)?;
    let inner = Span {
        start: body_start,
        end: body_start + rel,
    };
    let end = inner.end + FootnoteMark::CLOSE.len();
    cur.i = end;
    Some(MarkerSpan {
        span: Span { start, end },
        kind: MarkerKind::FootnoteContent { inner },
    })
}

fn try_parse_citation(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    let (len, kind) = if cur.starts_with(Citation::OPEN.as_bytes()) {
        (Citation::OPEN.len(), MarkerKind::CitationOpen)
    } else if cur.starts_with(Citation::CLOSE.as_bytes()) {
        (Citation::CLOSE.len(), MarkerKind::CitationClose)
    } else {
        return None;
    };
    let start = cur.pos();
    cur.bump_n(len);
    Some(MarkerSpan {
        span: Span {
            start,
            end: cur.pos(),
        },
        kind,
    })
}

fn try_parse_cross_ref(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    if !cur.starts_with(CrossRef::OPEN.as_bytes()) {
        return None;
    }
    let start = cur.pos();
    let after_open = start + CrossRef::OPEN.len();

    // Recovery never scans past the next opening marker
    let stop = cur.s[after_open..]
        .find(CrossRef::OPEN)
        .map_or(cur.s.len(), |i| after_open + i);

    let region = &cur.s[after_open..stop];
    let (content, end, complete) = match region.find(CrossRef::INNER_CLOSE) {
        Some(gt) => {
            let content_start = after_open + gt + 1;
            match cur.s[content_start..stop].find(CrossRef::OUTER_CLOSE) {
                Some(c) => (
                    Span {
                        start: content_start,
                        end: content_start + c,
                    },
                    content_start + c + CrossRef::OUTER_CLOSE.len(),
                    true,
                ),
                None => (
                    Span {
                        start: content_start,
                        end: stop,
                    },
                    stop,
                    false,
                ),
            }
        }
        None => (
            Span {
                start: after_open,
                end: stop,
            },
            stop,
            false,
        ),
    };

    cur.i = end;
    Some(MarkerSpan {
        span: Span { start, end },
        kind: MarkerKind::CrossRef { content, complete },
    })
}

fn try_parse_shorthand(cur: &mut Cursor<'_>) -> Option<MarkerSpan> {
    const PAIRS: [(&str, MarkerKind); 6] = [
        (Shorthand::BOLD_OPEN, MarkerKind::EmphasisOpen(Emphasis::Bold)),
        (
            Shorthand::BOLD_CLOSE,
            MarkerKind::EmphasisClose(Emphasis::Bold),
        ),
        (
            Shorthand::ITALIC_OPEN,
            MarkerKind::EmphasisOpen(Emphasis::Italic),
        ),
        (
            Shorthand::ITALIC_CLOSE,
            MarkerKind::EmphasisClose(Emphasis::Italic),
        ),
        (
            Shorthand::UNDERLINE_OPEN,
            MarkerKind::EmphasisOpen(Emphasis::Underline),
        ),
        (
            Shorthand::UNDERLINE_CLOSE,
            MarkerKind::EmphasisClose(Emphasis::Underline),
        ),
    ];

    for (pat, kind) in PAIRS {
        if cur.starts_with(pat.as_bytes()) {
            let start = cur.pos();
            cur.bump_n(pat.len());
            return Some(MarkerSpan {
                span: Span {
                    start,
                    end: cur.pos(),
                },
                kind,
            });
        }
    }
    None
}

fn try_parse_registry_tag(cur: &mut Cursor<'_>, registry: &TagRegistry) -> Option<MarkerSpan> {
    for (idx, def) in registry.tags().iter().enumerate() {
        if def.open_delimiter.is_empty() {
            continue;
        }
        if cur.starts_with(def.open_delimiter.as_bytes()) {
            let start = cur.pos();
            cur.bump_n(def.open_delimiter.len());
            return Some(MarkerSpan {
                span: Span {
                    start,
                    end: cur.pos(),
                },
                kind: MarkerKind::TagOpen(idx),
            });
        }
        if !def.close_delimiter.is_empty() && cur.starts_with(def.close_delimiter.as_bytes()) {
            let start = cur.pos();
            cur.bump_n(def.close_delimiter.len());
            return Some(MarkerSpan {
                span: Span {
                    start,
                    end: cur.pos(),
                },
                kind: MarkerKind::TagClose(idx),
            });
        }
    }
    None
}
