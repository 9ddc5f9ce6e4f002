//! Plain-text rendition of a verse for terminal display.
//!
//! Same span walk as the HTML emitter, but markers collapse to text:
//! footnote and cross-reference markers become `[n]` / `[*]` labels,
//! citation blocks become indented lines, wrappers drop their delimiters.

use super::{RenderOptions, UnderscorePolicy, footnotes::ChapterNotes};
use crate::{
    markup::{MarkerKind, scan_markers},
    models::Verse,
    registry::TagRegistry,
};

pub fn verse_plain_text(
    verse: &Verse,
    chapter_number: u32,
    registry: &TagRegistry,
    options: &RenderOptions,
    notes: &ChapterNotes,
) -> String {
    let spans = scan_markers(&verse.raw_text, registry);
    let mut out = String::new();
    let mut note_occurrence = 0usize;
    let mut xref_occurrence = 0usize;

    for marker in &spans {
        match &marker.kind {
            MarkerKind::Text => {
                let text = &verse.raw_text[marker.span.start..marker.span.end];
                if options.underscore_policy == UnderscorePolicy::Keep {
                    out.push_str(text);
                } else {
                    out.push_str(&text.replace('_', " "));
                }
            }
            MarkerKind::FootnoteContent { .. } => {
                note_occurrence += 1;
                if options.show_footnotes {
                    let id = format!(
                        "c{chapter_number}l{}n{note_occurrence}",
                        verse.line_number
                    );
                    out.push_str(&label(notes.ordinal_of(&id)));
                }
            }
            MarkerKind::CrossRef { complete, .. } => {
                xref_occurrence += 1;
                if options.show_footnotes {
                    let id = format!(
                        "c{chapter_number}l{}x{xref_occurrence}",
                        verse.line_number
                    );
                    let ordinal = if *complete { notes.ordinal_of(&id) } else { None };
                    out.push_str(&label(ordinal));
                }
            }
            MarkerKind::CitationOpen => out.push_str("\n    "),
            MarkerKind::CitationClose => out.push('\n'),
            _ => {}
        }
    }

    out
}

fn label(ordinal: Option<u32>) -> String {
    match ordinal {
        Some(n) => format!("[{n}]"),
        None => "[*]".to_string(),
    }
}
