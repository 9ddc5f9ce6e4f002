use std::collections::HashMap;

use crate::{
    markup::{self, MarkerKind},
    models::{Chapter, Footnote},
    registry::TagRegistry,
};

/// The footnote list for one displayed chapter.
///
/// Ordinals restart at 1 for every chapter and are assigned in a single
/// left-to-right sweep over verses in line order, footnote-content and
/// cross-reference markers interleaved by their position in the raw text.
/// Recomputed fully on every chapter switch; never merged across chapters.
#[derive(Debug, Clone, Default)]
pub struct ChapterNotes {
    pub footnotes: Vec<Footnote>,
    ordinals: HashMap<String, u32>,
}

impl ChapterNotes {
    pub fn ordinal_of(&self, id: &str) -> Option<u32> {
        self.ordinals.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.footnotes.is_empty()
    }
}

pub fn collect(chapter: &Chapter, registry: &TagRegistry) -> ChapterNotes {
    let mut notes = ChapterNotes::default();
    let mut ordinal = 0u32;

    for verse in chapter.verses() {
        let mut note_occurrence = 0usize;
        let mut xref_occurrence = 0usize;

        for marker in markup::scan_markers(&verse.raw_text, registry) {
            let (id, content) = match marker.kind {
                MarkerKind::FootnoteContent { inner } => {
                    note_occurrence += 1;
                    (
                        format!(
                            "c{}l{}n{}",
                            chapter.number, verse.line_number, note_occurrence
                        ),
                        verse.raw_text[inner.start..inner.end].to_string(),
                    )
                }
                // Incomplete cross-references register their captured
                // interior text as a footnote too
                MarkerKind::CrossRef { content, .. } => {
                    xref_occurrence += 1;
                    (
                        format!(
                            "c{}l{}x{}",
                            chapter.number, verse.line_number, xref_occurrence
                        ),
                        verse.raw_text[content.start..content.end].trim().to_string(),
                    )
                }
                _ => continue,
            };

            ordinal += 1;
            notes.ordinals.insert(id.clone(), ordinal);
            notes.footnotes.push(Footnote {
                id,
                verse_number: verse.verse_number,
                content,
                ordinal,
            });
        }
    }

    notes
}
