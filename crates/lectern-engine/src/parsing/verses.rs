use tracing::warn;

use super::ranges::ResolvedChapter;
use crate::{
    diagnostics::Advisory,
    markup,
    models::{Footnote, RawLine, Verse},
};

/// Builds the verses for one chapter from the tokenized lines in its range.
///
/// Numbering: an unmarked line takes its 1-based position among the chapter's
/// non-blank lines; an explicit `<V>` marker overrides the value without
/// shifting the positions of later unmarked lines. Positions restart for
/// every chapter. Collisions are not validated; malformed source can repeat
/// a number.
pub fn assemble(
    lines: &[RawLine],
    chapter: &ResolvedChapter,
    verse_ceiling: usize,
    advisories: &mut Vec<Advisory>,
) -> Vec<Verse> {
    let mut verses = Vec::new();
    let mut position: u32 = 0;

    let start = (chapter.range.start - 1) as usize;
    let end = (chapter.range.end as usize).min(lines.len());

    for line in &lines[start..end] {
        if line.is_blank() {
            continue;
        }
        position += 1;

        let verse_number = markup::explicit_verse_number(&line.text).unwrap_or(position);

        let footnotes = markup::footnote_contents(&line.text)
            .into_iter()
            .enumerate()
            .map(|(i, content)| Footnote {
                id: format!("c{}l{}n{}", chapter.number, line.line_number, i + 1),
                verse_number,
                content,
                ordinal: 0,
            })
            .collect();

        let section_title = chapter
            .sections
            .iter()
            .find(|s| s.start_line == line.line_number)
            .map(|s| s.title.clone());

        verses.push(Verse {
            verse_number,
            line_number: line.line_number,
            raw_text: line.text.clone(),
            footnotes,
            section_title,
        });
    }

    if verses.len() > verse_ceiling {
        warn!(
            chapter = chapter.number,
            count = verses.len(),
            verse_ceiling,
            "chapter verse count exceeds expected bound"
        );
        advisories.push(Advisory::VerseCountExceeded {
            chapter: chapter.number,
            count: verses.len(),
            ceiling: verse_ceiling,
        });
    }

    verses
}
