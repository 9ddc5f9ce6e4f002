use super::ranges::ResolvedChapter;
use crate::models::{LineRange, Section, Verse};

/// Groups a chapter's verses into its declared sections.
///
/// Sections arrive sorted by start line; a missing end line defaults to the
/// next section's start minus one, or the chapter's end for the last.
/// Declared sections with no matching verses are kept empty so callers can
/// decide whether to hide them. When ranges genuinely overlap, the last
/// declared section wins any verse claimed by both. Verses no declared
/// section claims, and chapters with no declared sections at all, end up in
/// an untitled unsectioned block.
pub fn partition(verses: Vec<Verse>, chapter: &ResolvedChapter) -> Vec<Section> {
    if chapter.sections.is_empty() {
        return vec![Section {
            title: String::new(),
            range: chapter.range,
            verses,
        }];
    }

    let ranges: Vec<(String, LineRange)> = chapter
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let end = s.end_line.unwrap_or_else(|| {
                chapter
                    .sections
                    .get(i + 1)
                    .map_or(chapter.range.end, |next| next.start_line.saturating_sub(1))
            });
            (s.title.clone(), LineRange::new(s.start_line, end))
        })
        .collect();

    let mut assignment: Vec<Option<usize>> = vec![None; verses.len()];
    for (si, (_, range)) in ranges.iter().enumerate() {
        for (vi, verse) in verses.iter().enumerate() {
            if range.contains(verse.line_number) {
                assignment[vi] = Some(si);
            }
        }
    }

    let mut sections: Vec<Section> = ranges
        .into_iter()
        .map(|(title, range)| Section {
            title,
            range,
            verses: Vec::new(),
        })
        .collect();

    let mut unclaimed = Vec::new();
    for (vi, verse) in verses.into_iter().enumerate() {
        match assignment[vi] {
            Some(si) => sections[si].verses.push(verse),
            None => unclaimed.push(verse),
        }
    }
    if !unclaimed.is_empty() {
        sections.push(Section {
            title: String::new(),
            range: chapter.range,
            verses: unclaimed,
        });
    }

    sections
}
