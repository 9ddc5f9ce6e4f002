use tracing::warn;

use crate::{
    diagnostics::Advisory,
    models::{LineRange, OutlineChapter},
};

/// A chapter whose outline ranges have been normalized against the outline's
/// minimum line and validated against the tokenized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChapter {
    pub number: u32,
    pub name: String,
    pub book: String,
    /// Relative to the tokenized lines (1-based).
    pub range: LineRange,
    /// Validated, sorted by start line. Effective end lines are computed by
    /// the section partitioner.
    pub sections: Vec<ResolvedSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSection {
    pub title: String,
    pub start_line: u32,
    pub end_line: Option<u32>,
}

/// The minimum line referenced across the outline's chapter starts. All
/// downstream numbering is `absolute - min_line + 1`.
pub fn min_line(chapters: &[OutlineChapter]) -> u32 {
    chapters.iter().map(|c| c.range.start).min().unwrap_or(1)
}

/// Validates and normalizes every chapter range.
///
/// A nonsensical chapter range skips that chapter with an advisory rather
/// than failing the reconstruction. A section range that escapes its parent
/// chapter is dropped; its verses fall back to the chapter's unsectioned
/// bucket downstream.
pub fn resolve(
    chapters: &[OutlineChapter],
    line_count: usize,
    advisories: &mut Vec<Advisory>,
) -> Vec<ResolvedChapter> {
    let min = min_line(chapters);
    let mut resolved = Vec::new();

    for chapter in chapters {
        let reason = if chapter.range.start < 1 {
            Some("start line below 1".to_string())
        } else if chapter.range.start > chapter.range.end {
            Some(format!(
                "start {} is after end {}",
                chapter.range.start, chapter.range.end
            ))
        } else {
            None
        };
        if let Some(reason) = reason {
            warn!(
                chapter = chapter.number,
                name = %chapter.name,
                %reason,
                "skipping chapter with invalid range"
            );
            advisories.push(Advisory::ChapterSkipped {
                number: chapter.number,
                name: chapter.name.clone(),
                reason,
            });
            continue;
        }

        let range = LineRange::new(
            chapter.range.start - min + 1,
            chapter.range.end - min + 1,
        );
        if range.end as usize > line_count {
            let reason = format!("end line {} is beyond the content ({line_count} lines)", range.end);
            warn!(chapter = chapter.number, name = %chapter.name, %reason, "skipping chapter with invalid range");
            advisories.push(Advisory::ChapterSkipped {
                number: chapter.number,
                name: chapter.name.clone(),
                reason,
            });
            continue;
        }

        let mut sections = Vec::new();
        for section in &chapter.sections {
            if !section_fits(section.start_line, section.end_line, min, range) {
                warn!(
                    chapter = chapter.number,
                    section = %section.title,
                    "dropping section outside its chapter range"
                );
                advisories.push(Advisory::SectionDropped {
                    chapter: chapter.number,
                    title: section.title.clone(),
                });
                continue;
            }
            sections.push(ResolvedSection {
                title: section.title.clone(),
                start_line: section.start_line - min + 1,
                end_line: section.end_line.map(|e| e - min + 1),
            });
        }
        sections.sort_by_key(|s| s.start_line);

        resolved.push(ResolvedChapter {
            number: chapter.number,
            name: chapter.name.clone(),
            book: chapter.book.clone(),
            range,
            sections,
        });
    }

    resolved
}

fn section_fits(start: u32, end: Option<u32>, min: u32, chapter: LineRange) -> bool {
    if start < min {
        return false;
    }
    let rel_start = start - min + 1;
    if !chapter.contains(rel_start) {
        return false;
    }
    match end {
        Some(end) if end < start => false,
        Some(end) => chapter.contains(end - min + 1),
        None => true,
    }
}
