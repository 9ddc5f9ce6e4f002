use serde::{Deserialize, Serialize};

/// One physical line of the source blob, 1-based.
///
/// Blank lines keep their slot so outline line ranges stay aligned with the
/// content; verse assembly skips them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub line_number: u32,
    pub text: String,
}

impl RawLine {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An inclusive 1-based line range with `start <= end`.
///
/// Outlines express ranges in their own absolute numbering; the range
/// resolver normalizes them against the minimum line referenced across the
/// outline before they are applied to tokenized lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }
}

/// A footnote discovered in a verse's raw text.
///
/// Ids are deterministic (chapter + source line + per-family occurrence
/// index) so re-running the pipeline on identical input reproduces them
/// exactly, and they stay unique even when malformed source repeats an
/// explicit verse number.
/// `ordinal` is the 1-based chapter-scoped display number; it is assigned by
/// the footnote collector at render time and is `0` until then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub id: String,
    pub verse_number: u32,
    pub content: String,
    pub ordinal: u32,
}

/// A single verse, with its raw (still-marked-up) text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Chapter-scoped number: an explicit `<V>` marker wins, otherwise the
    /// line's 1-based position among the chapter's non-blank lines. Not
    /// validated as unique; malformed source can repeat numbers.
    pub verse_number: u32,
    pub line_number: u32,
    pub raw_text: String,
    pub footnotes: Vec<Footnote>,
    /// Set only on the verse sitting exactly on a section's start line; a
    /// section heading is shown once, not propagated down its verses.
    pub section_title: Option<String>,
}

/// A named run of verses inside a chapter.
///
/// A chapter with no declared sections is exposed as one synthetic
/// unsectioned block (empty title) so renderers always have a groupable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub range: LineRange,
    pub verses: Vec<Verse>,
}

impl Section {
    pub fn is_unsectioned(&self) -> bool {
        self.title.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub book: String,
    pub sections: Vec<Section>,
}

impl Chapter {
    /// All verses across sections, in source line order.
    pub fn verses(&self) -> Vec<&Verse> {
        let mut verses: Vec<&Verse> = self
            .sections
            .iter()
            .flat_map(|s| s.verses.iter())
            .collect();
        verses.sort_by_key(|v| v.line_number);
        verses
    }

    pub fn verse_count(&self) -> usize {
        self.sections.iter().map(|s| s.verses.len()).sum()
    }

    /// Some source files append non-scripture metadata as trailing chapters;
    /// those are rendered as an information page instead of verses.
    pub fn is_information_page(&self) -> bool {
        let name = self.name.to_lowercase();
        name.contains("information") || name.contains("about") || name.contains("intro")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(number: u32, line: u32) -> Verse {
        Verse {
            verse_number: number,
            line_number: line,
            raw_text: String::new(),
            footnotes: vec![],
            section_title: None,
        }
    }

    #[test]
    fn line_range_contains_is_inclusive() {
        let range = LineRange::new(3, 5);
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(6));
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn chapter_verses_are_in_line_order_across_sections() {
        let chapter = Chapter {
            number: 1,
            name: "Genesis 1".into(),
            book: "Genesis".into(),
            sections: vec![
                Section {
                    title: "B".into(),
                    range: LineRange::new(3, 4),
                    verses: vec![verse(3, 3), verse(4, 4)],
                },
                Section {
                    title: "A".into(),
                    range: LineRange::new(1, 2),
                    verses: vec![verse(1, 1), verse(2, 2)],
                },
            ],
        };

        let lines: Vec<u32> = chapter.verses().iter().map(|v| v.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert_eq!(chapter.verse_count(), 4);
    }

    #[test]
    fn information_page_heuristic_is_case_insensitive() {
        let mut chapter = Chapter {
            number: 99,
            name: "Version Information".into(),
            book: "KJV".into(),
            sections: vec![],
        };
        assert!(chapter.is_information_page());

        chapter.name = "ABOUT this text".into();
        assert!(chapter.is_information_page());

        chapter.name = "Introduction".into();
        assert!(chapter.is_information_page());

        chapter.name = "Genesis 1".into();
        assert!(!chapter.is_information_page());
    }

    #[test]
    fn blank_line_detection_trims_whitespace() {
        let line = RawLine {
            line_number: 1,
            text: "   \t ".into(),
        };
        assert!(line.is_blank());
    }
}
