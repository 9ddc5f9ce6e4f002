use thiserror::Error;

/// Non-fatal conditions surfaced alongside a reconstruction.
///
/// Advisories never abort the pipeline: a bad chapter range drops that
/// chapter, a bad section range drops that section, and a verse-count breach
/// only warns. Callers decide whether to show them (the reader surfaces them
/// as a dismissible banner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Advisory {
    #[error("chapter {number} ({name}) has an invalid line range and was skipped: {reason}")]
    ChapterSkipped {
        number: u32,
        name: String,
        reason: String,
    },
    #[error("section \"{title}\" in chapter {chapter} falls outside its chapter range and was dropped")]
    SectionDropped { chapter: u32, title: String },
    #[error("chapter {chapter} verse count exceeds expected bound: {count} > {ceiling}")]
    VerseCountExceeded {
        chapter: u32,
        count: usize,
        ceiling: usize,
    },
}
