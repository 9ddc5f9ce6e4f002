//! The document reconstruction pipeline.
//!
//! One pure, synchronous pass over already-fetched data: tokenize the content
//! blob, resolve outline ranges, assemble verses per chapter, partition into
//! sections. Re-running on identical inputs yields identical output; there is
//! no incremental update path and none is needed at page-load content sizes.

pub mod lines;
pub mod ranges;
pub mod sections;
pub mod verses;

pub use lines::{ContentError, tokenize, tokenize_book_slice};

use crate::{
    diagnostics::Advisory,
    models::{Chapter, OutlineChapter},
};

#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Safety ceiling for verses per chapter; a breach is an advisory, not a
    /// failure. Guards against a misconfigured outline silently producing a
    /// pathologically large chapter.
    pub verse_ceiling: usize,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self { verse_ceiling: 200 }
    }
}

/// The reconstructed document plus any non-fatal advisories raised while
/// building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    pub chapters: Vec<Chapter>,
    pub advisories: Vec<Advisory>,
}

/// Runs the full pipeline: content blob + normalized outline chapters →
/// chapters with sections and verses.
///
/// Only an unusable content blob fails; bad outline entries degrade to
/// advisories with the offending chapter or section dropped.
pub fn reconstruct(
    content: &str,
    outline: &[OutlineChapter],
    options: &ReconstructOptions,
) -> Result<Reconstruction, ContentError> {
    let lines = lines::tokenize(content)?;
    let mut advisories = Vec::new();

    let resolved = ranges::resolve(outline, lines.len(), &mut advisories);
    let chapters = resolved
        .iter()
        .map(|chapter| {
            let verses = verses::assemble(&lines, chapter, options.verse_ceiling, &mut advisories);
            Chapter {
                number: chapter.number,
                name: chapter.name.clone(),
                book: chapter.book.clone(),
                sections: sections::partition(verses, chapter),
            }
        })
        .collect();

    Ok(Reconstruction {
        chapters,
        advisories,
    })
}
