pub mod book;
pub mod outline;

pub use book::{Chapter, Footnote, LineRange, RawLine, Section, Verse};
pub use outline::{FormatError, Outline, OutlineChapter, OutlineSection, parse_outline};
