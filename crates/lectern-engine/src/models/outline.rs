//! Outline JSON handling.
//!
//! Two wire shapes are accepted: a flat `{ chapters: [...] }` document and a
//! nested `{ categories: [{ books: [{ chapters: [...] }] }] }` document. Both
//! are normalized here, once, at the boundary; the core only ever sees
//! [`OutlineChapter`] / [`OutlineSection`].

use serde::Deserialize;
use thiserror::Error;

use super::book::LineRange;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("outline JSON is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("outline has neither `chapters` nor `categories`")]
    UnknownShape,
}

/// Normalized outline entry for one chapter. Line numbers are the outline's
/// own absolute numbering; the range resolver converts them to offsets
/// relative to the minimum line referenced across the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineChapter {
    pub number: u32,
    pub name: String,
    pub book: String,
    pub range: LineRange,
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSection {
    pub title: String,
    pub start_line: u32,
    /// Defaults downstream to the next section's start minus one, or the
    /// chapter's end for the last section.
    pub end_line: Option<u32>,
}

/// A fully normalized outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub title: String,
    pub chapters: Vec<OutlineChapter>,
}

impl Outline {
    /// Book names in first-appearance order, deduplicated.
    pub fn books(&self) -> Vec<String> {
        let mut books = Vec::new();
        for chapter in &self.chapters {
            if !books.contains(&chapter.book) {
                books.push(chapter.book.clone());
            }
        }
        books
    }

    pub fn chapters_for_book(&self, book: &str) -> Vec<&OutlineChapter> {
        self.chapters.iter().filter(|c| c.book == book).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatOutline {
    #[serde(default)]
    title: String,
    chapters: Vec<FlatChapter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatChapter {
    number: u32,
    name: String,
    book: String,
    start_line: u32,
    end_line: u32,
    #[serde(default)]
    sections: Vec<FlatSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlatSection {
    title: String,
    start_line: u32,
    end_line: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct NestedOutline {
    #[serde(default)]
    title: String,
    categories: Vec<NestedCategory>,
}

#[derive(Debug, Deserialize)]
struct NestedCategory {
    #[allow(dead_code)]
    name: String,
    books: Vec<NestedBook>,
}

#[derive(Debug, Deserialize)]
struct NestedBook {
    name: String,
    chapters: Vec<NestedChapter>,
}

#[derive(Debug, Deserialize)]
struct NestedChapter {
    chapter: u32,
    start_line: u32,
    end_line: u32,
    #[serde(default)]
    sections: Vec<NestedSection>,
}

#[derive(Debug, Deserialize)]
struct NestedSection {
    title: String,
    start_line: u32,
    end_line: Option<u32>,
}

/// Parse an outline JSON document of either accepted shape.
pub fn parse_outline(json: &str) -> Result<Outline, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.get("chapters").is_some() {
        let flat: FlatOutline = serde_json::from_value(value)?;
        Ok(normalize_flat(flat))
    } else if value.get("categories").is_some() {
        let nested: NestedOutline = serde_json::from_value(value)?;
        Ok(normalize_nested(nested))
    } else {
        Err(FormatError::UnknownShape)
    }
}

fn normalize_flat(flat: FlatOutline) -> Outline {
    let chapters = flat
        .chapters
        .into_iter()
        .map(|c| OutlineChapter {
            number: c.number,
            name: c.name,
            book: c.book,
            range: LineRange::new(c.start_line, c.end_line),
            sections: c
                .sections
                .into_iter()
                .map(|s| OutlineSection {
                    title: s.title,
                    start_line: s.start_line,
                    end_line: s.end_line,
                })
                .collect(),
        })
        .collect();
    Outline {
        title: flat.title,
        chapters,
    }
}

fn normalize_nested(nested: NestedOutline) -> Outline {
    let mut chapters = Vec::new();
    for category in nested.categories {
        for book in category.books {
            for c in &book.chapters {
                chapters.push(OutlineChapter {
                    number: c.chapter,
                    name: format!("{} {}", book.name, c.chapter),
                    book: book.name.clone(),
                    range: LineRange::new(c.start_line, c.end_line),
                    sections: c
                        .sections
                        .iter()
                        .map(|s| OutlineSection {
                            title: s.title.clone(),
                            start_line: s.start_line,
                            end_line: s.end_line,
                        })
                        .collect(),
                });
            }
        }
    }
    Outline {
        title: nested.title,
        chapters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_flat_outline() {
        let json = r#"{
            "title": "Sample",
            "chapters": [
                {
                    "number": 1,
                    "name": "Genesis 1",
                    "book": "Genesis",
                    "startLine": 1,
                    "endLine": 31,
                    "sections": [
                        { "title": "Creation", "startLine": 1, "endLine": 25 },
                        { "title": "Mankind", "startLine": 26 }
                    ]
                }
            ]
        }"#;

        let outline = parse_outline(json).unwrap();
        assert_eq!(outline.title, "Sample");
        assert_eq!(outline.chapters.len(), 1);

        let chapter = &outline.chapters[0];
        assert_eq!(chapter.number, 1);
        assert_eq!(chapter.book, "Genesis");
        assert_eq!(chapter.range, LineRange::new(1, 31));
        assert_eq!(chapter.sections.len(), 2);
        assert_eq!(chapter.sections[1].end_line, None);
    }

    #[test]
    fn parses_nested_outline() {
        let json = r#"{
            "title": "Nested",
            "categories": [
                {
                    "name": "Old Testament",
                    "books": [
                        {
                            "name": "Genesis",
                            "chapters": [
                                { "chapter": 1, "start_line": 1, "end_line": 31, "sections": [] },
                                { "chapter": 2, "start_line": 32, "end_line": 56 }
                            ]
                        }
                    ]
                }
            ]
        }"#;

        let outline = parse_outline(json).unwrap();
        assert_eq!(outline.chapters.len(), 2);
        assert_eq!(outline.chapters[0].name, "Genesis 1");
        assert_eq!(outline.chapters[1].range, LineRange::new(32, 56));
        assert_eq!(outline.books(), vec!["Genesis".to_string()]);
    }

    #[test]
    fn rejects_outline_with_neither_shape() {
        let result = parse_outline(r#"{ "title": "empty" }"#);
        assert!(matches!(result, Err(FormatError::UnknownShape)));
    }

    #[test]
    fn rejects_invalid_json() {
        let result = parse_outline("not json at all");
        assert!(matches!(result, Err(FormatError::Json(_))));
    }

    #[test]
    fn chapters_for_book_filters_by_name() {
        let json = r#"{
            "chapters": [
                { "number": 1, "name": "Genesis 1", "book": "Genesis", "startLine": 1, "endLine": 3 },
                { "number": 1, "name": "Exodus 1", "book": "Exodus", "startLine": 4, "endLine": 6 }
            ]
        }"#;

        let outline = parse_outline(json).unwrap();
        assert_eq!(outline.books(), vec!["Genesis", "Exodus"]);
        assert_eq!(outline.chapters_for_book("Exodus").len(), 1);
        assert_eq!(outline.chapters_for_book("Ruth").len(), 0);
    }
}
