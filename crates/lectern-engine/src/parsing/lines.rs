use thiserror::Error;

use crate::models::RawLine;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content is empty")]
    Empty,
    #[error("requested start line {start} is beyond the content ({lines} lines)")]
    StartBeyondContent { start: u32, lines: usize },
}

/// Splits a content blob into numbered lines.
///
/// Blank lines keep their slot so outline ranges stay aligned with the
/// content; verse assembly skips them later. Trailing `\r` is shed so CRLF
/// sources tokenize identically to LF ones.
pub fn tokenize(blob: &str) -> Result<Vec<RawLine>, ContentError> {
    if blob.trim().is_empty() {
        return Err(ContentError::Empty);
    }
    Ok(blob
        .split('\n')
        .enumerate()
        .map(|(i, text)| RawLine {
            line_number: (i + 1) as u32,
            text: text.strip_suffix('\r').unwrap_or(text).to_string(),
        })
        .collect())
}

/// Tokenizes only the slice covering one book.
///
/// Lines are renumbered from 1 within the slice, matching how book-scoped
/// outline ranges are normalized against the book's minimum line.
pub fn tokenize_book_slice(blob: &str, start: u32, end: u32) -> Result<Vec<RawLine>, ContentError> {
    let all = tokenize(blob)?;
    let start = start.max(1);
    if start as usize > all.len() {
        return Err(ContentError::StartBeyondContent {
            start,
            lines: all.len(),
        });
    }
    let end = (end as usize).min(all.len());
    Ok(all[(start as usize - 1)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| RawLine {
            line_number: (i + 1) as u32,
            text: line.text.clone(),
        })
        .collect())
}
