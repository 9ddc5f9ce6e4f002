use std::fs;
use std::path::{Path, PathBuf};

use crate::models::outline::{FormatError, Outline, parse_outline};

/// Retrieval failure for content or outline data. Fatal to the current
/// render; the reader shell surfaces it with a retry affordance.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("content not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Where content blobs and outlines come from.
///
/// The engine only ever sees fetched text; remote transports live behind
/// this trait, and a reconstruction is a pure function of what it returns.
pub trait ContentSource {
    fn fetch_text(&self, locator: &str) -> Result<String, FetchError>;

    fn fetch_outline(&self, locator: &str) -> Result<Outline, OutlineError> {
        let json = self.fetch_text(locator)?;
        Ok(parse_outline(&json)?)
    }
}

/// Local-file content source; locators are paths, optionally resolved
/// against a root directory.
#[derive(Debug, Clone, Default)]
pub struct FsContentSource {
    root: Option<PathBuf>,
}

impl FsContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        match &self.root {
            Some(root) if Path::new(locator).is_relative() => root.join(locator),
            _ => PathBuf::from(locator),
        }
    }
}

impl ContentSource for FsContentSource {
    fn fetch_text(&self, locator: &str) -> Result<String, FetchError> {
        let path = self.resolve(locator);
        if !path.exists() {
            return Err(FetchError::NotFound(path));
        }
        fs::read_to_string(&path).map_err(FetchError::Io)
    }
}
