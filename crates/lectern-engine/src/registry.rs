use serde::{Deserialize, Serialize};

/// One externally configured inline markup tag.
///
/// The registry is supplied by configuration and consumed read-only by the
/// renderer; the engine never invents or mutates tag definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDefinition {
    pub name: String,
    pub open_delimiter: String,
    /// Empty means the tag carries no content: only the literal open
    /// delimiter is matched, and no trailing text is consumed.
    #[serde(default)]
    pub close_delimiter: String,
    /// CSS class the wrapped text is styled with. Empty falls back to a
    /// semantic element chosen from the tag name.
    #[serde(default)]
    pub style_class: String,
    /// Ignored tags are stripped from the output instead of wrapped.
    #[serde(default)]
    pub ignored: bool,
}

impl TagDefinition {
    pub fn is_self_closing(&self) -> bool {
        self.close_delimiter.is_empty()
    }
}

/// The recognized inline tags, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRegistry {
    tags: Vec<TagDefinition>,
}

impl TagRegistry {
    pub fn new(tags: Vec<TagDefinition>) -> Self {
        Self { tags }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[TagDefinition] {
        &self.tags
    }

    pub fn get(&self, index: usize) -> Option<&TagDefinition> {
        self.tags.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}
