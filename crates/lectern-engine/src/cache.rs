use std::collections::HashMap;

use crate::models::outline::Outline;

/// Caller-owned outline cache, keyed by locator.
///
/// The core never touches this; reconstruction stays a pure function of its
/// inputs. Intended for reader shells that fetch outlines over a network and
/// want to avoid refetching when switching between books of the same source.
pub trait OutlineCache {
    fn get(&self, key: &str) -> Option<&Outline>;
    fn put(&mut self, key: &str, outline: Outline);
    fn invalidate(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryOutlineCache {
    entries: HashMap<String, Outline>,
}

impl MemoryOutlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OutlineCache for MemoryOutlineCache {
    fn get(&self, key: &str) -> Option<&Outline> {
        self.entries.get(key)
    }

    fn put(&mut self, key: &str, outline: Outline) {
        self.entries.insert(key.to_string(), outline);
    }

    fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
