//! In-memory store
//!
//! Holds a fixed bundle of documents. Useful for embedding a corpus into a
//! binary and for tests that don't need a directory tree. Enumeration is
//! lexical.

use std::collections::BTreeMap;

use super::{validate_key, DocumentStore, ItemEntry};
use crate::error::{DevContextError, Result};

/// Store backed by nested maps (category -> filename -> content)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    categories: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty category
    pub fn with_category(mut self, category: &str) -> Self {
        self.categories.entry(category.to_string()).or_default();
        self
    }

    /// Add a document, creating its category if needed
    pub fn with_item(mut self, category: &str, filename: &str, content: &str) -> Self {
        self.insert(category, filename, content);
        self
    }

    pub fn insert(&mut self, category: &str, filename: &str, content: &str) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(filename.to_string(), content.to_string());
    }
}

impl DocumentStore for MemoryStore {
    fn list_categories(&self) -> Result<Vec<String>> {
        Ok(self.categories.keys().cloned().collect())
    }

    fn list_items(&self, category: &str) -> Result<Vec<ItemEntry>> {
        validate_key(category)?;
        let files = self
            .categories
            .get(category)
            .ok_or_else(|| DevContextError::CategoryNotFound {
                category: category.to_string(),
            })?;

        Ok(files
            .keys()
            .filter_map(|filename| ItemEntry::from_filename(filename))
            .collect())
    }

    fn read_item(&self, category: &str, filename: &str) -> Result<String> {
        validate_key(category)?;
        validate_key(filename)?;
        self.categories
            .get(category)
            .and_then(|files| files.get(filename))
            .cloned()
            .ok_or_else(|| DevContextError::NotFound {
                category: category.to_string(),
                filename: filename.to_string(),
            })
    }

    fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_lexically() {
        let store = MemoryStore::new()
            .with_item("b", "z.md", "")
            .with_item("a", "y.md", "")
            .with_item("a", "x.json", "{}")
            .with_item("a", "skip.txt", "");

        assert_eq!(store.list_categories().unwrap(), vec!["a", "b"]);
        let names: Vec<_> = store
            .list_items("a")
            .unwrap()
            .into_iter()
            .map(|i| i.filename)
            .collect();
        assert_eq!(names, vec!["x.json", "y.md"]);
    }

    #[test]
    fn empty_category_exists() {
        let store = MemoryStore::new().with_category("empty");
        assert!(store.has_category("empty"));
        assert!(store.list_items("empty").unwrap().is_empty());
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = MemoryStore::new().with_item("a", "x.md", "hello");
        assert_eq!(store.read_item("a", "x.md").unwrap(), "hello");
        assert!(matches!(
            store.read_item("a", "y.md").unwrap_err(),
            DevContextError::NotFound { .. }
        ));
        assert!(matches!(
            store.read_item("b", "x.md").unwrap_err(),
            DevContextError::NotFound { .. }
        ));
    }
}
