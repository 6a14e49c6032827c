//! Document store access
//!
//! A store is a two-level namespace: categories at the top, items (documents)
//! inside each category. Only `.md` and `.json` items are visible; everything
//! else in a category is ignored.
//!
//! ```text
//! patterns/
//! ├── architecture/
//! │   ├── frontend.md
//! │   └── backend.md
//! └── components/
//!     ├── ui-patterns.md
//!     └── tokens.json
//! ```
//!
//! Enumeration order is whatever the backing store yields. [`FsStore`] follows
//! the directory listing order, which is unspecified; callers that need a
//! stable order must sort.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use std::path::Path;

use serde::Serialize;

use crate::error::{DevContextError, Result};

/// Recognized item formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Markdown,
    Json,
}

impl ItemKind {
    /// Map a file extension (without the dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::Json => "application/json",
        }
    }
}

/// A document inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemEntry {
    /// File name including extension (unique within a category)
    pub filename: String,
    /// File name without extension (not necessarily unique)
    pub name: String,
    pub kind: ItemKind,
}

impl ItemEntry {
    /// Build an entry from a file name, or `None` if the extension is not recognized.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let path = Path::new(filename);
        let kind = ItemKind::from_extension(path.extension()?.to_str()?)?;
        let name = path.file_stem()?.to_str()?;
        if name.is_empty() {
            return None;
        }
        Some(Self {
            filename: filename.to_string(),
            name: name.to_string(),
            kind,
        })
    }
}

/// Read-only access to a categorized document store
pub trait DocumentStore: Send + Sync {
    /// Every category at the root, in store order.
    fn list_categories(&self) -> Result<Vec<String>>;

    /// Recognized items directly inside `category`, in store order.
    ///
    /// Fails with `CategoryNotFound` when the category does not exist.
    fn list_items(&self, category: &str) -> Result<Vec<ItemEntry>>;

    /// Full text of one item.
    ///
    /// Fails with `NotFound` when the category or file is absent and with
    /// `Io` for any other read failure.
    fn read_item(&self, category: &str, filename: &str) -> Result<String>;

    fn has_category(&self, category: &str) -> bool {
        self.list_categories()
            .map(|categories| categories.iter().any(|c| c == category))
            .unwrap_or(false)
    }
}

/// Reject keys that could escape the store root.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0');

    if invalid {
        return Err(DevContextError::InvalidName {
            name: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_entry_from_markdown() {
        let entry = ItemEntry::from_filename("frontend.md").unwrap();
        assert_eq!(entry.name, "frontend");
        assert_eq!(entry.kind, ItemKind::Markdown);
        assert_eq!(entry.kind.content_type(), "text/markdown");
    }

    #[test]
    fn item_entry_keeps_inner_dots() {
        let entry = ItemEntry::from_filename("api.v2.json").unwrap();
        assert_eq!(entry.name, "api.v2");
        assert_eq!(entry.kind, ItemKind::Json);
        assert_eq!(entry.kind.content_type(), "application/json");
    }

    #[test]
    fn item_entry_rejects_other_extensions() {
        assert!(ItemEntry::from_filename("notes.txt").is_none());
        assert!(ItemEntry::from_filename("README").is_none());
        assert!(ItemEntry::from_filename("image.MD").is_none());
        assert!(ItemEntry::from_filename(".md").is_none());
    }

    #[test]
    fn validate_key_rejects_traversal() {
        assert!(validate_key("architecture").is_ok());
        assert!(validate_key("ui-patterns.md").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
    }
}
