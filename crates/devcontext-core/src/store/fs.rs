//! Filesystem-backed store
//!
//! Categories are the directories directly under the root; items are the
//! recognized files directly inside each category directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{validate_key, DocumentStore, ItemEntry};
use crate::error::{DevContextError, Result};

/// Store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for `category`; hidden names are never categories.
    fn category_dir(&self, category: &str) -> Result<PathBuf> {
        validate_key(category)?;
        if is_hidden(category) {
            return Err(DevContextError::CategoryNotFound {
                category: category.to_string(),
            });
        }
        Ok(self.root.join(category))
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

impl DocumentStore for FsStore {
    fn list_categories(&self) -> Result<Vec<String>> {
        let entries =
            fs::read_dir(&self.root).map_err(|e| DevContextError::io(&self.root, e))?;

        let mut categories = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DevContextError::io(&self.root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %path.display(), "skipping non UTF-8 category name");
                continue;
            };
            if is_hidden(&name) {
                continue;
            }
            categories.push(name);
        }

        Ok(categories)
    }

    fn list_items(&self, category: &str) -> Result<Vec<ItemEntry>> {
        let dir = self.category_dir(category)?;
        if !dir.is_dir() {
            return Err(DevContextError::CategoryNotFound {
                category: category.to_string(),
            });
        }

        let mut items = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| DevContextError::io(&dir, e))? {
            let entry = entry.map_err(|e| DevContextError::io(&dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if let Some(item) = ItemEntry::from_filename(&filename) {
                items.push(item);
            }
        }

        Ok(items)
    }

    fn read_item(&self, category: &str, filename: &str) -> Result<String> {
        validate_key(filename)?;
        let not_found = || DevContextError::NotFound {
            category: category.to_string(),
            filename: filename.to_string(),
        };
        let path = self
            .category_dir(category)
            .map_err(|e| match e {
                DevContextError::CategoryNotFound { .. } => not_found(),
                e => e,
            })?
            .join(filename);

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(),
            _ => DevContextError::io(&path, e),
        })
    }

    fn has_category(&self, category: &str) -> bool {
        self.category_dir(category)
            .map(|dir| dir.is_dir())
            .unwrap_or(false)
    }
}
