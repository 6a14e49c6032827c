//! Resource catalog
//!
//! Projects every recognized item in the store into an addressable
//! [`Resource`]. Listing is best-effort: a category that cannot be enumerated
//! is recorded in [`CatalogListing::skipped`] and the walk moves on.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::store::{DocumentStore, ItemEntry};
use crate::uri::ResourceUri;

/// An enumerable projection of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub uri: String,
    pub display_name: String,
    pub description: String,
    pub content_type: String,
}

impl Resource {
    pub fn new(scheme: &str, category: &str, item: &ItemEntry) -> Self {
        Self {
            uri: ResourceUri::format(scheme, category, &item.filename),
            display_name: format!("{}/{}", category, item.filename),
            description: format!("Context pattern for {} - {}", category, item.name),
            content_type: item.kind.content_type().to_string(),
        }
    }
}

/// A part of the store that could not be enumerated or read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    /// `category` or `category/filename`; empty for the store root
    pub location: String,
    pub reason: String,
}

impl Skipped {
    pub fn new(location: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result of a best-effort catalog walk
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogListing {
    pub resources: Vec<Resource>,
    pub skipped: Vec<Skipped>,
}

impl CatalogListing {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// List every resource in the store. Never fails.
pub fn list_resources(store: &dyn DocumentStore, scheme: &str) -> CatalogListing {
    let mut listing = CatalogListing::default();

    let categories = match store.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            listing.skipped.push(Skipped::new("", e));
            return listing;
        }
    };

    for category in categories {
        match store.list_items(&category) {
            Ok(items) => {
                debug!(category = %category, count = items.len(), "listed category");
                listing.resources.extend(
                    items
                        .iter()
                        .map(|item| Resource::new(scheme, &category, item)),
                );
            }
            Err(e) => listing.skipped.push(Skipped::new(category, e)),
        }
    }

    listing
}

/// Names of the patterns in one category, in store order.
pub fn list_patterns(store: &dyn DocumentStore, category: &str) -> Result<Vec<String>> {
    Ok(store
        .list_items(category)?
        .into_iter()
        .map(|item| item.name)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DevContextError;
    use crate::store::MemoryStore;

    struct FailingCategory {
        inner: MemoryStore,
        broken: &'static str,
    }

    impl DocumentStore for FailingCategory {
        fn list_categories(&self) -> Result<Vec<String>> {
            self.inner.list_categories()
        }

        fn list_items(&self, category: &str) -> Result<Vec<ItemEntry>> {
            if category == self.broken {
                return Err(DevContextError::Io {
                    path: category.into(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.inner.list_items(category)
        }

        fn read_item(&self, category: &str, filename: &str) -> Result<String> {
            self.inner.read_item(category, filename)
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_item("architecture", "frontend.md", "# Frontend")
            .with_item("architecture", "backend.md", "# Backend")
            .with_item("components", "tokens.json", "{}")
            .with_item("components", "notes.txt", "ignored")
    }

    #[test]
    fn builds_resource_fields() {
        let listing = list_resources(&store(), "devcontext");
        assert!(listing.is_complete());
        assert_eq!(listing.resources.len(), 3);

        let frontend = listing
            .resources
            .iter()
            .find(|r| r.display_name == "architecture/frontend.md")
            .unwrap();
        assert_eq!(frontend.uri, "devcontext://architecture/frontend.md");
        assert_eq!(
            frontend.description,
            "Context pattern for architecture - frontend"
        );
        assert_eq!(frontend.content_type, "text/markdown");

        let tokens = listing
            .resources
            .iter()
            .find(|r| r.display_name == "components/tokens.json")
            .unwrap();
        assert_eq!(tokens.content_type, "application/json");
    }

    #[test]
    fn never_lists_unrecognized_extensions() {
        let listing = list_resources(&store(), "devcontext");
        assert!(listing
            .resources
            .iter()
            .all(|r| r.uri.ends_with(".md") || r.uri.ends_with(".json")));
    }

    #[test]
    fn failing_category_is_skipped() {
        let store = FailingCategory {
            inner: store(),
            broken: "architecture",
        };
        let listing = list_resources(&store, "devcontext");
        assert_eq!(listing.resources.len(), 1);
        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].location, "architecture");
        assert!(listing.skipped[0].reason.contains("denied"));
    }

    #[test]
    fn list_patterns_for_category() {
        let mut names = list_patterns(&store(), "architecture").unwrap();
        names.sort();
        assert_eq!(names, vec!["backend", "frontend"]);

        assert!(matches!(
            list_patterns(&store(), "missing").unwrap_err(),
            DevContextError::CategoryNotFound { .. }
        ));
    }
}
