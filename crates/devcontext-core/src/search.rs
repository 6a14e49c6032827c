//! Corpus search
//!
//! Case-insensitive substring scan over every recognized item in every
//! category. There is no index: each call reads the whole corpus, which is
//! fine for the tens to low hundreds of documents a pattern store holds.

use serde::Serialize;
use tracing::warn;

use crate::catalog::Skipped;
use crate::error::{DevContextError, Result};
use crate::store::DocumentStore;

/// A document whose content contains the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub category: String,
    pub pattern: String,
}

/// Hits plus whatever could not be scanned
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub skipped: Vec<Skipped>,
}

/// Search every document for `query`.
///
/// Hits come out in nested store order (categories outer, items inner).
pub fn search(store: &dyn DocumentStore, query: &str) -> Result<SearchReport> {
    if query.is_empty() {
        return Err(DevContextError::EmptyQuery);
    }

    let needle = query.to_lowercase();
    let mut report = SearchReport {
        query: query.to_string(),
        ..Default::default()
    };

    let categories = match store.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            warn!(error = %e, "search could not enumerate categories");
            report.skipped.push(Skipped::new("", e));
            return Ok(report);
        }
    };

    for category in categories {
        let items = match store.list_items(&category) {
            Ok(items) => items,
            Err(e) => {
                warn!(category = %category, error = %e, "search skipped category");
                report.skipped.push(Skipped::new(category, e));
                continue;
            }
        };

        for item in items {
            match store.read_item(&category, &item.filename) {
                Ok(content) => {
                    if content.to_lowercase().contains(&needle) {
                        report.hits.push(SearchHit {
                            category: category.clone(),
                            pattern: item.name,
                        });
                    }
                }
                Err(e) => {
                    let location = format!("{}/{}", category, item.filename);
                    warn!(item = %location, error = %e, "search skipped item");
                    report.skipped.push(Skipped::new(location, e));
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemEntry, MemoryStore};

    fn corpus() -> MemoryStore {
        MemoryStore::new()
            .with_item("architecture", "frontend.md", "# Frontend\nUse React.")
            .with_item("architecture", "backend.md", "# Backend\nUse Axum.")
            .with_item(
                "components",
                "ui-patterns.md",
                "# UI\nStyle with Tailwind utility classes.",
            )
            .with_item("components", "tokens.json", "{\"color\": \"blue\"}")
    }

    #[test]
    fn finds_case_insensitive_match() {
        let report = search(&corpus(), "tailwind").unwrap();
        assert_eq!(
            report.hits,
            vec![SearchHit {
                category: "components".to_string(),
                pattern: "ui-patterns".to_string(),
            }]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn uppercase_query_matches_lowercase_content() {
        let report = search(&corpus(), "BLUE").unwrap();
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].pattern, "tokens");
    }

    #[test]
    fn returns_every_matching_document() {
        let report = search(&corpus(), "use ").unwrap();
        let mut patterns: Vec<_> = report.hits.iter().map(|h| h.pattern.as_str()).collect();
        patterns.sort();
        assert_eq!(patterns, vec!["backend", "frontend"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let report = search(&corpus(), "kubernetes").unwrap();
        assert!(report.hits.is_empty());
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(
            search(&corpus(), "").unwrap_err(),
            DevContextError::EmptyQuery
        ));
    }

    #[test]
    fn whitespace_query_is_a_literal_substring() {
        let store = corpus().with_item("notes", "spacing.md", "two  spaces");
        let report = search(&store, "  ").unwrap();
        assert_eq!(
            report.hits,
            vec![SearchHit {
                category: "notes".to_string(),
                pattern: "spacing".to_string(),
            }]
        );
    }

    struct UnreadableItem(MemoryStore);

    impl DocumentStore for UnreadableItem {
        fn list_categories(&self) -> Result<Vec<String>> {
            self.0.list_categories()
        }

        fn list_items(&self, category: &str) -> Result<Vec<ItemEntry>> {
            self.0.list_items(category)
        }

        fn read_item(&self, category: &str, filename: &str) -> Result<String> {
            if filename == "frontend.md" {
                return Err(DevContextError::Io {
                    path: filename.into(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
                });
            }
            self.0.read_item(category, filename)
        }
    }

    #[test]
    fn unreadable_item_is_skipped() {
        let report = search(&UnreadableItem(corpus()), "use").unwrap();
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].pattern, "backend");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].location, "architecture/frontend.md");
    }
}
