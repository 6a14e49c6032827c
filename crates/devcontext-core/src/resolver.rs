//! Pattern resolution
//!
//! Maps a `(category, pattern)` pair to exactly one stored item:
//!
//! 1. exact match on the item name (markdown preferred over JSON when both exist)
//! 2. otherwise the first filename, in lexical order, that contains the pattern
//!
//! Candidates are sorted before matching so the fallback does not depend on
//! directory listing order.

use serde::Serialize;

use crate::error::{DevContextError, Result};
use crate::store::{validate_key, DocumentStore, ItemEntry};

/// How a pattern name was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Substring,
}

/// A resolved pattern with its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPattern {
    pub category: String,
    pub item: ItemEntry,
    pub match_kind: MatchKind,
    pub content: String,
}

/// Pick the matching item without reading it.
pub fn find_item(items: &[ItemEntry], pattern_name: &str) -> Option<(ItemEntry, MatchKind)> {
    let mut candidates: Vec<&ItemEntry> = items.iter().collect();
    candidates.sort_by(|a, b| a.filename.cmp(&b.filename));

    let exact = candidates
        .iter()
        .filter(|item| item.name == pattern_name)
        .min_by_key(|item| item.kind);
    if let Some(item) = exact {
        return Some(((*item).clone(), MatchKind::Exact));
    }

    candidates
        .into_iter()
        .find(|item| item.filename.contains(pattern_name))
        .map(|item| (item.clone(), MatchKind::Substring))
}

/// Resolve `pattern_name` inside `category` and read its content.
pub fn resolve_pattern(
    store: &dyn DocumentStore,
    category: &str,
    pattern_name: &str,
) -> Result<ResolvedPattern> {
    validate_key(category)?;
    if pattern_name.is_empty() {
        return Err(DevContextError::InvalidName {
            name: pattern_name.to_string(),
        });
    }

    let items = store.list_items(category)?;

    let Some((item, match_kind)) = find_item(&items, pattern_name) else {
        return Err(DevContextError::NotFoundInCategory {
            category: category.to_string(),
            pattern: pattern_name.to_string(),
            available: items.into_iter().map(|i| i.name).collect(),
        });
    };

    let content = store.read_item(category, &item.filename)?;

    Ok(ResolvedPattern {
        category: category.to_string(),
        item,
        match_kind,
        content,
    })
}
