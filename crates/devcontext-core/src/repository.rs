//! Pattern repository
//!
//! The single entry point the front ends talk to. A repository owns its store
//! and the settings needed to address and template its documents; it holds no
//! mutable state, so one value can be shared freely between callers.

use std::path::Path;

use serde::Serialize;

use crate::catalog::{self, CatalogListing};
use crate::config::{Config, TemplatesConfig};
use crate::error::Result;
use crate::resolver::{self, ResolvedPattern};
use crate::search::{self, SearchReport};
use crate::section;
use crate::store::{DocumentStore, FsStore};
use crate::uri::{ResourceUri, DEFAULT_SCHEME};

/// Content of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceContent {
    pub uri: String,
    pub content_type: String,
    pub text: String,
}

/// Section of the templates document for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSection {
    pub topic: String,
    /// `category/filename` of the document the section came from
    pub source: String,
    pub text: String,
    /// False when the topic had no section and `text` is the whole document
    pub matched: bool,
}

pub struct PatternRepository {
    store: Box<dyn DocumentStore>,
    scheme: String,
    templates: TemplatesConfig,
}

impl PatternRepository {
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            scheme: DEFAULT_SCHEME.to_string(),
            templates: TemplatesConfig::default(),
        }
    }

    /// Filesystem repository configured from `config`
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        Self::new(FsStore::new(config.patterns_root(base_dir)))
            .with_scheme(&config.store.scheme)
            .with_templates(config.templates.clone())
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn with_templates(mut self, templates: TemplatesConfig) -> Self {
        self.templates = templates;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Category keys in store order
    pub fn list_categories(&self) -> Result<Vec<String>> {
        self.store.list_categories()
    }

    /// Every resource in the store (best-effort)
    pub fn list_resources(&self) -> CatalogListing {
        catalog::list_resources(self.store(), &self.scheme)
    }

    /// Pattern names in one category
    pub fn list_patterns(&self, category: &str) -> Result<Vec<String>> {
        catalog::list_patterns(self.store(), category)
    }

    /// Content of the resource addressed by `uri`
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContent> {
        let parsed = ResourceUri::parse(&self.scheme, uri)?;
        let text = self
            .store
            .read_item(&parsed.category, &parsed.item.filename)?;

        Ok(ResourceContent {
            uri: parsed.to_string(),
            content_type: parsed.item.kind.content_type().to_string(),
            text,
        })
    }

    /// Exact-then-substring lookup of one pattern
    pub fn resolve_pattern(&self, category: &str, pattern_name: &str) -> Result<ResolvedPattern> {
        resolver::resolve_pattern(self.store(), category, pattern_name)
    }

    /// Case-insensitive substring search over the whole corpus
    pub fn search(&self, query: &str) -> Result<SearchReport> {
        search::search(self.store(), query)
    }

    /// Section of the templates document for `topic`
    pub fn template_section(&self, topic: &str) -> Result<TemplateSection> {
        let (category, pattern) = self.templates.source_for(topic);
        let resolved = self.resolve_pattern(category, pattern)?;
        let section = section::extract(&resolved.content, topic);

        Ok(TemplateSection {
            topic: topic.to_string(),
            source: format!("{}/{}", resolved.category, resolved.item.filename),
            text: section.text,
            matched: section.matched,
        })
    }
}
