//! Serve a directory of categorized context patterns.
//!
//! The store holds one directory per category and one `.md` or `.json`
//! document per pattern. [`PatternRepository`] lists them as resources,
//! resolves single patterns by (fuzzy) name, searches the corpus and cuts
//! topic sections out of aggregate documents.

pub mod catalog;
pub mod config;
pub mod error;
pub mod repository;
pub mod resolver;
pub mod search;
pub mod section;
pub mod store;
pub mod uri;

pub use catalog::{list_patterns, list_resources, CatalogListing, Resource, Skipped};
pub use config::{resolve_base_dir, Config, StoreConfig, TemplatesConfig};
pub use error::{DevContextError, Result};
pub use repository::{PatternRepository, ResourceContent, TemplateSection};
pub use resolver::{resolve_pattern, MatchKind, ResolvedPattern};
pub use search::{search, SearchHit, SearchReport};
pub use section::{extract_section, Section};
pub use store::{DocumentStore, FsStore, ItemEntry, ItemKind, MemoryStore};
pub use uri::{ResourceUri, DEFAULT_SCHEME};
