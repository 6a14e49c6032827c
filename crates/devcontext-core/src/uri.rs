//! Resource URIs of the form `scheme://category/filename`

use std::fmt;

use crate::error::{DevContextError, Result};
use crate::store::{validate_key, ItemEntry};

pub const DEFAULT_SCHEME: &str = "devcontext";

/// A parsed resource URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUri {
    pub scheme: String,
    pub category: String,
    pub item: ItemEntry,
}

impl ResourceUri {
    /// Parse `uri`, requiring the `scheme://` prefix.
    pub fn parse(scheme: &str, uri: &str) -> Result<Self> {
        let invalid = |reason: &str| DevContextError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let prefix = format!("{}://", scheme);
        let rest = uri
            .strip_prefix(&prefix)
            .ok_or_else(|| invalid(&format!("expected prefix '{}'", prefix)))?;

        let (category, filename) = rest
            .split_once('/')
            .ok_or_else(|| invalid("expected '<category>/<filename>'"))?;

        if category.is_empty() || filename.is_empty() {
            return Err(invalid("expected '<category>/<filename>'"));
        }
        if validate_key(category).is_err() || validate_key(filename).is_err() {
            return Err(invalid("path segments must be plain names"));
        }

        let item = ItemEntry::from_filename(filename)
            .ok_or_else(|| invalid("only .md and .json resources are served"))?;

        Ok(Self {
            scheme: scheme.to_string(),
            category: category.to_string(),
            item,
        })
    }

    pub fn format(scheme: &str, category: &str, filename: &str) -> String {
        format!("{}://{}/{}", scheme, category, filename)
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::format(
            &self.scheme,
            &self.category,
            &self.item.filename,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_uri() {
        let uri = ResourceUri::parse("devcontext", "devcontext://architecture/frontend.md").unwrap();
        assert_eq!(uri.category, "architecture");
        assert_eq!(uri.item.filename, "frontend.md");
        assert_eq!(uri.item.name, "frontend");
        assert_eq!(uri.to_string(), "devcontext://architecture/frontend.md");
    }

    #[test]
    fn rejects_wrong_scheme() {
        let err = ResourceUri::parse("devcontext", "file://architecture/frontend.md").unwrap_err();
        assert!(matches!(err, DevContextError::InvalidUri { .. }));
    }

    #[test]
    fn rejects_malformed_paths() {
        for uri in [
            "devcontext://architecture",
            "devcontext://architecture/",
            "devcontext:///frontend.md",
            "devcontext://a/b/c.md",
            "devcontext://../secret.md",
            "devcontext://architecture/notes.txt",
        ] {
            assert!(
                matches!(
                    ResourceUri::parse("devcontext", uri),
                    Err(DevContextError::InvalidUri { .. })
                ),
                "{} should be rejected",
                uri
            );
        }
    }
}
