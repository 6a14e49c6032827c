use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevContextError {
    #[error("Invalid resource URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Invalid name: '{name}' - must be non-empty and contain no path separators")]
    InvalidName { name: String },

    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("Category not found: {category}")]
    CategoryNotFound { category: String },

    #[error("Not found: {category}/{filename}")]
    NotFound { category: String, filename: String },

    #[error(
        "Pattern '{pattern}' not found in category '{category}'. Available patterns: {}",
        format_available(.available)
    )]
    NotFoundInCategory {
        category: String,
        pattern: String,
        available: Vec<String>,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

pub type Result<T> = std::result::Result<T, DevContextError>;

impl DevContextError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CategoryNotFound { .. } => 2,
            Self::NotFound { .. } | Self::NotFoundInCategory { .. } => 3,
            Self::InvalidUri { .. } | Self::InvalidName { .. } | Self::EmptyQuery => 4,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 5,
            _ => 1,
        }
    }

    /// True for the kinds that mean "nothing stored under that key".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CategoryNotFound { .. } | Self::NotFound { .. } | Self::NotFoundInCategory { .. }
        )
    }

    /// True for the kinds caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidUri { .. } | Self::InvalidName { .. } | Self::EmptyQuery
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_in_category_lists_available_names() {
        let err = DevContextError::NotFoundInCategory {
            category: "architecture".to_string(),
            pattern: "zzz".to_string(),
            available: vec!["frontend".to_string(), "backend".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("'zzz'"));
        assert!(message.contains("frontend, backend"));
        assert_eq!(err.exit_code(), 3);
        assert!(err.is_not_found());
    }

    #[test]
    fn not_found_in_empty_category() {
        let err = DevContextError::NotFoundInCategory {
            category: "empty".to_string(),
            pattern: "x".to_string(),
            available: Vec::new(),
        };
        assert!(err.to_string().ends_with("(none)"));
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(DevContextError::EmptyQuery.is_invalid_input());
        assert!(!DevContextError::HomeNotFound.is_invalid_input());
        assert_eq!(DevContextError::HomeNotFound.exit_code(), 1);
    }
}
