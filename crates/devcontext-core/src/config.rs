use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DevContextError, Result};
use crate::uri::DEFAULT_SCHEME;

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PATTERNS_DIR: &str = "patterns";
const DEFAULT_TEMPLATE_CATEGORY: &str = "templates";
const DEFAULT_TEMPLATE_PATTERN: &str = "project-templates";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# devcontext configuration file
# Location: ~/.devcontext/config.toml

[store]
# Directory holding one sub-directory per category
# Relative paths are resolved against the directory containing this file
# Default: "patterns"
root = "patterns"

# URI scheme used for resources (<scheme>://<category>/<filename>)
# Default: "devcontext"
scheme = "devcontext"

[templates]
# Document that holds one ## <topic> section per project template
# Default: templates/project-templates
category = "templates"
pattern = "project-templates"

# Per-topic overrides: topic = "pattern in the templates category"
[templates.topics]
# react-app = "frontend-templates"
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,
}

/// Where the patterns live and how they are addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default = "default_scheme")]
    pub scheme: String,
}

/// Which document answers template-section lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "default_template_category")]
    pub category: String,

    #[serde(default = "default_template_pattern")]
    pub pattern: String,

    /// Topic key -> pattern name overrides
    #[serde(default)]
    pub topics: BTreeMap<String, String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_PATTERNS_DIR)
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_template_category() -> String {
    DEFAULT_TEMPLATE_CATEGORY.to_string()
}

fn default_template_pattern() -> String {
    DEFAULT_TEMPLATE_PATTERN.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            scheme: default_scheme(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            category: default_template_category(),
            pattern: default_template_pattern(),
            topics: BTreeMap::new(),
        }
    }
}

impl TemplatesConfig {
    /// The (category, pattern) holding the section for `topic`
    pub fn source_for(&self, topic: &str) -> (&str, &str) {
        let pattern = self
            .topics
            .get(topic)
            .or_else(|| self.topics.get(&topic.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(self.pattern.as_str());
        (&self.category, pattern)
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| DevContextError::io(&path, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| DevContextError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir).map_err(|e| DevContextError::io(base_dir, e))?;

        let content = toml::to_string_pretty(self).map_err(|e| DevContextError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, content).map_err(|e| DevContextError::io(&path, e))?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir).map_err(|e| DevContextError::io(base_dir, e))?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| DevContextError::io(&path, e))?;
        }

        Ok(path)
    }

    /// Patterns directory, with relative roots resolved against `base_dir`
    pub fn patterns_root(&self, base_dir: &Path) -> PathBuf {
        if self.store.root.is_absolute() {
            self.store.root.clone()
        } else {
            base_dir.join(&self.store.root)
        }
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "store.root" => Some(self.store.root.display().to_string()),
            "store.scheme" => Some(self.store.scheme.clone()),
            "templates.category" => Some(self.templates.category.clone()),
            "templates.pattern" => Some(self.templates.pattern.clone()),
            _ => key
                .strip_prefix("templates.topics.")
                .and_then(|topic| self.templates.topics.get(topic).cloned()),
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "store.root" => self.store.root = PathBuf::from(value),
            "store.scheme" => self.store.scheme = parse_scheme(value)?,
            "templates.category" => self.templates.category = value.to_string(),
            "templates.pattern" => self.templates.pattern = value.to_string(),
            _ => match key.strip_prefix("templates.topics.") {
                Some(topic) if !topic.is_empty() => {
                    if value.is_empty() {
                        self.templates.topics.remove(topic);
                    } else {
                        self.templates
                            .topics
                            .insert(topic.to_string(), value.to_string());
                    }
                }
                _ => {
                    return Err(DevContextError::ConfigKeyNotFound {
                        key: key.to_string(),
                    })
                }
            },
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            (
                "store.root".to_string(),
                self.store.root.display().to_string(),
            ),
            ("store.scheme".to_string(), self.store.scheme.clone()),
            (
                "templates.category".to_string(),
                self.templates.category.clone(),
            ),
            (
                "templates.pattern".to_string(),
                self.templates.pattern.clone(),
            ),
        ];
        entries.extend(
            self.templates
                .topics
                .iter()
                .map(|(topic, pattern)| (format!("templates.topics.{}", topic), pattern.clone())),
        );
        entries
    }
}

/// Accept `devcontext` or `devcontext://`
fn parse_scheme(value: &str) -> Result<String> {
    let scheme = value.trim_end_matches("://");
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !valid {
        return Err(DevContextError::InvalidName {
            name: value.to_string(),
        });
    }
    Ok(scheme.to_string())
}

/// Base directory: explicit flag, then `DEVCONTEXT_BASE`, then `~/.devcontext`
pub fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("DEVCONTEXT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".devcontext"))
        .unwrap_or_else(|| PathBuf::from(".devcontext"))
}
