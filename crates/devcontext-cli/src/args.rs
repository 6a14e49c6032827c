use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "devcontext")]
#[command(about = "Browse and search categorized context patterns")]
#[command(version)]
pub struct Cli {
    /// Base directory (default: ~/.devcontext)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Patterns directory (overrides store.root)
    #[arg(long, global = true, env = "DEVCONTEXT_ROOT")]
    pub root: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories
    Categories,

    /// List patterns (all categories when none is given)
    List {
        /// Category to list
        category: Option<String>,
    },

    /// List resources with their URIs
    Resources,

    /// Show a pattern (exact name, then first file containing the name)
    Show {
        /// Category of the pattern
        category: String,

        /// Pattern name or part of it
        pattern: String,
    },

    /// Print a resource by URI (e.g. devcontext://architecture/frontend.md)
    Read {
        uri: String,
    },

    /// Search all patterns (case-insensitive substring)
    Search {
        /// Text to look for
        query: String,
    },

    /// Print the project template section for a topic
    Section {
        /// Topic key (e.g. react-app)
        topic: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. store.root, templates.pattern)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g. store.root, templates.topics.react-app)
        key: String,

        /// Value (empty removes a templates.topics entry)
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with defaults
    Init,
}
