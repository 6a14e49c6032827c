use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde::Serialize;

use devcontext_core::{
    resolve_base_dir, Config, DevContextError, FsStore, MatchKind, PatternRepository, Result,
    Skipped,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let base_dir = resolve_base_dir(cli.base_dir);
    let json = cli.json;

    let result = match cli.command {
        Some(Commands::Config { action }) => handle_config(action, &base_dir, json),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        Some(command) => open_repository(&base_dir, cli.root)
            .and_then(|repo| run(command, &repo, json)),
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn open_repository(base_dir: &Path, root: Option<PathBuf>) -> Result<PatternRepository> {
    let config = Config::load(base_dir)?;
    let root = root.unwrap_or_else(|| config.patterns_root(base_dir));

    Ok(PatternRepository::new(FsStore::new(root))
        .with_scheme(&config.store.scheme)
        .with_templates(config.templates))
}

fn run(command: Commands, repo: &PatternRepository, json: bool) -> Result<()> {
    match command {
        Commands::Categories => handle_categories(repo, json),
        Commands::List { category } => handle_list(repo, category.as_deref(), json),
        Commands::Resources => handle_resources(repo, json),
        Commands::Show { category, pattern } => handle_show(repo, &category, &pattern, json),
        Commands::Read { uri } => handle_read(repo, &uri, json),
        Commands::Search { query } => handle_search(repo, &query, json),
        Commands::Section { topic } => handle_section(repo, &topic, json),
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("{} {}", "[ERROR]".red().bold(), e),
    }
}

fn warn_skipped(skipped: &[Skipped]) {
    for entry in skipped {
        let location = if entry.location.is_empty() {
            "(store root)"
        } else {
            entry.location.as_str()
        };
        eprintln!(
            "{} skipped {}: {}",
            "[WARN]".yellow().bold(),
            location,
            entry.reason
        );
    }
}

fn handle_categories(repo: &PatternRepository, json: bool) -> Result<()> {
    let categories = repo.list_categories()?;
    if json {
        print_json(&categories);
        return Ok(());
    }

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!();
    println!("{}", "Categories:".cyan().bold());
    for category in &categories {
        println!("  {}", category);
    }
    println!();
    Ok(())
}

fn handle_list(repo: &PatternRepository, category: Option<&str>, json: bool) -> Result<()> {
    if let Some(category) = category {
        let names = repo.list_patterns(category)?;
        if json {
            print_json(&names);
        } else {
            print_category(category, &names);
        }
        return Ok(());
    }

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    let mut skipped = Vec::new();
    for category in repo.list_categories()? {
        match repo.list_patterns(&category) {
            Ok(names) => grouped.push((category, names)),
            Err(e) => skipped.push(Skipped::new(category, e)),
        }
    }

    if json {
        print_json(&grouped);
    } else {
        for (category, names) in &grouped {
            print_category(category, names);
        }
    }
    warn_skipped(&skipped);
    Ok(())
}

fn print_category(category: &str, names: &[String]) {
    println!();
    println!("{}", format!("{}:", category).cyan().bold());
    if names.is_empty() {
        println!("  {}", "(empty)".dimmed());
    }
    for name in names {
        println!("  {}", name);
    }
}

fn handle_resources(repo: &PatternRepository, json: bool) -> Result<()> {
    let listing = repo.list_resources();
    if json {
        print_json(&listing);
        return Ok(());
    }

    println!();
    for resource in &listing.resources {
        println!("{}", resource.uri.green());
        println!("    {} ({})", resource.description, resource.content_type.dimmed());
    }
    println!();
    println!("{} resource(s)", listing.resources.len());
    warn_skipped(&listing.skipped);
    Ok(())
}

fn handle_show(repo: &PatternRepository, category: &str, pattern: &str, json: bool) -> Result<()> {
    let resolved = repo.resolve_pattern(category, pattern)?;

    if json {
        print_json(&resolved);
        return Ok(());
    }

    if resolved.match_kind == MatchKind::Substring {
        eprintln!(
            "{} {}/{}",
            "Matched:".yellow(),
            resolved.category,
            resolved.item.filename
        );
    }
    print!("{}", resolved.content);
    if !resolved.content.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_read(repo: &PatternRepository, uri: &str, json: bool) -> Result<()> {
    let content = repo.read_resource(uri)?;
    if json {
        print_json(&content);
        return Ok(());
    }

    print!("{}", content.text);
    if !content.text.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_search(repo: &PatternRepository, query: &str, json: bool) -> Result<()> {
    let report = repo.search(query)?;
    if json {
        print_json(&report);
        return Ok(());
    }

    if report.hits.is_empty() {
        println!("No results found for: {}", query);
    } else {
        println!();
        println!("{}", "Search Results:".cyan().bold());
        println!();
        for hit in &report.hits {
            println!("  {}/{}", hit.category.dimmed(), hit.pattern.green());
        }
        println!();
        println!("{} match(es)", report.hits.len());
    }
    warn_skipped(&report.skipped);
    Ok(())
}

fn handle_section(repo: &PatternRepository, topic: &str, json: bool) -> Result<()> {
    let section = repo.template_section(topic)?;
    if json {
        print_json(&section);
        return Ok(());
    }

    if !section.matched {
        eprintln!(
            "{} no section for '{}' in {}, showing the whole document",
            "[WARN]".yellow().bold(),
            topic,
            section.source
        );
    }
    println!("{}", section.text);
    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path, json: bool) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load(base_dir)?
                .get(&key)
                .ok_or(DevContextError::ConfigKeyNotFound { key })?;
            if json {
                print_json(&value);
            } else {
                println!("{}", value);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            match config.get(&key) {
                Some(stored) => println!("{} {} = {}", "Set:".green(), key, stored),
                None => println!("{} {}", "Unset:".yellow(), key),
            }
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            if json {
                print_json(&config_entries(&config));
            } else {
                for (key, value) in config.list() {
                    println!("{} = {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            if json {
                print_json(&path);
            } else {
                println!("{}", path.display());
            }
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

/// `config list` as a key -> value object.
fn config_entries(config: &Config) -> BTreeMap<String, String> {
    config.list().into_iter().collect()
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "devcontext", &mut io::stdout());
}
