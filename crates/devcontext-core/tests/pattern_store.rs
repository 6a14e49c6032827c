use std::fs;
use std::path::Path;

use devcontext_core::{Config, DevContextError, MatchKind, PatternRepository};
use tempfile::TempDir;

fn write(root: &Path, category: &str, filename: &str, content: &str) {
    let dir = root.join(category);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(filename), content).unwrap();
}

/// base_dir/patterns/{architecture,components,templates}
fn fixture() -> (TempDir, PatternRepository) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("patterns");

    write(&root, "architecture", "frontend.md", "# Frontend\nSPA with React.\n");
    write(&root, "architecture", "backend.md", "# Backend\nREST services.\n");
    write(&root, "architecture", "diagram.png", "not text");
    write(
        &root,
        "components",
        "ui-patterns.md",
        "# UI patterns\nBuild with TAILWIND.\n",
    );
    write(&root, "components", "tokens.json", "{\"spacing\": 4}");
    write(
        &root,
        "templates",
        "project-templates.md",
        "# Templates\n## Next App\nnpx create-next-app\n## Rust CLI\ncargo new\n",
    );

    let repo = PatternRepository::from_config(&Config::default(), tmp.path());
    (tmp, repo)
}

#[test]
fn list_patterns_in_category() {
    let (_tmp, repo) = fixture();
    let mut names = repo.list_patterns("architecture").unwrap();
    names.sort();
    assert_eq!(names, vec!["backend", "frontend"]);
}

#[test]
fn every_item_resolves_to_its_content() {
    let (tmp, repo) = fixture();
    for category in repo.list_categories().unwrap() {
        for name in repo.list_patterns(&category).unwrap() {
            let resolved = repo.resolve_pattern(&category, &name).unwrap();
            assert_eq!(resolved.match_kind, MatchKind::Exact);
            let on_disk = fs::read_to_string(
                tmp.path()
                    .join("patterns")
                    .join(&category)
                    .join(&resolved.item.filename),
            )
            .unwrap();
            assert_eq!(resolved.content, on_disk);
        }
    }
}

#[test]
fn substring_fallback_and_not_found() {
    let (_tmp, repo) = fixture();

    let resolved = repo.resolve_pattern("architecture", "front").unwrap();
    assert_eq!(resolved.content, "# Frontend\nSPA with React.\n");

    match repo.resolve_pattern("architecture", "zzz").unwrap_err() {
        DevContextError::NotFoundInCategory { mut available, .. } => {
            available.sort();
            assert_eq!(available, vec!["backend", "frontend"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        repo.resolve_pattern("missing", "front").unwrap_err(),
        DevContextError::CategoryNotFound { .. }
    ));
}

#[test]
fn catalog_lists_recognized_items_only() {
    let (_tmp, repo) = fixture();
    let listing = repo.list_resources();
    assert!(listing.is_complete());
    assert_eq!(listing.resources.len(), 5);
    assert!(listing.resources.iter().all(|r| !r.uri.ends_with(".png")));

    let tokens = listing
        .resources
        .iter()
        .find(|r| r.uri == "devcontext://components/tokens.json")
        .unwrap();
    assert_eq!(tokens.content_type, "application/json");

    let read = repo.read_resource(&tokens.uri).unwrap();
    assert_eq!(read.text, "{\"spacing\": 4}");
}

#[test]
fn search_finds_tailwind_only_in_ui_patterns() {
    let (_tmp, repo) = fixture();
    let report = repo.search("tailwind").unwrap();
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].category, "components");
    assert_eq!(report.hits[0].pattern, "ui-patterns");

    assert!(repo.search("graphql").unwrap().hits.is_empty());
}

#[test]
fn template_section_from_disk() {
    let (_tmp, repo) = fixture();
    let section = repo.template_section("next-app").unwrap();
    assert!(section.matched);
    assert_eq!(section.text, "## Next App\nnpx create-next-app");
}

#[test]
fn missing_root_lists_nothing_but_reports_it() {
    let tmp = TempDir::new().unwrap();
    let repo = PatternRepository::from_config(&Config::default(), tmp.path());
    let listing = repo.list_resources();
    assert!(listing.resources.is_empty());
    assert_eq!(listing.skipped.len(), 1);
}
