use std::path::Path;

use super::*;

const SAMPLE: &str = "\
# Signal sources

## GitHub Repositories
- tokio-rs/tokio
- rust-lang/rust

## Reddit Subreddits
- r/rust
- programming

## Twitter Accounts
- @rustlang

## People Watcher Target Repos
- serde-rs/serde

## Notes
- this bullet belongs to an unknown section
";

#[test]
fn parses_all_sections() {
    let sources = parse_sources(SAMPLE);
    assert_eq!(sources.github_repos, vec!["tokio-rs/tokio", "rust-lang/rust"]);
    assert_eq!(sources.subreddits, vec!["rust", "programming"]);
    assert_eq!(sources.twitter_accounts, vec!["rustlang"]);
    assert_eq!(sources.people_watcher_repos, vec!["serde-rs/serde"]);
}

#[test]
fn bullets_before_any_section_are_ignored() {
    let sources = parse_sources("- orphan/item\n## GitHub Repositories\n- a/b\n");
    assert_eq!(sources.github_repos, vec!["a/b"]);
}

#[test]
fn unknown_section_stops_collection() {
    let sources = parse_sources("## GitHub Repositories\n- a/b\n## Other\n- c/d\n");
    assert_eq!(sources.github_repos, vec!["a/b"]);
}

#[test]
fn comment_lines_do_not_change_section() {
    let sources = parse_sources("## Reddit Subreddits\n# add more below\n- r/rust\n");
    assert_eq!(sources.subreddits, vec!["rust"]);
}

#[test]
fn malformed_repo_entries_are_kept_for_fetch_time_validation() {
    let sources = parse_sources("## GitHub Repositories\n- not-a-repo\n");
    assert_eq!(sources.github_repos, vec!["not-a-repo"]);
}

#[test]
fn empty_bullets_are_skipped() {
    let sources = parse_sources("## Reddit Subreddits\n-\n-   \n- rust\n");
    assert_eq!(sources.subreddits, vec!["rust"]);
}

#[test]
fn empty_document_yields_default() {
    assert_eq!(parse_sources(""), SourcesConfig::default());
}

#[test]
fn load_sources_reports_missing_file() {
    let err = load_sources(Path::new("/nonexistent/sigintel/sources.md")).unwrap_err();
    assert!(
        matches!(err, ConfigError::SourcesFileIo { .. }),
        "expected SourcesFileIo, got: {err:?}"
    );
}

#[test]
fn load_sources_or_default_degrades_missing_file_to_empty_lists() {
    let sources = load_sources_or_default(Path::new("/nonexistent/sigintel/sources.md"));
    assert_eq!(sources, SourcesConfig::default());
}
