// tests/config_test.rs
use std::fs;

use git_relnotes::config::{load_config, Config};

#[test]
fn test_load_config_from_custom_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relnotes.toml");
    fs::write(
        &path,
        r#"
            org_domain = "example.com"
            org_name = "Example"
            repo = "example/widgets"
        "#,
    )
    .expect("write config");

    let config = load_config(path.to_str()).expect("should load config");
    assert_eq!(config.org_domain, "example.com");
    assert_eq!(config.org_name, "Example");
    assert_eq!(config.repo, "example/widgets");
    // Unspecified fields fall back to defaults.
    assert_eq!(config.api_base, "https://api.github.com");
    assert_eq!(config.release_branch_prefix, "release-");
}

#[test]
fn test_load_config_missing_custom_path_is_error() {
    let result = load_config(Some("/nonexistent/path/relnotes.toml"));
    assert!(result.is_err());
}

#[test]
fn test_load_config_invalid_toml_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("relnotes.toml");
    fs::write(&path, "org_domain = [not valid").expect("write config");

    let result = load_config(path.to_str());
    assert!(result.is_err());
}

#[test]
fn test_defaults_match_default_impl() {
    let parsed: Config = toml::from_str("").expect("empty config parses");
    assert_eq!(parsed, Config::default());
}
