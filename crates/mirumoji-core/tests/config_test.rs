use mirumoji_core::{LauncherConfig, SubmoduleMode};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = LauncherConfig::load(tmp.path()).unwrap();

    assert_eq!(
        config.repository.url,
        "https://github.com/svdC1/mirumoji.git"
    );
    assert_eq!(config.repository.directory, Path::new("mirumoji_workspace"));
    assert_eq!(config.repository.default_branch, "main");
    assert_eq!(config.repository.submodules, SubmoduleMode::Remote);
    assert_eq!(config.compose.project_name, "mirumoji");
    assert_eq!(config.secrets.file, Path::new(".env"));
    assert_eq!(config.network.probe_address, "8.8.8.8:80");
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[repository]
url = "https://example.com/fork.git"
directory = "checkout"
default_branch = "develop"
submodules = "pinned"

[compose]
project_name = "staging"

[secrets]
file = "secrets/launch.env"

[network]
probe_address = "1.1.1.1:53"
"#;
    std::fs::write(tmp.path().join("mirumoji.toml"), toml).unwrap();

    let config = LauncherConfig::load(tmp.path()).unwrap();

    assert_eq!(config.repository.url, "https://example.com/fork.git");
    assert_eq!(config.repository.default_branch, "develop");
    assert_eq!(config.repository.submodules, SubmoduleMode::Pinned);
    assert_eq!(config.compose.project_name, "staging");
    assert_eq!(config.network.probe_address, "1.1.1.1:53");
    assert_eq!(config.repo_path(tmp.path()), tmp.path().join("checkout"));
    assert_eq!(
        config.secrets_path(tmp.path()),
        tmp.path().join("secrets/launch.env")
    );
}

#[test]
fn load_partial_config_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[repository]
submodules = "disabled"
"#;
    std::fs::write(tmp.path().join("mirumoji.toml"), toml).unwrap();

    let config = LauncherConfig::load(tmp.path()).unwrap();

    assert_eq!(config.repository.submodules, SubmoduleMode::Disabled);
    // Defaults preserved
    assert_eq!(config.repository.default_branch, "main");
    assert_eq!(config.compose.project_name, "mirumoji");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("mirumoji.toml"), "not valid {{{{ toml").unwrap();

    let result = LauncherConfig::load(tmp.path());
    assert!(result.is_err());

    let err = result.unwrap_err().to_string();
    assert!(err.contains("parse"));
}

#[test]
fn load_rejects_unknown_submodule_mode() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("mirumoji.toml"),
        "[repository]\nsubmodules = \"sometimes\"\n",
    )
    .unwrap();

    assert!(matches!(
        LauncherConfig::load(tmp.path()),
        Err(mirumoji_core::Error::ConfigParse { .. })
    ));
}

#[test]
fn load_empty_config_returns_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("mirumoji.toml"), "").unwrap();

    let config = LauncherConfig::load(tmp.path()).unwrap();
    assert_eq!(config.compose.project_name, "mirumoji");
}
