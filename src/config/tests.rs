use super::*;
use crate::render::Platform;
use std::fs;
use tempfile::TempDir;

/// Sources limited to a temporary repository, ignoring the user's home
fn sources(root: &TempDir) -> ConfigSources {
    ConfigSources {
        user_config: None,
        repo_root: Some(root.path().to_path_buf()),
        custom_config: None,
    }
}

#[test]
fn test_embedded_defaults_match_typed_defaults() {
    let root = TempDir::new().unwrap();
    let config = sources(&root).extract().unwrap();

    assert_eq!(config.output, OutputConfig::default());
    assert_eq!(config.scan.max_depth, 6);
    assert_eq!(config.scan.manifest_dirs, vec!["", "client", "server", "frontend", "backend"]);
    assert_eq!(config.render, RenderConfig::default());
}

#[test]
fn test_repository_config_overrides_defaults() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("stackguard.toml"),
        "[scan]\nmax_depth = 3\nextra_excluded_dirs = [\"fixtures\"]\n\n[render]\nplatform = \"windows\"\n",
    )
    .unwrap();

    let config = sources(&root).extract().unwrap();

    assert_eq!(config.scan.max_depth, 3);
    assert_eq!(config.scan.extra_excluded_dirs, vec!["fixtures"]);
    assert_eq!(config.render_options().unwrap().platform, Platform::Windows);
    assert_eq!(config.output.config_file, ".pre-commit-config.yaml");
}

#[test]
fn test_custom_config_has_priority_over_repository() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("stackguard.toml"), "[output]\nmanifest_file = \"repo.txt\"\n").unwrap();
    let custom = root.path().join("custom.json");
    fs::write(&custom, r#"{"output": {"manifest_file": "custom.txt"}}"#).unwrap();

    let mut sources = sources(&root);
    sources.custom_config = Some(custom);
    let config = sources.extract().unwrap();

    assert_eq!(config.output.manifest_file, "custom.txt");
}

#[test]
fn test_yaml_repository_config() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("stackguard.yaml"), "scan:\n  respect_gitignore: true\n").unwrap();

    let config = sources(&root).extract().unwrap();
    assert!(config.scan_options().respect_gitignore);
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let root = TempDir::new().unwrap();
    let mut sources = sources(&root);
    sources.custom_config = Some(root.path().join("absent.toml"));

    assert!(sources.extract().is_err());
}

#[test]
fn test_environment_overrides_nested_keys() {
    let root = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("STACKGUARD_SCAN__RESPECT_GITIGNORE", "true");
    }
    let config = sources(&root).extract();
    unsafe {
        std::env::remove_var("STACKGUARD_SCAN__RESPECT_GITIGNORE");
    }

    assert!(config.unwrap().scan.respect_gitignore);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = StackguardConfig::default();
    assert!(config.validate().is_ok());

    config.scan.max_depth = 0;
    assert!(config.validate().is_err());

    let mut config = StackguardConfig::default();
    config.output.manifest_file = config.output.config_file.clone();
    assert!(config.validate().is_err());

    let mut config = StackguardConfig::default();
    config.render.platform = "amiga".to_string();
    assert!(config.validate().is_err());
    assert!(config.render_options().is_err());
}

#[test]
fn test_invalid_repository_config_is_reported() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("stackguard.toml"), "[scan]\nmax_depth = \"deep\"\n").unwrap();

    assert!(sources(&root).extract().is_err());
}

#[test]
fn test_render_options_carry_output_names() {
    let mut config = StackguardConfig::default();
    config.output.config_file = "hooks.yaml".to_string();
    config.render.pre_commit_version = "4.0.0".to_string();

    let options = config.render_options_for(Platform::Posix);
    assert_eq!(options.config_file, "hooks.yaml");
    assert_eq!(options.manifest_file, "requirements-precommit.txt");
    assert_eq!(options.pre_commit_version, "4.0.0");
}
