//! Configuration loading from files and environment

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use unicdk::config::{ConfigLoader, CONFIG_FILE};
use unicdk::framework::cdk;
use unicdk::{App, AppError, AppOptions};

use super::test_utils::with_env;

#[test]
fn test_load_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let config = with_env(&[], || ConfigLoader::load(temp_dir.path())).unwrap();

    assert_eq!(config.synth.out_root, PathBuf::from("."));
    assert!(!config.synth.force_clean);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE),
        "[synth]\nout_root = \"dist\"\nforce_clean = true\n\n[logging]\nlevel = \"debug\"\n",
    )
    .unwrap();

    let config = with_env(&[], || ConfigLoader::load(temp_dir.path())).unwrap();

    assert_eq!(config.synth.out_root, PathBuf::from("dist"));
    assert!(config.synth.force_clean);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE),
        "[synth]\nforce_clean = false\n",
    )
    .unwrap();

    let config = with_env(&[("UNICDK_SYNTH__FORCE_CLEAN", "true")], || {
        ConfigLoader::load(temp_dir.path())
    })
    .unwrap();

    assert!(config.synth.force_clean);
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[logging]\nformat = \"xml\"\n").unwrap();

    let err = with_env(&[], || ConfigLoader::load_from_file(&path)).unwrap_err();

    assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains("xml")));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = with_env(&[], || {
        ConfigLoader::load_from_file(&temp_dir.path().join("nope.toml"))
    });
    assert!(result.is_err());
}

#[test]
fn test_config_drives_app_options() {
    let temp_dir = TempDir::new().unwrap();
    let out_root = temp_dir.path().join("out");
    fs::write(
        temp_dir.path().join(CONFIG_FILE),
        format!("[synth]\nout_root = {:?}\n", out_root.display().to_string()),
    )
    .unwrap();

    let config = with_env(&[], || ConfigLoader::load(temp_dir.path())).unwrap();
    let app = App::new(None, "uni", AppOptions::from_config(&config.synth)).unwrap();
    cdk::Stack::new(app.node(), "api").unwrap();
    app.synth().unwrap();

    assert!(out_root.join("cdk.api.o").join("manifest.json").is_file());
}
