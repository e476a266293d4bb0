//! Outdir cleanup behaviour

use std::fs;
use tempfile::TempDir;
use unicdk::framework::cdk;
use unicdk::{App, AppError, AppFactory, AppOptions};

use super::test_utils::files_under;

fn seed_stale(temp_dir: &TempDir) {
    let outdir = temp_dir.path().join("cdk.api.o");
    fs::create_dir_all(outdir.join("old")).unwrap();
    fs::write(outdir.join("stale.template.json"), "{}").unwrap();
    fs::write(outdir.join("old").join("leftover"), "x").unwrap();
}

fn synth_api(temp_dir: &TempDir, force_clean: bool) {
    let options = AppOptions {
        force_clean,
        out_root: temp_dir.path().to_path_buf(),
        ..AppOptions::default()
    };
    let app = App::new(None, "uni", options).unwrap();
    cdk::Stack::new(app.node(), "api").unwrap();
    app.synth().unwrap();
}

#[test]
fn test_force_clean_removes_stale_files() {
    let temp_dir = TempDir::new().unwrap();
    seed_stale(&temp_dir);

    synth_api(&temp_dir, true);

    let files = files_under(&temp_dir.path().join("cdk.api.o"));
    let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    assert_eq!(names, vec!["api.template.json", "manifest.json"]);
}

#[test]
fn test_without_force_clean_stale_files_remain() {
    let temp_dir = TempDir::new().unwrap();
    seed_stale(&temp_dir);

    synth_api(&temp_dir, false);

    let outdir = temp_dir.path().join("cdk.api.o");
    assert!(outdir.join("stale.template.json").is_file());
    assert!(outdir.join("old").join("leftover").is_file());
    assert!(outdir.join("api.template.json").is_file());
    assert!(outdir.join("manifest.json").is_file());
}

#[test]
fn test_force_clean_with_missing_outdir() {
    let temp_dir = TempDir::new().unwrap();

    synth_api(&temp_dir, true);

    assert!(temp_dir.path().join("cdk.api.o/manifest.json").is_file());
}

#[cfg(unix)]
#[test]
fn test_force_clean_failure_surfaces_io_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let locked = temp_dir.path().join("locked");
    let outdir = locked.join("cdk.o");
    fs::create_dir_all(&outdir).unwrap();
    fs::write(outdir.join("stale"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    // Root ignores directory permissions; nothing to observe there.
    if fs::write(locked.join("writable"), "x").is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let target = outdir.clone();
    let options = AppOptions {
        force_clean: true,
        app_factory: AppFactory::default()
            .cdk(move |_| std::rc::Rc::new(cdk::App::new(target.clone()))),
        ..AppOptions::default()
    };
    let app = App::new(None, "uni", options).unwrap();
    cdk::Stack::new(app.node(), "api").unwrap();

    let err = app.synth().unwrap_err();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    match err {
        AppError::Clean { path, .. } => assert_eq!(path, outdir),
        other => panic!("expected Clean error, got {other:?}"),
    }
}
