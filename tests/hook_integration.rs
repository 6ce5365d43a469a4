//! Post-rename hook runs once per renamed file with the new absolute path.
#![cfg(unix)]

use assert_fs::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use bren::{HookOutcome, RenameConfig, Strategy, Walker};

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn hook_receives_each_new_path() {
    let tools = assert_fs::TempDir::new().unwrap();
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    root.child("sub/b.txt").write_str("b").unwrap();

    let log = tools.path().join("calls.log");
    let script = tools.path().join("record.sh");
    write_script(&script, &format!("echo \"$1\" >> '{}'", log.display()));

    let mut cfg = RenameConfig::new(root.path(), Strategy::SequentialCounter);
    cfg.basename = Some("n".into());
    cfg.post_rename_hook = Some(script);
    let report = Walker::new(cfg).run().unwrap();

    assert!(report.files.iter().all(|f| f.hook == HookOutcome::Succeeded));
    let calls: Vec<PathBuf> = fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(PathBuf::from)
        .collect();
    assert_eq!(
        calls,
        [root.path().join("n(1).txt"), root.path().join("sub").join("n(2).txt")]
    );
    assert!(calls.iter().all(|p| p.is_absolute() && p.is_file()));
}

#[test]
fn failing_hook_does_not_stop_the_run() {
    let tools = assert_fs::TempDir::new().unwrap();
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    root.child("b.txt").write_str("b").unwrap();

    let script = tools.path().join("fail.sh");
    write_script(&script, "exit 3");

    let mut cfg = RenameConfig::new(root.path(), Strategy::SequentialCounter);
    cfg.basename = Some("n".into());
    cfg.post_rename_hook = Some(script);
    let report = Walker::new(cfg).run().unwrap();

    assert_eq!(report.renamed(), 2);
    assert!(
        report
            .files
            .iter()
            .all(|f| matches!(f.hook, HookOutcome::Failed { .. }))
    );
}

#[test]
fn skipped_file_does_not_trigger_hook() {
    let tools = assert_fs::TempDir::new().unwrap();
    let root = assert_fs::TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    root.child("n(1).txt").write_str("taken").unwrap();

    let log = tools.path().join("calls.log");
    let script = tools.path().join("record.sh");
    write_script(&script, &format!("echo \"$1\" >> '{}'", log.display()));

    let mut cfg = RenameConfig::new(root.path(), Strategy::SequentialCounter);
    cfg.basename = Some("n".into());
    cfg.post_rename_hook = Some(script);
    let report = Walker::new(cfg).run().unwrap();

    assert_eq!(report.files[0].hook, HookOutcome::Skipped);
    // n(1).txt is file 2 and becomes n(2).txt.
    assert_eq!(fs::read_to_string(&log).unwrap().lines().count(), 1);
}
