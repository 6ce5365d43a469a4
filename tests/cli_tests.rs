use bren::cli::Args;
use bren::config::types::{LogLevel, RenameConfig};
use bren::Strategy;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn resolved_path_precedence_flag_over_positional() {
    let args = Args::parse_from(["bren", "-p", "/tmp/flag_path", "/tmp/pos_path"]);
    assert_eq!(args.resolved_path().unwrap(), PathBuf::from("/tmp/flag_path"));
}

#[test]
fn resolved_path_uses_positional_when_flag_absent() {
    let args = Args::parse_from(["bren", "/tmp/pos_path"]);
    assert_eq!(args.resolved_path().unwrap(), PathBuf::from("/tmp/pos_path"));
}

#[test]
fn resolved_path_trims_quotes() {
    let args = Args::parse_from(["bren", "--path", "'/tmp/quoted dir/'"]);
    assert_eq!(args.resolved_path().unwrap(), PathBuf::from("/tmp/quoted dir"));
}

#[test]
fn no_path_is_none() {
    let args = Args::parse_from(["bren", "-b", "img"]);
    assert!(args.resolved_path().is_none());
}

#[test]
fn strategy_flags() {
    for (flag, expected) in [
        ("-d", Strategy::FileModifiedDate),
        ("-r", Strategy::Random8),
        ("-o", Strategy::OriginalName),
        ("-s", Strategy::ContentHash),
    ] {
        let args = Args::parse_from(["bren", flag, "."]);
        assert_eq!(args.selected_strategy(), Some(expected), "{flag}");
    }
    let args = Args::parse_from(["bren", "."]);
    assert_eq!(args.selected_strategy(), None);
}

#[test]
fn conflicting_strategies_are_rejected() {
    assert!(Args::try_parse_from(["bren", "-d", "-r", "."]).is_err());
    assert!(Args::try_parse_from(["bren", "-s", "--strategy", "counter", "."]).is_err());
}

#[test]
fn unknown_strategy_name_is_rejected() {
    assert!(Args::try_parse_from(["bren", "--strategy", "fancy", "."]).is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["bren", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));

    let args = Args::parse_from(["bren", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "bren", "-b", "img", "-c", "/usr/bin/true", "-e", "-t", "-D", "-r", "/data",
    ]);
    let mut cfg = RenameConfig::default();
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root_path, PathBuf::from("/data"));
    assert_eq!(cfg.strategy, Strategy::Random8);
    assert_eq!(cfg.basename.as_deref(), Some("img"));
    assert_eq!(cfg.post_rename_hook, Some(PathBuf::from("/usr/bin/true")));
    assert!(cfg.strip_extension);
    assert!(!cfg.recursive);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_leave_config_alone() {
    let args = Args::parse_from(["bren"]);
    let mut cfg = RenameConfig::new("/keep", Strategy::OriginalName);
    cfg.basename = Some("keep".into());
    args.apply_overrides(&mut cfg);

    assert_eq!(cfg.root_path, PathBuf::from("/keep"));
    assert_eq!(cfg.strategy, Strategy::OriginalName);
    assert_eq!(cfg.basename.as_deref(), Some("keep"));
    assert!(cfg.recursive);
    assert!(!cfg.dry_run);
}

#[test]
fn apostrophe_inside_path_is_kept() {
    let args = Args::parse_from(["bren", "-b", "x", "/data/Bob's photos"]);
    assert_eq!(args.resolved_path().unwrap(), PathBuf::from("/data/Bob's photos"));

    let args = Args::parse_from(["bren", "-p", "\"/data/say \"hi\"\""]);
    assert_eq!(args.resolved_path().unwrap(), PathBuf::from("/data/say \"hi\""));
}

#[cfg(unix)]
#[test]
fn non_utf8_path_is_passed_through() {
    use std::ffi::{OsStr, OsString};
    use std::os::unix::ffi::OsStrExt;

    let raw = OsStr::from_bytes(b"/tmp/caf\xE9");
    let args = Args::parse_from([OsString::from("bren"), raw.to_os_string()]);
    assert_eq!(args.resolved_path().unwrap().as_os_str(), raw);
}

#[test]
fn bad_log_level_is_rejected() {
    assert!(Args::try_parse_from(["bren", "--log-level", "loud", "."]).is_err());
    let args = Args::parse_from(["bren", "--log-level", "quiet", "."]);
    assert_eq!(args.log_level, Some(LogLevel::Quiet));
}
