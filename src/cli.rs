//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `--path` takes precedence over the positional PATH.
//! - Strategy selectors form one argument group; giving two is a usage error.
//! - `--debug` is a shorthand for `--log-level debug`.

use clap::{ArgGroup, Parser, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{LogLevel, RenameConfig};
use crate::config::xml::Settings;
use crate::rename::Strategy;

/// Bulk rename files in a directory tree without ever overwriting.
/// CLI flags override values from the settings file.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Bulk rename files in a directory tree without ever overwriting",
    group(
        ArgGroup::new("naming")
            .args(["date", "random", "original", "sha256", "strategy"])
            .multiple(false)
    )
)]
pub struct Args {
    /// Directory to scan (positional form).
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub path_pos: Option<PathBuf>,

    /// Directory to scan; overrides the positional PATH.
    #[arg(short = 'p', long = "path", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Basename for new file names.
    #[arg(short = 'b', long, value_name = "NAME")]
    pub basename: Option<String>,

    /// Run FILE with the new path after each rename.
    #[arg(short = 'c', long = "script", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub script: Option<PathBuf>,

    /// Drop file extensions instead of carrying them over.
    #[arg(short = 'e', long)]
    pub strip_extension: bool,

    /// Rename only files directly inside PATH.
    #[arg(short = 't', long)]
    pub top_only: bool,

    /// Print what would be renamed, but change nothing.
    #[arg(short = 'D', long)]
    pub dry_run: bool,

    /// Name files by basename + modification date.
    #[arg(short = 'd', long)]
    pub date: bool,

    /// Name files by basename + eight random letters.
    #[arg(short = 'r', long)]
    pub random: bool,

    /// Keep the original name, optionally prefixed by the basename.
    #[arg(short = 'o', long)]
    pub original: bool,

    /// Name files by the SHA-256 of their content.
    #[arg(short = 's', long)]
    pub sha256: bool,

    /// Strategy by name: counter, original, date, random, sha256.
    #[arg(long, value_name = "NAME")]
    pub strategy: Option<Strategy>,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL", help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<LogLevel>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Also append log lines to FILE.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where bren looks for its settings file, then exit.
    #[arg(long, help = "Print the settings file location used by bren and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective scan path: `--path` if provided, else the positional PATH.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .or(self.path_pos.as_deref())
            .map(Self::sanitize_path)
    }

    /// Strategy chosen on the command line, if any.
    pub fn selected_strategy(&self) -> Option<Strategy> {
        if self.date {
            Some(Strategy::FileModifiedDate)
        } else if self.random {
            Some(Strategy::Random8)
        } else if self.original {
            Some(Strategy::OriginalName)
        } else if self.sha256 {
            Some(Strategy::ContentHash)
        } else {
            self.strategy
        }
    }

    /// Undo quoting left behind by PowerShell/CMD or shell escaping mistakes.
    /// Non-UTF-8 paths are returned unchanged.
    fn sanitize_path(p: &Path) -> PathBuf {
        match p.to_str() {
            Some(s) => Self::sanitize_str(s),
            None => p.to_path_buf(),
        }
    }

    /// Strip one matching pair of surrounding quotes and one trailing separator.
    /// Quotes inside the path are part of the name and stay.
    #[inline]
    fn sanitize_str(s: &str) -> PathBuf {
        let quoted = s.len() >= 2
            && ((s.starts_with('"') && s.ends_with('"'))
                || (s.starts_with('\'') && s.ends_with('\'')));
        let inner = if quoted { &s[1..s.len() - 1] } else { s };

        // Never reduce "/" to "" or "C:\\" to the drive-relative "C:".
        let trimmed = match inner.strip_suffix(['/', '\\']) {
            Some(rest) if !rest.is_empty() && !rest.ends_with(':') => rest,
            _ => inner,
        };

        PathBuf::from(trimmed)
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use settings/default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Build the run configuration: CLI > settings file > defaults.
    pub fn build_config(&self, settings: Option<&Settings>) -> RenameConfig {
        let mut cfg = RenameConfig::default();
        if let Some(s) = settings {
            s.apply_to(&mut cfg);
        }
        self.apply_overrides(&mut cfg);
        cfg
    }

    /// Apply CLI overrides in place. No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut RenameConfig) {
        if let Some(root) = self.resolved_path() {
            cfg.root_path = root;
        }
        if let Some(s) = self.selected_strategy() {
            cfg.strategy = s;
        }
        if let Some(b) = &self.basename {
            cfg.basename = Some(b.clone());
        }
        if let Some(h) = &self.script {
            cfg.post_rename_hook = Some(h.clone());
        }
        if self.strip_extension {
            cfg.strip_extension = true;
        }
        if self.top_only {
            cfg.recursive = false;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_quotes_and_one_trailing_slash() {
        assert_eq!(Args::sanitize_str("'/tmp/photos/'"), PathBuf::from("/tmp/photos"));
        assert_eq!(Args::sanitize_str("\"dir\""), PathBuf::from("dir"));
        assert_eq!(Args::sanitize_str("/"), PathBuf::from("/"));
        assert_eq!(Args::sanitize_str("C:\\"), PathBuf::from("C:\\"));
    }

    #[test]
    fn inner_quotes_are_kept() {
        assert_eq!(
            Args::sanitize_str("/data/Bob's photos"),
            PathBuf::from("/data/Bob's photos")
        );
        assert_eq!(Args::sanitize_str("'it's'"), PathBuf::from("it's"));
        assert_eq!(Args::sanitize_str("\"half"), PathBuf::from("\"half"));
    }

    #[test]
    fn settings_fill_gaps_and_flags_win() {
        let args = Args::parse_from(["bren", "-o", "-b", "cli", "/data"]);
        let settings = Settings {
            basename: Some("file".into()),
            strategy: Some(Strategy::Random8),
            hook: Some(PathBuf::from("/bin/true")),
            ..Default::default()
        };
        let cfg = args.build_config(Some(&settings));
        assert_eq!(cfg.root_path, PathBuf::from("/data"));
        assert_eq!(cfg.strategy, Strategy::OriginalName);
        assert_eq!(cfg.basename.as_deref(), Some("cli"));
        assert_eq!(cfg.post_rename_hook, Some(PathBuf::from("/bin/true")));
        assert!(cfg.recursive);
    }

    #[test]
    fn strategy_by_name() {
        let args = Args::parse_from(["bren", "--strategy", "sha256", "."]);
        assert_eq!(args.selected_strategy(), Some(Strategy::ContentHash));
    }
}
