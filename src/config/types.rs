//! Core configuration types.
//! - RenameConfig describes one run and is immutable once the walker owns it.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::rename::Strategy;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings of one rename run.
#[derive(Debug, Clone)]
pub struct RenameConfig {
    /// Directory to scan
    pub root_path: PathBuf,
    /// How new names are derived
    pub strategy: Strategy,
    /// Prefix for new names; required by some strategies
    pub basename: Option<String>,
    /// Drop extensions instead of carrying them over
    pub strip_extension: bool,
    /// Descend into subdirectories; false limits the walk to depth 1
    pub recursive: bool,
    /// Print the plan but do not modify the filesystem
    pub dry_run: bool,
    /// Executable run with the new path after each rename
    pub post_rename_hook: Option<PathBuf>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            strategy: Strategy::default(),
            basename: None,
            strip_extension: false,
            recursive: true,
            dry_run: false,
            post_rename_hook: None,
        }
    }
}

impl RenameConfig {
    /// Construct a RenameConfig for `root_path`; other fields use defaults.
    pub fn new(root_path: impl Into<PathBuf>, strategy: Strategy) -> Self {
        Self {
            root_path: root_path.into(),
            strategy,
            ..Default::default()
        }
    }
}
