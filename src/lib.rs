//! Core library for `bren`.
//!
//! Walks a directory tree and gives every regular file a new name derived by a
//! naming strategy, never replacing an existing file. The binary is a thin
//! layer over [`Walker`]; everything it does is reachable from here.

pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod platform;
pub mod rename;
pub mod shutdown;

pub use config::{
    LogLevel, RenameConfig, Settings, default_config_path, load_settings, load_settings_from,
    path_has_symlink_ancestor, validate_and_normalize,
};
pub use errors::BrenError;
pub use rename::{
    AlreadyExists, FileOutcome, FileReport, HookOutcome, RunReport, RunState, Strategy, Walker,
    candidate_path, construct, file_sha256, name_fragment, rename_no_replace, run_hook,
    split_extension,
};
