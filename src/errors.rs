//! Typed error definitions for bren.
//! Covers the failures that stop a run; per-file problems are reported as
//! `FileOutcome` values instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::rename::Strategy;

#[derive(Debug, Error)]
pub enum BrenError {
    #[error("Path to scan is not set; pass it as an argument or with -p")]
    RootMissing,

    #[error("{} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("{} is not a valid directory path", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("You must set the basename (-b) for the {strategy} strategy")]
    MissingBasename { strategy: Strategy },

    #[error("Basename '{0}' must not contain a path separator")]
    InvalidBasename(String),

    #[error("Invalid script path '{}'", .0.display())]
    InvalidHook(PathBuf),

    #[error("Invalid settings file {}: {reason}", .path.display())]
    InvalidSettings { path: PathBuf, reason: String },

    #[error("Out of resources while renaming {}; aborting run", .0.display())]
    ResourceExhausted(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl BrenError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            BrenError::RootMissing => 10,
            BrenError::RootNotFound(_) => 11,
            BrenError::RootNotDirectory(_) => 12,
            BrenError::MissingBasename { .. } => 13,
            BrenError::InvalidBasename(_) => 14,
            BrenError::InvalidHook(_) => 15,
            BrenError::InvalidSettings { .. } => 16,
            BrenError::ResourceExhausted(_) => 20,
            BrenError::Interrupted => 130,
        }
    }

    /// True for errors raised before any traversal starts.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BrenError::RootMissing
                | BrenError::RootNotFound(_)
                | BrenError::RootNotDirectory(_)
                | BrenError::MissingBasename { .. }
                | BrenError::InvalidBasename(_)
                | BrenError::InvalidHook(_)
                | BrenError::InvalidSettings { .. }
        )
    }
}
