//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the rename and
//! logging code stays platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, sync_dir};

#[cfg(not(unix))]
pub use windows::{open_log_file_secure_append, sync_dir};
