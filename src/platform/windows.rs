//! Windows implementations of platform helpers (best-effort).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; no ACL management is attempted.
//! - Directory handles cannot be fsynced through std, so `sync_dir` is a no-op.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Open log file for appending.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
