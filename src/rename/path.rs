//! Destination path construction.
//!
//! Rules:
//! - The extension is whatever follows the last `.` of the file name. A leading
//!   dot does not start an extension (`.bashrc` has none) and an empty suffix
//!   (`notes.`) is treated as no extension.
//! - The destination lives in the same directory as the source.
//! - An occupied destination is reported, never overwritten.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The computed destination is already taken.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("File with name {} already exists", .path.display())]
pub struct AlreadyExists {
    pub path: PathBuf,
}

/// Split a file name into stem and extension.
pub fn split_extension(file_name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let p = Path::new(file_name);
    match (p.file_stem(), p.extension()) {
        (Some(stem), Some(ext)) if !ext.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// Extension of the final path component, if any.
pub fn extension_of(path: &Path) -> Option<&OsStr> {
    path.file_name().and_then(|n| split_extension(n).1)
}

/// Build the destination without touching the filesystem.
pub fn candidate_path(original: &Path, fragment: &OsStr, strip_extension: bool) -> PathBuf {
    let mut name = OsString::from(fragment);
    if !strip_extension && let Some(ext) = extension_of(original) {
        name.push(".");
        name.push(ext);
    }

    // A bare file name has an empty parent, which keeps the result relative.
    match original.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Build the destination and refuse it when something already occupies it.
///
/// Dangling symlinks count as occupied.
pub fn construct(
    original: &Path,
    fragment: &OsStr,
    strip_extension: bool,
) -> Result<PathBuf, AlreadyExists> {
    construct_with(original, fragment, strip_extension, |p| {
        fs::symlink_metadata(p).is_ok()
    })
}

/// Like `construct`, with the occupancy test supplied by the caller.
pub fn construct_with(
    original: &Path,
    fragment: &OsStr,
    strip_extension: bool,
    occupied: impl FnOnce(&Path) -> bool,
) -> Result<PathBuf, AlreadyExists> {
    let candidate = candidate_path(original, fragment, strip_extension);
    if occupied(&candidate) {
        return Err(AlreadyExists { path: candidate });
    }
    Ok(candidate)
}
