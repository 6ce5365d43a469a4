//! Naming strategies.
//!
//! A strategy turns one source file into the name fragment of its destination:
//! the part without directory and extension. Strategies only read from the
//! filesystem (metadata or content); the counter and the random generator live
//! in `RunState`, which the walker owns and threads through every call.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use super::helpers::io_error_with_help_io;
use super::path::split_extension;

/// Timestamp layout used by the modification-date strategy.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Number of letters appended by the random strategy.
pub const RANDOM_LEN: usize = 8;

const HASH_CHUNK: usize = 64 * 1024;

/// How new names are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// `basename(n)`, numbered in traversal order.
    #[default]
    SequentialCounter,
    /// The current stem, optionally prefixed with the basename.
    OriginalName,
    /// `basename` followed by the local modification time.
    FileModifiedDate,
    /// `basename` followed by eight random uppercase letters.
    Random8,
    /// Hex SHA-256 of the file content.
    ContentHash,
}

impl Strategy {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" | "count" | "default" | "sequential" => Some(Strategy::SequentialCounter),
            "original" | "name" => Some(Strategy::OriginalName),
            "date" | "mtime" => Some(Strategy::FileModifiedDate),
            "random" => Some(Strategy::Random8),
            "sha256" | "hash" => Some(Strategy::ContentHash),
            _ => None,
        }
    }

    /// Whether a non-empty basename must be configured.
    pub fn requires_basename(self) -> bool {
        matches!(
            self,
            Strategy::SequentialCounter | Strategy::FileModifiedDate | Strategy::Random8
        )
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::SequentialCounter => "counter",
            Strategy::OriginalName => "original",
            Strategy::FileModifiedDate => "date",
            Strategy::Random8 => "random",
            Strategy::ContentHash => "sha256",
        };
        f.write_str(s)
    }
}

impl FromStr for Strategy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid strategy: '{s}'"))
    }
}

/// Mutable state of one run.
pub struct RunState {
    files_seen: u64,
    rng: StdRng,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            files_seen: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic random names, for previews and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            files_seen: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Regular files visited so far.
    pub fn files_seen(&self) -> u64 {
        self.files_seen
    }

    /// Count one more visited file and return the new total.
    pub(crate) fn next_file(&mut self) -> u64 {
        self.files_seen += 1;
        self.files_seen
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the name fragment for `path`.
///
/// The counter must already include `path`; see `RunState::next_file`.
pub fn name_fragment(
    strategy: Strategy,
    path: &Path,
    basename: Option<&str>,
    state: &mut RunState,
) -> io::Result<OsString> {
    let prefix = basename.unwrap_or("");
    let fragment = match strategy {
        Strategy::SequentialCounter => OsString::from(format!("{prefix}({})", state.files_seen)),
        Strategy::FileModifiedDate => {
            let modified = fs::metadata(path)
                .and_then(|m| m.modified())
                .map_err(io_error_with_help_io("read modification time of", path))?;
            let local: DateTime<Local> = modified.into();
            OsString::from(format!("{prefix}{}", local.format(DATE_FORMAT)))
        }
        Strategy::Random8 => {
            let letters: String = (0..RANDOM_LEN)
                .map(|_| state.rng.gen_range('A'..='Z'))
                .collect();
            OsString::from(format!("{prefix}{letters}"))
        }
        Strategy::OriginalName => {
            let file_name = path.file_name().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' has no file name", path.display()),
                )
            })?;
            let (stem, _) = split_extension(file_name);
            let mut name = OsString::from(prefix);
            name.push(stem);
            name
        }
        Strategy::ContentHash => OsString::from(
            file_sha256(path).map_err(io_error_with_help_io("hash content of", path))?,
        ),
    };
    Ok(fragment)
}

/// Lowercase hex SHA-256 of a file, read in chunks.
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; HASH_CHUNK];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
