//! Tree walker and executor.
//!
//! Visits every regular file under the root in pre-order, entries of each
//! directory sorted by name, and for each one: counts it, derives a name,
//! builds the destination, then renames (or previews) and runs the hook.
//! Every per-file problem is reported and the walk goes on; only resource
//! exhaustion aborts the run.
//!
//! The entries of a directory are read in full before any of them is renamed,
//! so a file renamed within its own directory is not visited a second time.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::config::types::RenameConfig;
use crate::errors::BrenError;
use crate::output as out;
use crate::shutdown;

use super::hook::{HookOutcome, run_hook};
use super::mover::rename_no_replace;
use super::path::{AlreadyExists, construct_with};
use super::strategy::{RunState, name_fragment};

/// Result of processing one regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Moved to `dest`.
    Renamed { dest: PathBuf },
    /// Dry-run: would have moved to `dest`.
    Planned { dest: PathBuf },
    /// `dest` was already taken; the file kept its name.
    SkippedExists { dest: PathBuf },
    /// The computed name is the current name.
    SkippedUnchanged,
    /// The file disappeared before it could be processed.
    Vanished,
    /// No name could be derived (unreadable metadata or content).
    NamingFailed { reason: String },
    /// The rename itself failed.
    MoveFailed { dest: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
    pub hook: HookOutcome,
}

/// Everything that happened during one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Directory entries that could not be read.
    pub walk_errors: usize,
    /// Stopped early by Ctrl-C.
    pub interrupted: bool,
}

impl RunReport {
    pub fn renamed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Renamed { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Planned { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::SkippedExists { .. } | FileOutcome::SkippedUnchanged | FileOutcome::Vanished
            )
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FileOutcome::NamingFailed { .. } | FileOutcome::MoveFailed { .. }
            )
        })
    }

    /// Destinations of renamed or planned files, in traversal order.
    pub fn destinations(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                FileOutcome::Renamed { dest } | FileOutcome::Planned { dest } => Some(dest.as_path()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Dry-run bookkeeping so the preview matches what a real run would do.
#[derive(Default)]
struct Preview {
    claimed: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl Preview {
    fn occupied(&self, candidate: &Path) -> bool {
        if self.claimed.contains(candidate) {
            return true;
        }
        if self.vacated.contains(candidate) {
            return false;
        }
        fs::symlink_metadata(candidate).is_ok()
    }
}

/// Drives one rename run over `config.root_path`.
pub struct Walker {
    config: RenameConfig,
    state: RunState,
    preview: Preview,
}

impl Walker {
    pub fn new(config: RenameConfig) -> Self {
        Self::with_state(config, RunState::new())
    }

    /// Start from a prepared state, e.g. a seeded random generator.
    pub fn with_state(config: RenameConfig, state: RunState) -> Self {
        Self {
            config,
            state,
            preview: Preview::default(),
        }
    }

    /// Walk the tree and process every regular file.
    pub fn run(mut self) -> Result<RunReport, BrenError> {
        let mut report = RunReport::default();
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };

        info!(
            root = %self.config.root_path.display(),
            strategy = %self.config.strategy,
            recursive = self.config.recursive,
            dry_run = self.config.dry_run,
            "starting rename run"
        );
        if self.config.dry_run {
            out::print_user("===============Dry run===============");
        }

        let entries = WalkDir::new(&self.config.root_path)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            if shutdown::is_requested() {
                warn!(files = report.files.len(), "interrupted; stopping before next file");
                report.interrupted = true;
                break;
            }

            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    report.walk_errors += 1;
                    warn!(error = %e, "cannot read directory entry");
                    out::print_warn(&format!("walk: {e}"));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                trace!(path = %entry.path().display(), "not a regular file; leaving as is");
                continue;
            }

            let file = self.process_file(entry.path())?;
            report.files.push(file);
        }

        info!(
            seen = self.state.files_seen(),
            renamed = report.renamed(),
            planned = report.planned(),
            skipped = report.skipped(),
            failed = report.failed(),
            walk_errors = report.walk_errors,
            "rename run finished"
        );
        Ok(report)
    }

    fn process_file(&mut self, src: &Path) -> Result<FileReport, BrenError> {
        let report = |outcome, hook| FileReport {
            source: src.to_path_buf(),
            outcome,
            hook,
        };
        let skipped_hook = if self.config.post_rename_hook.is_some() {
            HookOutcome::Skipped
        } else {
            HookOutcome::NotConfigured
        };

        // The entry may have been moved or deleted since its directory was read.
        if fs::symlink_metadata(src).is_err() {
            debug!(src = %src.display(), "vanished before processing");
            out::print_warn(&format!("{} does not exist, skipping...", src.display()));
            return Ok(report(FileOutcome::Vanished, skipped_hook));
        }

        let n = self.state.next_file();
        let fragment = match name_fragment(
            self.config.strategy,
            src,
            self.config.basename.as_deref(),
            &mut self.state,
        ) {
            Ok(f) => f,
            Err(e) => {
                debug!(src = %src.display(), n, error = %e, "no name derived");
                out::print_error(&format!("Renaming {} failed: {e}", src.display()));
                return Ok(report(
                    FileOutcome::NamingFailed {
                        reason: e.to_string(),
                    },
                    skipped_hook,
                ));
            }
        };

        let preview = &self.preview;
        let dry_run = self.config.dry_run;
        let built = construct_with(src, &fragment, self.config.strip_extension, |p| {
            if dry_run {
                preview.occupied(p)
            } else {
                fs::symlink_metadata(p).is_ok()
            }
        });
        let dest = match built {
            Ok(d) => d,
            Err(AlreadyExists { path }) if path == src => {
                debug!(src = %src.display(), "name unchanged");
                out::print_warn(&format!("Skipping. {} already has that name.", src.display()));
                return Ok(report(FileOutcome::SkippedUnchanged, skipped_hook));
            }
            Err(AlreadyExists { path }) => {
                debug!(src = %src.display(), dest = %path.display(), "destination exists");
                let name = path.file_name().unwrap_or(path.as_os_str());
                out::print_warn(&format!(
                    "Skipping. File with name {} already exists.",
                    Path::new(name).display()
                ));
                return Ok(report(FileOutcome::SkippedExists { dest: path }, skipped_hook));
            }
        };

        if self.config.dry_run {
            out::print_user(&format!("Rename: {} to {}", src.display(), dest.display()));
            self.preview.vacated.insert(src.to_path_buf());
            self.preview.vacated.remove(&dest);
            self.preview.claimed.insert(dest.clone());
            let hook = match &self.config.post_rename_hook {
                Some(h) => {
                    out::print_user(&format!("Executing script {}", h.display()));
                    HookOutcome::Announced
                }
                None => HookOutcome::NotConfigured,
            };
            return Ok(report(FileOutcome::Planned { dest }, hook));
        }

        if let Err(e) = rename_no_replace(src, &dest) {
            if e.kind() == io::ErrorKind::OutOfMemory {
                return Err(BrenError::ResourceExhausted(src.to_path_buf()));
            }
            debug!(src = %src.display(), dest = %dest.display(), error = %e, "rename failed");
            out::print_error(&format!("Renaming {} failed: {e}", src.display()));
            return Ok(report(
                FileOutcome::MoveFailed {
                    dest,
                    reason: e.to_string(),
                },
                skipped_hook,
            ));
        }
        debug!(src = %src.display(), dest = %dest.display(), n, "renamed");

        let hook = match &self.config.post_rename_hook {
            Some(h) => {
                let outcome = run_hook(h, &dest);
                if let HookOutcome::Failed { reason } = &outcome {
                    warn!(hook = %h.display(), dest = %dest.display(), %reason, "hook failed");
                    out::print_warn(&format!("Script failed for {}: {reason}", dest.display()));
                }
                outcome
            }
            None => HookOutcome::NotConfigured,
        };

        Ok(report(FileOutcome::Renamed { dest }, hook))
    }
}
