//! Post-rename hook.
//! Runs a user-supplied executable once per renamed file with the new absolute
//! path as its only argument. The hook's output is not inspected; a failure is
//! reported for that file and the run goes on.

use std::path::{self, Path};
use std::process::Command;
use tracing::debug;

use super::helpers::io_error_with_help_io;

/// What happened with the hook for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// No hook configured.
    NotConfigured,
    /// The file was not renamed, so the hook did not run.
    Skipped,
    /// Dry-run: the hook would have run.
    Announced,
    /// The hook ran and exited successfully.
    Succeeded,
    /// The hook could not be started or exited unsuccessfully.
    Failed { reason: String },
}

/// Run `hook` with the absolute form of `new_path` and wait for it.
pub fn run_hook(hook: &Path, new_path: &Path) -> HookOutcome {
    let arg = path::absolute(new_path).unwrap_or_else(|_| new_path.to_path_buf());
    debug!(hook = %hook.display(), arg = %arg.display(), "running post-rename hook");

    match Command::new(hook).arg(&arg).status() {
        Ok(status) if status.success() => HookOutcome::Succeeded,
        Ok(status) => HookOutcome::Failed {
            reason: format!("{} exited with {}", hook.display(), status),
        },
        Err(e) => HookOutcome::Failed {
            reason: io_error_with_help_io("run hook", hook)(e).to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hook_is_a_failure_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run_hook(&dir.path().join("no-such-hook"), Path::new("x.txt"));
        match outcome {
            HookOutcome::Failed { reason } => assert!(reason.contains("run hook"), "{reason}"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_outcome() {
        assert_eq!(
            run_hook(Path::new("/bin/sh"), Path::new("/dev/null")),
            HookOutcome::Succeeded
        );
        assert!(matches!(
            run_hook(Path::new("false"), Path::new("x")),
            HookOutcome::Failed { .. }
        ));
    }
}
