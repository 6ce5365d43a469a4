//! Atomic rename that never replaces an existing destination.
//! - Linux: renameat2(RENAME_NOREPLACE); macOS: renamex_np(RENAME_EXCL). The kernel
//!   refuses an occupied destination.
//! - Elsewhere, or when the filesystem lacks the flag: existence check followed by rename.
//!   The gap between the two is a known race; a destination created in between is
//!   overwritten on platforms whose rename replaces.
//! - Best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;
use tracing::trace;

use super::helpers::io_error_with_help_pair;
use crate::platform;

pub fn rename_no_replace(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(target_os = "linux")]
    match linux::renameat2_noreplace(src, dst) {
        Ok(()) => {
            sync_parent(dst);
            return Ok(());
        }
        Err(e) if linux::flag_unsupported(&e) => {
            trace!(error = %e, "RENAME_NOREPLACE unsupported here; using check + rename");
        }
        Err(e) => return Err(io_error_with_help_pair("rename", src, dst)(e)),
    }

    #[cfg(target_os = "macos")]
    match macos::renamex_excl(src, dst) {
        Ok(()) => {
            sync_parent(dst);
            return Ok(());
        }
        Err(e) if macos::flag_unsupported(&e) => {
            trace!(error = %e, "RENAME_EXCL unsupported here; using check + rename");
        }
        Err(e) => return Err(io_error_with_help_pair("rename", src, dst)(e)),
    }

    if fs::symlink_metadata(dst).is_ok() {
        let e = io::Error::from(io::ErrorKind::AlreadyExists);
        return Err(io_error_with_help_pair("rename", src, dst)(e));
    }
    fs::rename(src, dst).map_err(io_error_with_help_pair("rename", src, dst))?;
    sync_parent(dst);
    Ok(())
}

/// Persist the directory entry change; failures never undo a successful rename.
fn sync_parent(dst: &Path) {
    if let Some(parent) = dst.parent()
        && let Err(e) = platform::sync_dir(parent)
    {
        trace!(dir = %parent.display(), error = %e, "fsync of directory failed");
    }
}

#[cfg(any(target_os = "linux", target_os = "macos"))]
fn c_path(p: &Path) -> io::Result<std::ffi::CString> {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::CString::new(p.as_os_str().as_bytes())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))
}

#[cfg(target_os = "linux")]
mod linux {
    use std::io;
    use std::path::Path;

    use super::c_path;

    const RENAME_NOREPLACE: libc::c_uint = 1;

    pub(super) fn renameat2_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
        let c_src = c_path(src)?;
        let c_dst = c_path(dst)?;
        // SAFETY: both pointers come from live CStrings and AT_FDCWD resolves relative paths.
        let rc = unsafe {
            libc::syscall(
                libc::SYS_renameat2,
                libc::AT_FDCWD,
                c_src.as_ptr(),
                libc::AT_FDCWD,
                c_dst.as_ptr(),
                RENAME_NOREPLACE,
            )
        };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    pub(super) fn flag_unsupported(e: &io::Error) -> bool {
        matches!(
            e.raw_os_error(),
            Some(libc::EINVAL) | Some(libc::ENOSYS) | Some(libc::EOPNOTSUPP)
        )
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use std::io;
    use std::path::Path;

    use super::c_path;

    pub(super) fn renamex_excl(src: &Path, dst: &Path) -> io::Result<()> {
        let c_src = c_path(src)?;
        let c_dst = c_path(dst)?;
        // SAFETY: both pointers come from live CStrings.
        let rc = unsafe { libc::renamex_np(c_src.as_ptr(), c_dst.as_ptr(), libc::RENAME_EXCL) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    pub(super) fn flag_unsupported(e: &io::Error) -> bool {
        matches!(
            e.raw_os_error(),
            Some(libc::EINVAL) | Some(libc::ENOTSUP) | Some(libc::ENOSYS)
        )
    }
}
