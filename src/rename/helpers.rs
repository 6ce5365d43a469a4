//! I/O error helpers.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint
//! while keeping the original ErrorKind, so callers can still branch on it.
//!
//! Usage:
//!   fs::metadata(p).map_err(io_error_with_help_io("read metadata of", p))?;

use std::io;
use std::path::Path;

/// Short hint for well-known failure codes, if we have one.
fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; ensure no other process is using it"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted"),
            libc::EEXIST => Some("already exists; bren never overwrites"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("file name too long; use a shorter basename"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists; bren never overwrites"),
        _ => None,
    }
}

/// Format a human-friendly message with op/target plus hint and OS code.
fn build_message(op: &str, target: &str, e: &io::Error) -> String {
    let mut msg = format!("{op} {target}: {e}");
    if let Some(hint) = hint_for(e) {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Returns a closure for `.map_err(...)` that rewrites the message and keeps the ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| {
        let target = format!("'{}'", path.display());
        io::Error::new(e.kind(), build_message(op, &target, &e))
    }
}

/// Same as `io_error_with_help_io` for operations with a source and a destination.
pub fn io_error_with_help_pair<'a>(
    op: &'a str,
    src: &'a Path,
    dst: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| {
        let target = format!("'{}' -> '{}'", src.display(), dst.display());
        io::Error::new(e.kind(), build_message(op, &target, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_kind_and_mentions_path() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        let wrapped = io_error_with_help_io("rename", Path::new("/tmp/x"))(e);
        assert_eq!(wrapped.kind(), io::ErrorKind::NotFound);
        let msg = wrapped.to_string();
        assert!(msg.contains("rename '/tmp/x'"), "{msg}");
        assert!(msg.contains("path not found"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_os_code_is_reported() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        let msg = io_error_with_help_io("rename", Path::new("a"))(e).to_string();
        assert!(msg.contains("cross-filesystem"), "{msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::EXDEV)), "{msg}");
    }

    #[test]
    fn pair_message_names_both_paths() {
        let e = io::Error::from(io::ErrorKind::AlreadyExists);
        let msg = io_error_with_help_pair("rename", Path::new("a.txt"), Path::new("b.txt"))(e)
            .to_string();
        assert!(msg.starts_with("rename 'a.txt' -> 'b.txt':"), "{msg}");
        assert!(msg.contains("never overwrites"), "{msg}");
    }
}
