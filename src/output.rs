//! User-facing lines.
//! Plan lines and the run summary go to stdout so they can be piped; per-file
//! diagnostics go to stderr. Colors are enabled only when the stream is a TTY.

use owo_colors::OwoColorize;

fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain line with no prefix, e.g. `Rename: a to b`, which users may
/// script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
