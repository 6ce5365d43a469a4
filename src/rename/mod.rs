//! Rename engine: naming strategies, destination paths and the tree walker.

mod helpers;
pub mod hook;
pub mod mover;
pub mod path;
pub mod strategy;
pub mod walker;

pub use hook::{HookOutcome, run_hook};
pub use mover::rename_no_replace;
pub use path::{AlreadyExists, candidate_path, construct, split_extension};
pub use strategy::{RunState, Strategy, file_sha256, name_fragment};
pub use walker::{FileOutcome, FileReport, RunReport, Walker};
