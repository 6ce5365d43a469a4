//! Config module.
//! Provides the run configuration, the settings file location, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, path_has_symlink_ancestor};
pub use types::{LogLevel, RenameConfig};
pub use validate::validate_and_normalize;
pub use xml::{Settings, load_settings, load_settings_from, parse_settings};
