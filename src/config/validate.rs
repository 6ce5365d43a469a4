//! Config validation logic.
//! Everything here runs before the walk starts; a failure means no file is touched.

use std::fs;
use std::path::{self, Path};
use tracing::{debug, info};

use crate::errors::BrenError;

use super::types::RenameConfig;

impl RenameConfig {
    /// Check the root directory and the basename requirement of the strategy.
    pub fn validate(&self) -> Result<(), BrenError> {
        ensure_dir_exists_and_is_dir(&self.root_path)?;

        let basename = self.basename.as_deref().unwrap_or("");
        if self.strategy.requires_basename() && basename.is_empty() {
            return Err(BrenError::MissingBasename {
                strategy: self.strategy,
            });
        }
        if basename.chars().any(path::is_separator) {
            return Err(BrenError::InvalidBasename(basename.to_string()));
        }

        if let Some(hook) = &self.post_rename_hook
            && hook.as_os_str().is_empty()
        {
            return Err(BrenError::InvalidHook(hook.clone()));
        }

        info!(
            root = %self.root_path.display(),
            strategy = %self.strategy,
            basename = basename,
            hook = %self
                .post_rename_hook
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into()),
            "Config validated"
        );
        Ok(())
    }
}

/// Validate, then canonicalize an existing hook path so it runs as a file,
/// not as a command looked up on PATH.
pub fn validate_and_normalize(cfg: &mut RenameConfig) -> Result<(), BrenError> {
    cfg.validate()?;
    if let Some(hook) = cfg.post_rename_hook.as_mut()
        && hook.is_file()
        && let Ok(abs) = dunce::canonicalize(&*hook)
    {
        debug!(hook = %abs.display(), "hook resolved");
        *hook = abs;
    }
    Ok(())
}

/// Ensure path exists and is a directory.
fn ensure_dir_exists_and_is_dir(path: &Path) -> Result<(), BrenError> {
    match fs::metadata(path) {
        Err(_) => Err(BrenError::RootNotFound(path.to_path_buf())),
        Ok(meta) if !meta.is_dir() => Err(BrenError::RootNotDirectory(path.to_path_buf())),
        Ok(_) => Ok(()),
    }
}
