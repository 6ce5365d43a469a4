//! XML settings file support.
//! - Loads defaults for basename, strategy, hook and logging from config.xml (quick_xml).
//! - A missing file is fine; a malformed file or an unknown field is a configuration error.
//!
//! Notes:
//! - Command-line flags always win over values loaded here.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use crate::config::types::{LogLevel, RenameConfig};
use crate::errors::BrenError;
use crate::rename::Strategy;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    basename: Option<String>,
    strategy: Option<String>,
    hook: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Values read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub basename: Option<String>,
    pub strategy: Option<Strategy>,
    pub hook: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Fill the rename-related fields of `cfg`.
    pub fn apply_to(&self, cfg: &mut RenameConfig) {
        if let Some(b) = &self.basename {
            cfg.basename = Some(b.clone());
        }
        if let Some(s) = self.strategy {
            cfg.strategy = s;
        }
        if let Some(h) = &self.hook {
            cfg.post_rename_hook = Some(h.clone());
        }
    }
}

/// Load the settings file from its default location.
/// Returns the path it was read from, or None when there is no file.
pub fn load_settings() -> Result<Option<(PathBuf, Settings)>, BrenError> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file");
            return Ok(None);
        }
        Err(e) => return Err(invalid(&path, e.to_string())),
    };
    let settings = parse_settings(&content).map_err(|r| invalid(&path, r))?;
    debug!(path = %path.display(), "settings loaded");
    Ok(Some((path, settings)))
}

/// Read and parse one settings file; a missing file is an error here.
pub fn load_settings_from(path: &Path) -> Result<Settings, BrenError> {
    let content = fs::read_to_string(path).map_err(|e| invalid(path, e.to_string()))?;
    parse_settings(&content).map_err(|r| invalid(path, r))
}

fn invalid(path: &Path, reason: String) -> BrenError {
    BrenError::InvalidSettings {
        path: path.to_path_buf(),
        reason,
    }
}

/// Parse settings XML. Errors are plain messages; callers attach the path.
pub fn parse_settings(content: &str) -> Result<Settings, String> {
    let parsed: XmlConfig = from_xml_str(content).map_err(|e| e.to_string())?;

    let strategy = match non_empty(parsed.strategy) {
        Some(s) => Some(Strategy::parse(&s).ok_or_else(|| format!("invalid strategy: '{s}'"))?),
        None => None,
    };
    let log_level = match non_empty(parsed.log_level) {
        Some(s) => Some(LogLevel::parse(&s).ok_or_else(|| format!("invalid log level: '{s}'"))?),
        None => None,
    };

    Ok(Settings {
        basename: non_empty(parsed.basename),
        strategy,
        hook: non_empty(parsed.hook).map(PathBuf::from),
        log_level,
        log_file: non_empty(parsed.log_file).map(PathBuf::from),
    })
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let s = parse_settings(
            r#"<config>
  <basename> img </basename>
  <strategy>date</strategy>
  <hook>/usr/local/bin/after-rename</hook>
  <log_level>debug</log_level>
  <log_file>/tmp/bren.log</log_file>
</config>"#,
        )
        .unwrap();
        assert_eq!(s.basename.as_deref(), Some("img"));
        assert_eq!(s.strategy, Some(Strategy::FileModifiedDate));
        assert_eq!(s.hook, Some(PathBuf::from("/usr/local/bin/after-rename")));
        assert_eq!(s.log_level, Some(LogLevel::Debug));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/bren.log")));
    }

    #[test]
    fn empty_values_are_ignored() {
        let s = parse_settings("<config><basename>  </basename><log_file></log_file></config>")
            .unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_settings("<config><colour>red</colour></config>").unwrap_err();
        assert!(err.contains("unknown field"), "{err}");
    }

    #[test]
    fn bad_strategy_is_rejected() {
        let err = parse_settings("<config><strategy>fancy</strategy></config>").unwrap_err();
        assert!(err.contains("fancy"), "{err}");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("config.xml");
        match load_settings_from(&path) {
            Err(BrenError::InvalidSettings { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn apply_fills_rename_fields() {
        let settings = Settings {
            basename: Some("pic".into()),
            strategy: Some(Strategy::Random8),
            hook: Some(PathBuf::from("hook.sh")),
            ..Default::default()
        };
        let mut cfg = RenameConfig::default();
        settings.apply_to(&mut cfg);
        assert_eq!(cfg.basename.as_deref(), Some("pic"));
        assert_eq!(cfg.strategy, Strategy::Random8);
        assert_eq!(cfg.post_rename_hook, Some(PathBuf::from("hook.sh")));
    }
}
