use crate::domain::{render_alternate, TagTemplate, Version};
use crate::error::{DoveError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "dove.json";

/// Persisted version state for one image.
///
/// Fields are declared in alphabetical order and alternates live in a
/// `BTreeMap`, so the written JSON always has sorted keys.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(
        default,
        alias = "alternateFormats",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub alternate_formats: BTreeMap<String, String>,

    pub format: String,

    pub version: Version,
}

impl VersionConfig {
    /// Creates a config with no alternate formats.
    pub fn new(format: impl Into<String>, version: Version) -> Self {
        VersionConfig {
            alternate_formats: BTreeMap::new(),
            format: format.into(),
            version,
        }
    }

    /// Returns a copy of this config carrying `version`.
    pub fn with_version(&self, version: Version) -> Self {
        VersionConfig {
            version,
            ..self.clone()
        }
    }

    /// Renders the tag for the current version.
    ///
    /// # Arguments
    /// * `alternate` - Name of an alternate format to use instead of `format`
    ///
    /// # Returns
    /// * `Ok(String)` - The rendered tag
    /// * `Err` - `AlternateNotFound` for an unknown alternate, `FormatMismatch` for a bad template
    pub fn render(&self, alternate: Option<&str>) -> Result<String> {
        let components = self.version.components();
        match alternate {
            Some(name) => render_alternate(components, name, &self.alternate_formats),
            None => TagTemplate::new(self.format.as_str()).render(components),
        }
    }

    /// Serializes the config as 4-space indented JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| DoveError::config_invalid(e.to_string()))
    }
}

/// Reads and writes a [`VersionConfig`] at a fixed path.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Resolves the config location.
    ///
    /// Resolution order:
    /// 1. `config_path` if given (relative paths are joined onto `working_dir`)
    /// 2. `dove.json` inside `working_dir`
    pub fn locate(working_dir: &Path, config_path: Option<&Path>) -> Self {
        let path = match config_path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => working_dir.join(p),
            None => working_dir.join(CONFIG_FILE),
        };
        ConfigStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the config.
    ///
    /// # Returns
    /// * `Ok(VersionConfig)` - Parsed config with `version` and `format` present
    /// * `Err(ConfigNotFound)` - If the file is missing or unreadable
    /// * `Err(ConfigInvalid)` - If the JSON is malformed or a required key is missing
    pub fn load(&self) -> Result<VersionConfig> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DoveError::config_not_found(&self.path, e))?;
        let config: VersionConfig = serde_json::from_str(&raw)
            .map_err(|e| DoveError::config_invalid(format!("{}: {}", self.path.display(), e)))?;
        debug!(
            path = %self.path.display(),
            version = %config.version,
            alternates = config.alternate_formats.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Replaces the stored config with `config`.
    pub fn save(&self, config: &VersionConfig) -> Result<()> {
        let json = config.to_json()?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), version = %config.version, "saved config");
        Ok(())
    }
}
