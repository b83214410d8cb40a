//! Filter engine settings
//!
//! Settings persist as JSON. A missing file means defaults; unknown keys are
//! ignored and missing keys take their default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tablekit_core::{Result, TableKitError};

use crate::regex_cache::DEFAULT_CAPACITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Number of compiled substring patterns kept per engine
    pub regex_cache_capacity: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            regex_cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl FilterSettings {
    /// Load from the user config directory, falling back to defaults when
    /// there is no config directory or no settings file
    pub fn load() -> Result<Self> {
        Self::load_or_default(Self::settings_path().as_deref())
    }

    /// Load from `path` if it names an existing file, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::debug!("No config directory, using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded filter settings");
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `<config dir>/tablekit/settings.json`, `None` when the platform has no
    /// config directory
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tablekit").join("settings.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.regex_cache_capacity == 0 {
            return Err(TableKitError::Configuration(
                "regex_cache_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
