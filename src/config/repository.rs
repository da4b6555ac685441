//! JSON-backed settings repository.
//!
//! Loading never fails: a missing or unparsable settings file falls back to
//! the default state, which is written back so the next session starts from a
//! valid file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::Result;
use crate::model::{ClashConfig, ClashSettingsState, MIN_DEBOUNCE_MS};

/// Loads and saves the persisted [`ClashSettingsState`] as pretty-printed
/// camelCase JSON at a fixed path.
pub struct JsonConfigRepository {
    settings_path: PathBuf,
}

impl JsonConfigRepository {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Load the settings state, bootstrapping defaults when the file is
    /// missing or corrupt.
    pub fn load(&self) -> ClashSettingsState {
        if !self.settings_path.exists() {
            return self.bootstrap_defaults();
        }

        let parsed = fs::read_to_string(&self.settings_path)
            .map_err(crate::error::Error::from)
            .and_then(|json| Ok(serde_json::from_str::<ClashSettingsState>(&json)?));
        match parsed {
            Ok(state) => {
                let state = normalize(state);
                info!("loaded clash settings from '{}'", self.settings_path.display());
                state
            }
            Err(err) => {
                error!("failed to load settings, falling back to defaults: {err}");
                self.bootstrap_defaults()
            }
        }
    }

    /// Normalize and write the state.
    pub fn save(&self, state: &ClashSettingsState) -> Result<()> {
        let normalized = normalize(state.clone());
        if let Some(dir) = self.settings_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&normalized)?;
        fs::write(&self.settings_path, json)?;
        info!("saved clash settings to '{}'", self.settings_path.display());
        Ok(())
    }

    fn bootstrap_defaults(&self) -> ClashSettingsState {
        let defaults = ClashSettingsState::create_default();
        if let Err(err) = self.save(&defaults) {
            error!("failed to write default settings: {err}");
        }
        defaults
    }
}

/// Repair loadable-but-degenerate states: blank names, an empty config list,
/// a debounce below the floor.
fn normalize(mut state: ClashSettingsState) -> ClashSettingsState {
    if state.configs.is_empty() {
        state.configs.push(ClashConfig::default_config());
    }
    for config in &mut state.configs {
        let trimmed = config.name.trim();
        config.name = if trimmed.is_empty() {
            "Unnamed Config".to_string()
        } else {
            trimmed.to_string()
        };
    }
    if state.auto_debounce_milliseconds < MIN_DEBOUNCE_MS {
        state.auto_debounce_milliseconds = MIN_DEBOUNCE_MS;
    }
    state
}
