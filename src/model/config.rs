//! Detection configuration: category-pair rules, severity thresholds and the
//! persisted settings aggregate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryName;
use super::reference::ModelRef;

/// Lower bound applied to the configured auto-detection debounce window.
pub const MIN_DEBOUNCE_MS: u64 = 250;

/// An enabled/disabled pairing of two element categories checked against each
/// other within one configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPairRule {
    pub category_a: CategoryName,
    pub category_b: CategoryName,
    pub enabled: bool,
}

impl CategoryPairRule {
    pub fn new(category_a: impl Into<CategoryName>, category_b: impl Into<CategoryName>) -> Self {
        Self {
            category_a: category_a.into(),
            category_b: category_b.into(),
            enabled: true,
        }
    }

    /// A rule participates in detection only when enabled with both names
    /// non-empty.
    pub fn is_well_formed(&self) -> bool {
        self.enabled && !self.category_a.is_empty() && !self.category_b.is_empty()
    }
}

/// Cut points over the penetration-depth metric.
///
/// `medium_min <= high_min` is the intended ordering but is not enforced;
/// classification applies the High comparison first regardless (see
/// [`crate::severity::classify`]).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityThresholds {
    pub medium_min: f64,
    pub high_min: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            medium_min: 0.1,
            high_min: 0.5,
        }
    }
}

/// Display colors for the three severity tiers, carried with the persisted
/// configuration for whatever presentation layer consumes the results.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashColorSettings {
    pub low_color_hex: String,
    pub medium_color_hex: String,
    pub high_color_hex: String,
}

impl Default for ClashColorSettings {
    fn default() -> Self {
        Self {
            low_color_hex: "#E6B94A".to_string(),
            medium_color_hex: "#F97316".to_string(),
            high_color_hex: "#DC2626".to_string(),
        }
    }
}

/// A named, independently enabled detection unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashConfig {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub model_a: ModelRef,
    pub model_b: ModelRef,
    pub category_pairs: Vec<CategoryPairRule>,
    pub severity_thresholds: SeverityThresholds,
    pub color_settings: ClashColorSettings,
    pub run_in_manual_mode: bool,
    pub run_in_auto_mode: bool,
}

impl Default for ClashConfig {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "New Clash Config".to_string(),
            is_active: true,
            model_a: ModelRef::default(),
            model_b: ModelRef::default(),
            category_pairs: Vec::new(),
            severity_thresholds: SeverityThresholds::default(),
            color_settings: ClashColorSettings::default(),
            run_in_manual_mode: true,
            run_in_auto_mode: true,
        }
    }
}

impl ClashConfig {
    /// Bootstrap configuration used when no settings exist yet.
    pub fn default_config() -> Self {
        Self {
            name: "Default Config".to_string(),
            category_pairs: vec![CategoryPairRule::new("Ducts", "Pipes")],
            ..Self::default()
        }
    }

    /// Copy of this configuration under a freshly minted id. Without an
    /// explicit name the copy is called `"<name> Copy"`.
    pub fn duplicate(&self, new_name: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new_name
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} Copy", self.name)),
            ..self.clone()
        }
    }
}

/// Everything the settings repository persists between sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashSettingsState {
    pub configs: Vec<ClashConfig>,
    pub last_selected_config_id: Option<Uuid>,
    pub auto_mode_enabled: bool,
    pub auto_debounce_milliseconds: u64,
}

impl ClashSettingsState {
    pub fn create_default() -> Self {
        let config = ClashConfig::default_config();
        let id = config.id;
        Self {
            configs: vec![config],
            last_selected_config_id: Some(id),
            auto_mode_enabled: false,
            auto_debounce_milliseconds: 1500,
        }
    }
}

impl Default for ClashSettingsState {
    fn default() -> Self {
        Self::create_default()
    }
}
