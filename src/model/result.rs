//! Run inputs and outputs: requests, confirmed clashes, metrics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryName;
use super::changes::ChangedElements;
use super::config::ClashConfig;
use super::reference::ModelRef;

/// Severity tier assigned to a confirmed clash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        })
    }
}

/// Representative 3D location of a clash in host coordinates.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ClashLocation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One confirmed, deduplicated clash. Immutable once produced; each run
/// yields a fresh batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashResult {
    pub config_id: Uuid,
    pub config_name: String,
    pub model_a: ModelRef,
    pub model_b: ModelRef,
    pub element_a_id: i64,
    pub element_b_id: i64,
    pub category_a: CategoryName,
    pub category_b: CategoryName,
    pub severity: SeverityLevel,
    pub penetration_depth: f64,
    pub location: ClashLocation,
    pub suggestion: String,
    pub run_timestamp_utc: DateTime<Utc>,
    pub dedup_key: String,
}

/// Counters and timing for one configuration (or, in
/// [`DetectionRunSummary::total_metrics`], for the whole run).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionMetrics {
    pub timestamp_utc: DateTime<Utc>,
    pub duration_ms: f64,
    pub elements_scanned: usize,
    pub candidate_pairs: usize,
    pub confirmed_clashes: usize,
}

impl Default for DetectionMetrics {
    fn default() -> Self {
        Self {
            timestamp_utc: Utc::now(),
            duration_ms: 0.0,
            elements_scanned: 0,
            candidate_pairs: 0,
            confirmed_clashes: 0,
        }
    }
}

/// Input to one detection run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRequest {
    pub active_configs: Vec<ClashConfig>,
    pub is_incremental: bool,
    pub changed_element_ids_by_model: ChangedElements,
}

impl DetectionRequest {
    /// A full (non-incremental) run over the given configurations.
    pub fn full(active_configs: Vec<ClashConfig>) -> Self {
        Self {
            active_configs,
            is_incremental: false,
            changed_element_ids_by_model: ChangedElements::new(),
        }
    }

    /// An incremental run restricted to the given changed-element scope.
    pub fn incremental(active_configs: Vec<ClashConfig>, changed: ChangedElements) -> Self {
        Self {
            active_configs,
            is_incremental: true,
            changed_element_ids_by_model: changed,
        }
    }
}

/// Aggregated output of one detection run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRunSummary {
    pub results: Vec<ClashResult>,
    pub metrics_by_config: HashMap<Uuid, DetectionMetrics>,
    #[serde(default)]
    pub total_metrics: DetectionMetrics,
}

impl DetectionRunSummary {
    pub fn empty() -> Self {
        Self::default()
    }
}
