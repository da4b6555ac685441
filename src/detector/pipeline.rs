//! Detection pipeline orchestrating end-to-end clash matching.
//!
//! One [`ClashDetector::run`] call is one synchronous sweep over the
//! requested configurations. Per configuration the stages are:
//!
//! - Resolve: map both model references through the snapshot provider.
//! - Snapshot: collect elements for exactly the categories named by the
//!   enabled rules, normalizing each model transform once and mapping every
//!   bounding box into host space up front.
//! - Candidates: per rule, cross the two category buckets, skipping
//!   self-pairs, the reversed direction of same-model pairs, out-of-scope
//!   pairs on incremental runs, and non-overlapping bounds.
//! - Confirm: run every solid-pair combination through the geometry oracle,
//!   keep the largest intersection volume and a representative center, and
//!   convert the volume to a length-unit depth via cube root.
//! - Emit: dedup against the run's seen-set, classify severity, attach the
//!   category-pair suggestion.
//!
//! A configuration whose resolution or evaluation fails is logged and
//! contributes nothing; the remaining configurations still execute.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::Utc;
use log::{debug, error, warn};
use nalgebra::Point3;

use super::contracts::{GeometryOracle, ResolvedModel, SnapshotProvider};
use super::snapshot::ElementSnapshot;
use super::workspace::RunWorkspace;
use crate::error::Result;
use crate::model::{
    CategoryName, ChangedElements, ClashConfig, ClashLocation, ClashResult, DetectionMetrics,
    DetectionRequest, DetectionRunSummary, ModelRef,
};
use crate::suggestion::{RuleBasedSuggestionProvider, SuggestionProvider};
use crate::{dedup, scope, severity, transform};

/// Intersection volumes at or below this tolerance do not count as clashes;
/// bounding boxes may overlap while no true geometric intersection exists.
const INTERSECTION_TOLERANCE: f64 = 1e-9;

/// Clash detection orchestrator over an injected snapshot provider, geometry
/// oracle and suggestion provider.
pub struct ClashDetector<P, O, S = RuleBasedSuggestionProvider> {
    provider: P,
    oracle: O,
    suggestions: S,
}

#[derive(Default)]
struct ConfigScan {
    results: Vec<ClashResult>,
    elements_scanned: usize,
    candidate_pairs: usize,
}

impl<P, O> ClashDetector<P, O>
where
    P: SnapshotProvider,
    O: GeometryOracle<Solid = P::Solid>,
{
    /// Detector with the built-in rule-based suggestion table.
    pub fn new(provider: P, oracle: O) -> Self {
        Self {
            provider,
            oracle,
            suggestions: RuleBasedSuggestionProvider::new(),
        }
    }
}

impl<P, O, S> ClashDetector<P, O, S>
where
    P: SnapshotProvider,
    O: GeometryOracle<Solid = P::Solid>,
    S: SuggestionProvider,
{
    pub fn with_suggestions(provider: P, oracle: O, suggestions: S) -> Self {
        Self {
            provider,
            oracle,
            suggestions,
        }
    }

    /// Run one detection sweep.
    ///
    /// Returns an empty summary when the request carries no configurations or
    /// the provider has no resolvable host context. Configurations execute in
    /// input order; inactive ones are skipped, and on incremental requests so
    /// are configurations whose models report no changes. Per-configuration
    /// metrics are recorded even when evaluation fails.
    pub fn run(&self, request: &DetectionRequest) -> DetectionRunSummary {
        let mut summary = DetectionRunSummary::empty();
        if request.active_configs.is_empty() {
            return summary;
        }

        if let Err(err) = self.provider.resolve_model(&ModelRef::host("Host")) {
            warn!("skipping clash run: no host model context ({err})");
            return summary;
        }

        let total_start = Instant::now();
        let mut total_elements = 0usize;
        let mut total_candidates = 0usize;
        let mut total_confirmed = 0usize;

        for config in &request.active_configs {
            if !config.is_active {
                continue;
            }
            if request.is_incremental
                && !scope::should_process_config(config, &request.changed_element_ids_by_model)
            {
                debug!("config '{}' out of incremental scope", config.name);
                continue;
            }

            let mut metrics = DetectionMetrics::default();
            let config_start = Instant::now();
            match self.detect_for_config(
                config,
                request.is_incremental,
                &request.changed_element_ids_by_model,
            ) {
                Ok(scan) => {
                    metrics.elements_scanned = scan.elements_scanned;
                    metrics.candidate_pairs = scan.candidate_pairs;
                    metrics.confirmed_clashes = scan.results.len();
                    total_elements += scan.elements_scanned;
                    total_candidates += scan.candidate_pairs;
                    total_confirmed += scan.results.len();
                    summary.results.extend(scan.results);
                }
                Err(err) => {
                    error!("error while processing config '{}': {err}", config.name);
                }
            }
            metrics.duration_ms = config_start.elapsed().as_secs_f64() * 1000.0;
            summary.metrics_by_config.insert(config.id, metrics);
        }

        summary.total_metrics = DetectionMetrics {
            timestamp_utc: Utc::now(),
            duration_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            elements_scanned: total_elements,
            candidate_pairs: total_candidates,
            confirmed_clashes: total_confirmed,
        };
        summary
    }

    fn detect_for_config(
        &self,
        config: &ClashConfig,
        is_incremental: bool,
        changed: &ChangedElements,
    ) -> Result<ConfigScan> {
        let resolved_a = self.provider.resolve_model(&config.model_a)?;
        let resolved_b = self.provider.resolve_model(&config.model_b)?;

        let rules: Vec<_> = config
            .category_pairs
            .iter()
            .filter(|rule| rule.is_well_formed())
            .collect();
        if rules.is_empty() {
            debug!("config '{}' has no enabled category pairs", config.name);
            return Ok(ConfigScan::default());
        }

        let categories_a: HashSet<CategoryName> =
            rules.iter().map(|rule| rule.category_a.clone()).collect();
        let categories_b: HashSet<CategoryName> =
            rules.iter().map(|rule| rule.category_b.clone()).collect();

        let snapshots_a = self.collect_snapshots(&resolved_a, &categories_a)?;
        let snapshots_b = self.collect_snapshots(&resolved_b, &categories_b)?;
        let elements_scanned = snapshots_a.len() + snapshots_b.len();

        let by_category_a = group_by_category(&snapshots_a);
        let by_category_b = group_by_category(&snapshots_b);

        let mut workspace = RunWorkspace::new();
        let run_timestamp = Utc::now();
        let mut results = Vec::new();
        let mut candidate_pairs = 0usize;

        for rule in &rules {
            let (Some(bucket_a), Some(bucket_b)) = (
                by_category_a.get(&rule.category_a),
                by_category_b.get(&rule.category_b),
            ) else {
                continue;
            };

            for element_a in bucket_a {
                for element_b in bucket_b {
                    let same_model = element_a.model_key == element_b.model_key;
                    if same_model && element_a.element_id == element_b.element_id {
                        continue;
                    }
                    // Same-model pairs are evaluated smaller-id-first only;
                    // the mirror direction would re-score the identical pair.
                    if same_model && element_a.element_id > element_b.element_id {
                        continue;
                    }
                    if is_incremental
                        && !scope::should_evaluate_pair(
                            config,
                            element_a.element_id,
                            element_b.element_id,
                            changed,
                        )
                    {
                        continue;
                    }
                    if !element_a.bounds.overlaps(&element_b.bounds) {
                        continue;
                    }

                    candidate_pairs += 1;

                    let Some((penetration_depth, location)) = self.confirm_intersection(
                        element_a,
                        element_b,
                        &resolved_a,
                        &resolved_b,
                        &mut workspace,
                    )?
                    else {
                        continue;
                    };

                    let dedup_key = dedup::dedup_key(
                        config.id,
                        &element_a.model_key,
                        element_a.element_id,
                        &element_b.model_key,
                        element_b.element_id,
                    );
                    if !workspace.mark_seen(&dedup_key) {
                        continue;
                    }

                    let severity =
                        severity::classify(penetration_depth, &config.severity_thresholds);
                    let suggestion = self
                        .suggestions
                        .suggestion(&rule.category_a, &rule.category_b);

                    results.push(ClashResult {
                        config_id: config.id,
                        config_name: config.name.clone(),
                        model_a: element_a.model_ref.clone(),
                        model_b: element_b.model_ref.clone(),
                        element_a_id: element_a.element_id,
                        element_b_id: element_b.element_id,
                        category_a: element_a.category.clone(),
                        category_b: element_b.category.clone(),
                        severity,
                        penetration_depth,
                        location,
                        suggestion,
                        run_timestamp_utc: run_timestamp,
                        dedup_key,
                    });
                }
            }
        }

        Ok(ConfigScan {
            results,
            elements_scanned,
            candidate_pairs,
        })
    }

    fn collect_snapshots(
        &self,
        model: &ResolvedModel,
        categories: &HashSet<CategoryName>,
    ) -> Result<Vec<ElementSnapshot>> {
        let normalized =
            transform::normalize(&model.transform_to_host, transform::DEFAULT_EPSILON);
        let records = self.provider.elements(model, categories)?;
        Ok(records
            .into_iter()
            .map(|record| ElementSnapshot::from_record(record, model, &normalized))
            .collect())
    }

    /// Confirm a candidate through the oracle: best volume across all
    /// solid-pair combinations, converted to a depth with length units.
    /// `None` when the boxes overlapped but no solid pair truly intersects.
    fn confirm_intersection(
        &self,
        element_a: &ElementSnapshot,
        element_b: &ElementSnapshot,
        model_a: &ResolvedModel,
        model_b: &ResolvedModel,
        workspace: &mut RunWorkspace<P::Solid>,
    ) -> Result<Option<(f64, ClashLocation)>> {
        workspace.ensure_solids(&self.provider, model_a, element_a.element_id)?;
        workspace.ensure_solids(&self.provider, model_b, element_b.element_id)?;
        let solids_a = workspace.solids(&element_a.model_key, element_a.element_id);
        let solids_b = workspace.solids(&element_b.model_key, element_b.element_id);
        if solids_a.is_empty() || solids_b.is_empty() {
            return Ok(None);
        }

        // Fall back to the midpoint of the two element boxes when the oracle
        // reports neither bounds nor a usable centroid winner.
        let mut best_center = Point3::from(
            (element_a.bounds.center().coords + element_b.bounds.center().coords) * 0.5,
        );
        let mut best_volume = 0.0f64;
        let mut found = false;

        for solid_a in solids_a {
            for solid_b in solids_b {
                let intersection = match self.oracle.intersect(solid_a, solid_b) {
                    Ok(Some(intersection)) => intersection,
                    Ok(None) => continue,
                    Err(err) => {
                        debug!("solid intersection failed, treated as no intersection: {err}");
                        continue;
                    }
                };
                if intersection.volume <= INTERSECTION_TOLERANCE {
                    continue;
                }
                found = true;
                if intersection.volume > best_volume {
                    best_volume = intersection.volume;
                    best_center = intersection
                        .bounds
                        .map(|bounds| bounds.center())
                        .unwrap_or(intersection.centroid);
                }
            }
        }

        if !found {
            return Ok(None);
        }

        let location = ClashLocation {
            x: best_center.x,
            y: best_center.y,
            z: best_center.z,
        };
        Ok(Some((best_volume.cbrt(), location)))
    }
}

fn group_by_category(
    snapshots: &[ElementSnapshot],
) -> HashMap<&CategoryName, Vec<&ElementSnapshot>> {
    let mut grouped: HashMap<&CategoryName, Vec<&ElementSnapshot>> = HashMap::new();
    for snapshot in snapshots {
        grouped.entry(&snapshot.category).or_default().push(snapshot);
    }
    grouped
}
