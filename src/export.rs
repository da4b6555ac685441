//! CSV export of clash results joined with per-configuration metrics.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use uuid::Uuid;

use crate::error::Result;
use crate::model::{ClashResult, DetectionMetrics};

const HEADER: &str = "RunTimestamp,ConfigName,ModelA,ModelB,ElementAId,ElementBId,CategoryA,CategoryB,Severity,PenetrationDepth,LocationX,LocationY,LocationZ,Suggestion,RunDurationMs,ElementsScanned,ClashesFound";

/// Write results as CSV. Each row carries its owning configuration's run
/// metrics (zeros when the configuration has no metrics entry).
pub fn write_csv<W: Write>(
    mut out: W,
    results: &[ClashResult],
    metrics_by_config: &HashMap<Uuid, DetectionMetrics>,
) -> Result<()> {
    writeln!(out, "{HEADER}")?;
    for result in results {
        let metrics = metrics_by_config.get(&result.config_id);
        let row = [
            escape(&result.run_timestamp_utc.to_rfc3339()),
            escape(&result.config_name),
            escape(&result.model_a.display_name),
            escape(&result.model_b.display_name),
            result.element_a_id.to_string(),
            result.element_b_id.to_string(),
            escape(result.category_a.as_str()),
            escape(result.category_b.as_str()),
            result.severity.to_string(),
            format_number(result.penetration_depth),
            format_number(result.location.x),
            format_number(result.location.y),
            format_number(result.location.z),
            escape(&result.suggestion),
            format_number(metrics.map_or(0.0, |m| m.duration_ms)),
            metrics.map_or(0, |m| m.elements_scanned).to_string(),
            metrics.map_or(0, |m| m.confirmed_clashes).to_string(),
        ];
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

/// Write results to a CSV file, creating parent directories as needed.
pub fn export_csv(
    path: impl AsRef<Path>,
    results: &[ClashResult],
    metrics_by_config: &HashMap<Uuid, DetectionMetrics>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let file = BufWriter::new(File::create(path)?);
    write_csv(file, results, metrics_by_config)
}

/// Quote a field only when it contains a quote, comma or line break;
/// embedded quotes are doubled.
fn escape(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Up to six fractional digits, trailing zeros trimmed (`2` rather than
/// `2.000000`).
fn format_number(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
