//! Summary and analytics tools
//!
//! Joins stored records with the analytics engine, and drives the flat
//! metrics-log pipeline: summarize, export, chart.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{
    all_metric_changes, analyze_metric_trends, average_weight_change, calculate_daily_summary,
    filter_by_date_range, milestone_crossings, read_metrics_log_file, rolling_weight_deltas,
    weight_samples_from_snapshots, weight_samples_from_weigh_ins, AverageWeightChange,
    DailySummary, MetricChange, MetricTrend, MilestoneCrossing, RollingWindowDelta, Snapshot,
};
use crate::db::Database;
use crate::export::export_summary_file;
use crate::models::{ActivityEntry, BodyMetric, FoodEntry, WeighIn};
use crate::report::render_weight_chart_file;

/// Date format accepted for range filters
pub const FILTER_DATE_FORMAT: &str = "%m-%d-%Y";

/// Response for get_daily_summaries
#[derive(Debug, Serialize)]
pub struct DailySummariesResponse {
    pub days: Vec<DailySummary>,
    pub total: usize,
}

/// Response for get_metric_trends
#[derive(Debug, Serialize)]
pub struct MetricTrendsResponse {
    pub trends: BTreeMap<BodyMetric, MetricTrend>,
    pub weigh_in_count: usize,
    pub latest_weigh_in: Option<WeighIn>,
}

/// Response for get_weight_progress
#[derive(Debug, Serialize)]
pub struct WeightProgressResponse {
    pub rolling: Vec<RollingWindowDelta>,
    pub average: Option<AverageWeightChange>,
    pub milestones: Vec<MilestoneCrossing>,
}

/// Response for summarize_metrics_log
#[derive(Debug, Serialize)]
pub struct MetricsLogSummaryResponse {
    pub snapshot_count: usize,
    pub metric_changes: Vec<MetricChange>,
    pub average: Option<AverageWeightChange>,
    pub rolling: Vec<RollingWindowDelta>,
    pub milestones: Vec<MilestoneCrossing>,
}

/// Response for export_metrics_log_summary
#[derive(Debug, Serialize)]
pub struct ExportSummaryResponse {
    pub snapshot_count: usize,
    pub file_path: String,
}

/// Response for render_weight_chart
#[derive(Debug, Serialize)]
pub struct WeightChartResponse {
    pub sample_count: usize,
    pub file_path: String,
}

/// Parse an optional MM-DD-YYYY filter date
fn parse_filter_date(date: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, FILTER_DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("Invalid date '{}'. Use MM-DD-YYYY.", s)),
        None => Ok(None),
    }
}

/// Load a metrics log and apply an optional date range filter
fn load_filtered_snapshots(
    log_path: &Path,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Vec<Snapshot>, String> {
    let start = parse_filter_date(start)?;
    let end = parse_filter_date(end)?;

    let snapshots = read_metrics_log_file(log_path)
        .map_err(|e| format!("Failed to read metrics log: {}", e))?;

    Ok(filter_by_date_range(&snapshots, start, end))
}

/// Calculate daily energy balance summaries from stored records
pub fn get_daily_summaries(db: &Database) -> Result<DailySummariesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let food = FoodEntry::list(&conn, None)
        .map_err(|e| format!("Failed to list food entries: {}", e))?;
    let activity = ActivityEntry::list(&conn, None)
        .map_err(|e| format!("Failed to list activity entries: {}", e))?;
    let weigh_ins = WeighIn::list(&conn, None)
        .map_err(|e| format!("Failed to list weigh-ins: {}", e))?;

    let days = calculate_daily_summary(&food, &activity, &weigh_ins);
    let total = days.len();

    Ok(DailySummariesResponse { days, total })
}

/// Analyze long-term trends across stored weigh-ins
pub fn get_metric_trends(db: &Database) -> Result<MetricTrendsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let weigh_ins = WeighIn::list(&conn, None)
        .map_err(|e| format!("Failed to list weigh-ins: {}", e))?;
    let latest = WeighIn::latest(&conn)
        .map_err(|e| format!("Failed to get latest weigh-in: {}", e))?;

    Ok(MetricTrendsResponse {
        trends: analyze_metric_trends(&weigh_ins),
        weigh_in_count: weigh_ins.len(),
        latest_weigh_in: latest,
    })
}

/// Rolling weight change, average rates, and milestone crossings from
/// stored weigh-ins
pub fn get_weight_progress(db: &Database) -> Result<WeightProgressResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let weigh_ins = WeighIn::list(&conn, None)
        .map_err(|e| format!("Failed to list weigh-ins: {}", e))?;
    let samples = weight_samples_from_weigh_ins(&weigh_ins);

    Ok(WeightProgressResponse {
        rolling: rolling_weight_deltas(&samples),
        average: average_weight_change(&samples),
        milestones: milestone_crossings(&samples),
    })
}

/// Summarize a long-format metrics log with an optional date range
pub fn summarize_metrics_log(
    log_path: &Path,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<MetricsLogSummaryResponse, String> {
    let snapshots = load_filtered_snapshots(log_path, start, end)?;
    let samples = weight_samples_from_snapshots(&snapshots);

    Ok(MetricsLogSummaryResponse {
        snapshot_count: snapshots.len(),
        metric_changes: all_metric_changes(&snapshots),
        average: average_weight_change(&samples),
        rolling: rolling_weight_deltas(&samples),
        milestones: milestone_crossings(&samples),
    })
}

/// Export the four-section summary of a metrics log to a delimited file
pub fn export_metrics_log_summary(
    log_path: &Path,
    out_path: &Path,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<ExportSummaryResponse, String> {
    let snapshots = load_filtered_snapshots(log_path, start, end)?;

    export_summary_file(out_path, &snapshots)
        .map_err(|e| format!("Failed to export summary: {}", e))?;

    tracing::info!(
        snapshots = snapshots.len(),
        path = %out_path.display(),
        "exported metrics summary"
    );

    Ok(ExportSummaryResponse {
        snapshot_count: snapshots.len(),
        file_path: out_path.display().to_string(),
    })
}

/// Render the weight progress chart of a metrics log to a PNG file
pub fn render_weight_chart(
    log_path: &Path,
    out_path: &Path,
    width: u32,
    height: u32,
) -> Result<WeightChartResponse, String> {
    let snapshots = load_filtered_snapshots(log_path, None, None)?;
    let samples = weight_samples_from_snapshots(&snapshots);

    render_weight_chart_file(out_path, &samples, width, height)?;

    Ok(WeightChartResponse {
        sample_count: samples.len(),
        file_path: out_path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let log_path = dir.path().join("metrics_log.csv");
        let mut file = std::fs::File::create(&log_path).unwrap();
        writeln!(file, "metric,value,unit,timestamp").unwrap();
        writeln!(file, "weight,250.0,lbs,01-01-2025 08:00").unwrap();
        writeln!(file, "BMR,2100,kcal/day,01-01-2025 08:00").unwrap();
        writeln!(file, "weight,242.0,lbs,01-10-2025 08:00").unwrap();
        log_path
    }

    #[test]
    fn test_summarize_metrics_log_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = write_log(&dir);

        let response = summarize_metrics_log(&log_path, None, None).unwrap();
        assert_eq!(response.snapshot_count, 2);
        // Only weight has two points; BMR appears once.
        assert_eq!(response.metric_changes.len(), 1);
        assert_eq!(response.rolling.len(), 1);
        assert_eq!(response.rolling[0].days, 9);
        assert!(response.average.is_some());
        assert_eq!(response.milestones.len(), 1);
        assert_eq!(response.milestones[0].milestone, 250);
    }

    #[test]
    fn test_summarize_metrics_log_date_filter() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = write_log(&dir);

        let filtered = summarize_metrics_log(&log_path, None, Some("01-05-2025")).unwrap();
        assert_eq!(filtered.snapshot_count, 1);

        assert!(summarize_metrics_log(&log_path, Some("2025-01-01"), None).is_err());
    }

    #[test]
    fn test_export_writes_summary_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = write_log(&dir);
        let out_path = dir.path().join("summary.csv");

        let response =
            export_metrics_log_summary(&log_path, &out_path, None, None).unwrap();
        assert_eq!(response.snapshot_count, 2);

        let contents = std::fs::read_to_string(&out_path).unwrap();
        assert!(contents.contains("# Total Change Summary"));
        assert!(contents.contains("# Milestone Crossings"));
    }
}
