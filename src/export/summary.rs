//! Tabular summary export
//!
//! Produces a single delimited file with four sections, each preceded by
//! a comment-style header row: per-metric total change, average weight
//! change, rolling 7-day weight change, and milestone crossings. Deltas
//! and percentages carry an explicit sign at two decimals so the file
//! reads cleanly in a spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::analytics::{
    all_metric_changes, average_weight_change, milestone_crossings, rolling_weight_deltas,
    weight_samples_from_snapshots, Snapshot,
};

/// Date format used in exported rows
pub const EXPORT_DATE_FORMAT: &str = "%m-%d-%Y";

/// Export error types
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_date(ts: NaiveDateTime) -> String {
    ts.format(EXPORT_DATE_FORMAT).to_string()
}

/// Two decimals with explicit sign, e.g. `+3.25`, `-1.00`
fn signed(value: f64) -> String {
    format!("{:+.2}", value)
}

/// Two decimals, sign only when negative
fn plain(value: f64) -> String {
    format!("{:.2}", value)
}

/// Write the four-section summary for a snapshot series.
///
/// The average-weight-change section is omitted when fewer than two
/// weight observations exist; the other sections always appear, with
/// their header rows, even when they have no data rows.
pub fn write_summary<W: Write>(writer: &mut W, snapshots: &[Snapshot]) -> Result<(), ExportError> {
    let samples = weight_samples_from_snapshots(snapshots);

    // Section 1: Total Change Summary
    {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut *writer);
        csv_writer.write_record(["# Total Change Summary"])?;
        csv_writer.write_record([
            "metric",
            "start_date",
            "start_value",
            "end_date",
            "end_value",
            "delta",
            "percent_change",
        ])?;
        for change in all_metric_changes(snapshots) {
            csv_writer.write_record([
                change.metric.log_name().to_string(),
                format_date(change.start_date),
                plain(change.start_value),
                format_date(change.end_date),
                plain(change.end_value),
                signed(change.delta),
                signed(change.percent_change),
            ])?;
        }
        csv_writer.flush()?;
    }

    // Section 2: Average Weight Change
    if let Some(average) = average_weight_change(&samples) {
        writer.write_all(b"\n")?;
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut *writer);
        csv_writer.write_record(["# Average Weight Change"])?;
        csv_writer.write_record(["avg_weekly", "avg_daily", "weeks", "days"])?;
        csv_writer.write_record([
            signed(average.avg_weekly),
            signed(average.avg_daily),
            format!("{:.1}", average.weeks),
            average.days.to_string(),
        ])?;
        csv_writer.flush()?;
    }

    // Section 3: Rolling 7-Day Weight Change
    {
        writer.write_all(b"\n")?;
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut *writer);
        csv_writer.write_record(["# Rolling 7-Day Weight Change"])?;
        csv_writer.write_record(["start_date", "end_date", "delta", "percent_change", "days"])?;
        for window in rolling_weight_deltas(&samples) {
            csv_writer.write_record([
                format_date(window.start_date),
                format_date(window.end_date),
                signed(window.delta),
                signed(window.percent_change),
                window.days.to_string(),
            ])?;
        }
        csv_writer.flush()?;
    }

    // Section 4: Milestone Crossings
    {
        writer.write_all(b"\n")?;
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut *writer);
        csv_writer.write_record(["# Milestone Crossings"])?;
        csv_writer.write_record(["milestone", "crossed_on", "weight"])?;
        for crossing in milestone_crossings(&samples) {
            csv_writer.write_record([
                crossing.milestone.to_string(),
                format_date(crossing.crossed_on),
                plain(crossing.weight),
            ])?;
        }
        csv_writer.flush()?;
    }

    Ok(())
}

/// Write the summary to a file path
pub fn export_summary_file<P: AsRef<Path>>(
    path: P,
    snapshots: &[Snapshot],
) -> Result<(), ExportError> {
    let mut file = File::create(path)?;
    write_summary(&mut file, snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{group_metric_rows, RawMetricRow};

    fn row(ts: &str, metric: &str, value: &str) -> RawMetricRow {
        RawMetricRow {
            timestamp: Some(ts.to_string()),
            metric: Some(metric.to_string()),
            value: Some(value.to_string()),
        }
    }

    fn fixture_snapshots() -> Vec<Snapshot> {
        group_metric_rows(vec![
            row("01-01-2025 08:00", "weight", "250.0"),
            row("01-01-2025 08:00", "fat", "32.0"),
            row("01-08-2025 08:00", "weight", "246.0"),
            row("01-08-2025 08:00", "fat", "31.4"),
            row("01-20-2025 08:00", "weight", "239.0"),
        ])
    }

    fn export_to_string(snapshots: &[Snapshot]) -> String {
        let mut buffer = Vec::new();
        write_summary(&mut buffer, snapshots).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_sections_appear_in_order() {
        let output = export_to_string(&fixture_snapshots());

        let pos = |needle: &str| output.find(needle).unwrap();
        assert!(pos("# Total Change Summary") < pos("# Average Weight Change"));
        assert!(pos("# Average Weight Change") < pos("# Rolling 7-Day Weight Change"));
        assert!(pos("# Rolling 7-Day Weight Change") < pos("# Milestone Crossings"));
    }

    #[test]
    fn test_total_change_rows_are_signed_two_decimals() {
        let output = export_to_string(&fixture_snapshots());

        assert!(output.contains("weight,01-01-2025,250.00,01-20-2025,239.00,-11.00,-4.40"));
        assert!(output.contains("fat,01-01-2025,32.00,01-08-2025,31.40,-0.60,-1.88"));
    }

    #[test]
    fn test_rolling_and_milestone_rows() {
        let output = export_to_string(&fixture_snapshots());

        // 01-01 -> 01-08 is a 7 day window; 01-08 -> 01-20 is 12 days.
        assert!(output.contains("01-01-2025,01-08-2025,-4.00,-1.60,7"));
        assert!(output.contains("01-08-2025,01-20-2025,-7.00,-2.85,12"));

        // Max observed weight is 250, so 260 never appears.
        assert!(!output.contains("260,"));
        assert!(output.contains("250,01-01-2025,250.00"));
        assert!(output.contains("240,01-20-2025,239.00"));
    }

    #[test]
    fn test_average_section_omitted_without_weight_data() {
        let snapshots = group_metric_rows(vec![row("01-01-2025 08:00", "fat", "32.0")]);
        let output = export_to_string(&snapshots);

        assert!(!output.contains("# Average Weight Change"));
        assert!(output.contains("# Rolling 7-Day Weight Change"));
        assert!(output.contains("# Milestone Crossings"));
    }

    #[test]
    fn test_round_trip_to_two_decimals() {
        let snapshots = fixture_snapshots();
        let output = export_to_string(&snapshots);

        // Re-parse the weight row of the total change section and compare
        // against the source values at two decimal places.
        let line = output
            .lines()
            .find(|l| l.starts_with("weight,"))
            .unwrap();
        let fields: Vec<&str> = line.split(',').collect();
        let start: f64 = fields[2].parse().unwrap();
        let end: f64 = fields[4].parse().unwrap();
        let delta: f64 = fields[5].parse().unwrap();
        let percent: f64 = fields[6].parse().unwrap();

        assert_eq!(start, 250.0);
        assert_eq!(end, 239.0);
        assert_eq!(delta, -11.0);
        assert_eq!(percent, (-11.0f64 / 250.0 * 100.0 * 100.0).round() / 100.0);
    }
}
