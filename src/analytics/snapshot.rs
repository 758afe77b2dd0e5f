//! Snapshot loader
//!
//! Groups long-format (timestamp, metric, value) log rows into
//! per-timestamp snapshots. The log arrives as a flat CSV written by the
//! logging subsystem, one metric per row; multiple snapshots can occur on
//! the same calendar day, so timestamps carry minute precision.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Timestamp format used by the metrics log
pub const METRICS_LOG_TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M";

/// One raw row of the long-format metrics log, before validation
#[derive(Debug, Clone, Default)]
pub struct RawMetricRow {
    pub timestamp: Option<String>,
    pub metric: Option<String>,
    pub value: Option<String>,
}

/// A grouped set of metric values sharing a single timestamp
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub timestamp: NaiveDateTime,
    pub metrics: BTreeMap<String, f64>,
}

impl Snapshot {
    /// Value of a metric in this snapshot, if present
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    /// Weight value, if this snapshot carries one
    pub fn weight(&self) -> Option<f64> {
        self.get("weight")
    }
}

/// Group raw log rows into snapshots sorted ascending by timestamp.
///
/// Rows missing a timestamp, metric name, or value, or whose timestamp or
/// value fails to parse, are skipped; a bad row never fails the batch.
/// When the same metric appears twice for one timestamp, the
/// later-processed row wins.
pub fn group_metric_rows<I>(rows: I) -> Vec<Snapshot>
where
    I: IntoIterator<Item = RawMetricRow>,
{
    let mut grouped: BTreeMap<NaiveDateTime, BTreeMap<String, f64>> = BTreeMap::new();

    for row in rows {
        let (Some(ts_str), Some(metric), Some(value)) = (row.timestamp, row.metric, row.value)
        else {
            continue;
        };

        let ts_str = ts_str.trim();
        let metric = metric.trim();
        let value = value.trim();
        if ts_str.is_empty() || metric.is_empty() || value.is_empty() {
            continue;
        }

        let Ok(ts) = NaiveDateTime::parse_from_str(ts_str, METRICS_LOG_TIMESTAMP_FORMAT) else {
            continue;
        };
        let Ok(val) = value.parse::<f64>() else {
            continue;
        };

        grouped.entry(ts).or_default().insert(metric.to_string(), val);
    }

    grouped
        .into_iter()
        .map(|(timestamp, metrics)| Snapshot { timestamp, metrics })
        .collect()
}

/// Read a long-format metrics log from a CSV source.
///
/// Columns are matched by header name (`timestamp`, `metric`, `value`);
/// extra columns such as `unit` are ignored. Records that fail to read,
/// including the blank separator rows the logger writes between batches,
/// are skipped like any other malformed row.
pub fn read_metrics_log<R: Read>(reader: R) -> Result<Vec<Snapshot>, csv::Error> {
    let csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    collect_snapshots(csv_reader)
}

/// Read a long-format metrics log from a file path
pub fn read_metrics_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<Snapshot>, csv::Error> {
    let csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    collect_snapshots(csv_reader)
}

fn collect_snapshots<R: Read>(mut csv_reader: csv::Reader<R>) -> Result<Vec<Snapshot>, csv::Error> {
    let headers = csv_reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let ts_idx = position("timestamp");
    let metric_idx = position("metric");
    let value_idx = position("value");

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let Ok(record) = record else {
            continue;
        };
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);
        rows.push(RawMetricRow {
            timestamp: field(ts_idx),
            metric: field(metric_idx),
            value: field(value_idx),
        });
    }

    Ok(group_metric_rows(rows))
}

/// Restrict snapshots to an optional inclusive date range.
///
/// The end date covers the whole calendar day.
pub fn filter_by_date_range(
    snapshots: &[Snapshot],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Snapshot> {
    snapshots
        .iter()
        .filter(|s| {
            let after_start = start.map_or(true, |d| s.timestamp.date() >= d);
            let before_end = end.map_or(true, |d| s.timestamp.date() <= d);
            after_start && before_end
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ts: &str, metric: &str, value: &str) -> RawMetricRow {
        RawMetricRow {
            timestamp: Some(ts.to_string()),
            metric: Some(metric.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_groups_rows_sharing_a_timestamp() {
        let snapshots = group_metric_rows(vec![
            row("01-05-2025 08:30", "weight", "250.5"),
            row("01-05-2025 08:30", "fat", "32.1"),
            row("01-12-2025 08:00", "weight", "248.0"),
        ]);

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].weight(), Some(250.5));
        assert_eq!(snapshots[0].get("fat"), Some(32.1));
        assert_eq!(snapshots[1].weight(), Some(248.0));
    }

    #[test]
    fn test_output_sorted_ascending_regardless_of_input_order() {
        let snapshots = group_metric_rows(vec![
            row("02-01-2025 09:00", "weight", "240"),
            row("01-01-2025 09:00", "weight", "250"),
            row("01-15-2025 09:00", "weight", "245"),
        ]);

        let weights: Vec<f64> = snapshots.iter().filter_map(Snapshot::weight).collect();
        assert_eq!(weights, vec![250.0, 245.0, 240.0]);
    }

    #[test]
    fn test_last_write_wins_within_a_timestamp() {
        let snapshots = group_metric_rows(vec![
            row("01-05-2025 08:30", "weight", "250.5"),
            row("01-05-2025 08:30", "weight", "251.0"),
        ]);

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].weight(), Some(251.0));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let snapshots = group_metric_rows(vec![
            RawMetricRow::default(),
            row("", "weight", "250"),
            row("01-05-2025 08:30", "", "250"),
            row("01-05-2025 08:30", "weight", ""),
            row("not a date", "weight", "250"),
            row("01-05-2025 08:30", "weight", "not a number"),
            row("01-05-2025 08:30", "weight", "250.5"),
        ]);

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].weight(), Some(250.5));
    }

    #[test]
    fn test_read_metrics_log_csv() {
        let data = "\
metric,value,unit,timestamp
weight,250.50,lbs,01-05-2025 08:30
fat,32.10,%,01-05-2025 08:30
,,,
weight,248.00,lbs,01-12-2025 08:00
";
        let snapshots = read_metrics_log(data.as_bytes()).unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].get("fat"), Some(32.1));
        assert_eq!(snapshots[1].weight(), Some(248.0));
    }

    #[test]
    fn test_filter_by_date_range_is_inclusive() {
        let snapshots = group_metric_rows(vec![
            row("01-01-2025 09:00", "weight", "250"),
            row("01-15-2025 23:00", "weight", "245"),
            row("02-01-2025 09:00", "weight", "240"),
        ]);

        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let filtered = filter_by_date_range(&snapshots, Some(start), Some(end));

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[1].weight(), Some(245.0));

        let unfiltered = filter_by_date_range(&snapshots, None, None);
        assert_eq!(unfiltered.len(), 3);
    }
}
