//! Metric trend analysis
//!
//! Computes oldest-vs-latest change per tracked body composition metric,
//! from structured weigh-ins or from a long-format snapshot series.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::snapshot::Snapshot;
use crate::models::{BodyMetric, WeighIn};

/// Direction of a metric's change over the analyzed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Gain,
    Loss,
    NoChange,
}

impl TrendDirection {
    /// Classify a raw change value. Inputs are user-entered decimals, so
    /// exact zero comparison is intended.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            TrendDirection::Gain
        } else if change < 0.0 {
            TrendDirection::Loss
        } else {
            TrendDirection::NoChange
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Gain => "Gain",
            TrendDirection::Loss => "Loss",
            TrendDirection::NoChange => "No Change",
        }
    }
}

/// Long-term trend for one tracked metric
#[derive(Debug, Clone, Serialize)]
pub struct MetricTrend {
    pub label: &'static str,
    pub unit: &'static str,
    pub oldest_value: f64,
    pub latest_value: f64,
    pub change: f64,
    pub direction: TrendDirection,
}

/// Analyze historical weigh-ins to determine the overall trend of each
/// tracked metric.
///
/// Returns an empty map when fewer than two weigh-ins exist; a trend
/// needs at least two points. Input ordering does not matter, the
/// function sorts a working copy by date.
pub fn analyze_metric_trends(weigh_ins: &[WeighIn]) -> BTreeMap<BodyMetric, MetricTrend> {
    if weigh_ins.len() < 2 {
        return BTreeMap::new();
    }

    let mut sorted: Vec<&WeighIn> = weigh_ins.iter().collect();
    sorted.sort_by(|a, b| a.date_logged.cmp(&b.date_logged));

    let oldest = sorted[0];
    let latest = sorted[sorted.len() - 1];

    let mut trend_summary = BTreeMap::new();
    for metric in BodyMetric::ALL {
        let oldest_value = oldest.metric(metric);
        let latest_value = latest.metric(metric);
        let change = latest_value - oldest_value;

        trend_summary.insert(
            metric,
            MetricTrend {
                label: metric.label(),
                unit: metric.unit(),
                oldest_value,
                latest_value,
                change,
                direction: TrendDirection::from_change(change),
            },
        );
    }

    trend_summary
}

/// Total change of one metric across a snapshot series
#[derive(Debug, Clone, Serialize)]
pub struct MetricChange {
    pub metric: BodyMetric,
    pub start_date: NaiveDateTime,
    pub start_value: f64,
    pub end_date: NaiveDateTime,
    pub end_value: f64,
    pub delta: f64,
    pub percent_change: f64,
}

/// Compute first-vs-last change of a metric across snapshots.
///
/// Snapshots that do not carry the metric are ignored. Returns `None`
/// when fewer than two snapshots carry it. A zero start value yields a
/// zero percent change rather than a division error.
pub fn metric_change(snapshots: &[Snapshot], metric: BodyMetric) -> Option<MetricChange> {
    let values: Vec<(NaiveDateTime, f64)> = snapshots
        .iter()
        .filter_map(|s| s.get(metric.log_name()).map(|v| (s.timestamp, v)))
        .collect();

    if values.len() < 2 {
        return None;
    }

    let (start_date, start_value) = values[0];
    let (end_date, end_value) = values[values.len() - 1];
    let delta = end_value - start_value;
    let percent_change = if start_value != 0.0 {
        delta / start_value * 100.0
    } else {
        0.0
    };

    Some(MetricChange {
        metric,
        start_date,
        start_value,
        end_date,
        end_value,
        delta,
        percent_change,
    })
}

/// Metric changes for every tracked metric with enough data, in
/// reporting order
pub fn all_metric_changes(snapshots: &[Snapshot]) -> Vec<MetricChange> {
    BodyMetric::ALL
        .iter()
        .filter_map(|&metric| metric_change(snapshots, metric))
        .collect()
}
