//! Rolling weight change and milestone detection
//!
//! Works over an ascending weight series taken from weigh-ins or from
//! snapshots that carry a weight value.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::snapshot::Snapshot;
use crate::models::WeighIn;

/// Upper bound of the milestone ladder, in pounds
pub const MILESTONE_START_LBS: i64 = 260;

/// Distance between consecutive milestones, in pounds
pub const MILESTONE_STEP_LBS: i64 = 10;

/// Minimum span for a rolling window, in days
pub const ROLLING_WINDOW_MIN_DAYS: i64 = 7;

/// Unit weights are tracked in
pub const WEIGHT_UNIT: &str = "lbs";

/// One weight observation in time
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeightSample {
    pub timestamp: NaiveDateTime,
    pub weight: f64,
}

/// Weight change across one qualifying pair of consecutive observations
#[derive(Debug, Clone, Serialize)]
pub struct RollingWindowDelta {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub days: i64,
    pub delta: f64,
    pub percent_change: f64,
}

/// Average weight change over the whole observed range
#[derive(Debug, Clone, Serialize)]
pub struct AverageWeightChange {
    pub avg_weekly: f64,
    pub avg_daily: f64,
    pub weeks: f64,
    pub days: i64,
}

/// First crossing of a weight milestone
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneCrossing {
    pub milestone: i64,
    pub crossed_on: NaiveDateTime,
    pub weight: f64,
}

/// Extract the weight series from snapshots. The input is already
/// ascending by construction.
pub fn weight_samples_from_snapshots(snapshots: &[Snapshot]) -> Vec<WeightSample> {
    snapshots
        .iter()
        .filter_map(|s| {
            s.weight().map(|weight| WeightSample {
                timestamp: s.timestamp,
                weight,
            })
        })
        .collect()
}

/// Extract an ascending weight series from weigh-ins.
///
/// Weigh-in dates have day precision; samples are placed at midnight.
/// Rows whose stored date fails to parse are skipped.
pub fn weight_samples_from_weigh_ins(weigh_ins: &[WeighIn]) -> Vec<WeightSample> {
    let mut samples: Vec<WeightSample> = weigh_ins
        .iter()
        .filter_map(|entry| {
            let date = NaiveDate::parse_from_str(&entry.date_logged, "%Y-%m-%d").ok()?;
            Some(WeightSample {
                timestamp: date.and_hms_opt(0, 0, 0)?,
                weight: entry.weight_lbs,
            })
        })
        .collect();
    samples.sort_by_key(|s| s.timestamp);
    samples
}

/// Weight change between consecutive observations at least a week apart.
///
/// Pairs closer than the minimum span are skipped entirely; they do not
/// merge into a wider window, so stretches of frequent sub-weekly logging
/// can under-report change. Fewer than two samples yields no windows.
pub fn rolling_weight_deltas(samples: &[WeightSample]) -> Vec<RollingWindowDelta> {
    let mut deltas = Vec::new();

    for pair in samples.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let days = (end.timestamp - start.timestamp).num_days();
        if days < ROLLING_WINDOW_MIN_DAYS {
            continue;
        }

        let delta = end.weight - start.weight;
        let percent_change = if start.weight != 0.0 {
            delta / start.weight * 100.0
        } else {
            0.0
        };

        deltas.push(RollingWindowDelta {
            start_date: start.timestamp,
            end_date: end.timestamp,
            days,
            delta,
            percent_change,
        });
    }

    deltas
}

/// Average weekly and daily weight change over the full range, from the
/// first and last observations only.
///
/// Spans under a week count as one week so short ranges do not get
/// amplified into outsized weekly rates; a zero-day span reports the raw
/// delta as the daily rate.
pub fn average_weight_change(samples: &[WeightSample]) -> Option<AverageWeightChange> {
    if samples.len() < 2 {
        return None;
    }

    let first = samples[0];
    let last = samples[samples.len() - 1];
    let days = (last.timestamp - first.timestamp).num_days();
    let weeks = if days >= ROLLING_WINDOW_MIN_DAYS {
        days as f64 / 7.0
    } else {
        1.0
    };
    let delta = last.weight - first.weight;
    let avg_weekly = delta / weeks;
    let avg_daily = if days > 0 { delta / days as f64 } else { delta };

    Some(AverageWeightChange {
        avg_weekly,
        avg_daily,
        weeks,
        days,
    })
}

/// First crossing of each weight milestone.
///
/// Milestones descend from the fixed upper bound in fixed steps down to
/// the lowest observed weight. A milestone's crossing is the earliest
/// observation at or below it; milestones above the highest observed
/// weight are never reported.
pub fn milestone_crossings(samples: &[WeightSample]) -> Vec<MilestoneCrossing> {
    if samples.is_empty() {
        return Vec::new();
    }

    let min_weight = samples.iter().map(|s| s.weight).fold(f64::INFINITY, f64::min);
    let max_weight = samples
        .iter()
        .map(|s| s.weight)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut crossings = Vec::new();
    let mut milestone = MILESTONE_START_LBS;
    while milestone as f64 >= min_weight.floor() {
        if milestone as f64 <= max_weight {
            if let Some(sample) = samples.iter().find(|s| s.weight <= milestone as f64) {
                crossings.push(MilestoneCrossing {
                    milestone,
                    crossed_on: sample.timestamp,
                    weight: sample.weight,
                });
            }
        }
        milestone -= MILESTONE_STEP_LBS;
    }

    crossings
}
