//! Analytics engine
//!
//! Pure transformations from record collections to derived summaries:
//! daily energy balance, long-term metric trends, rolling weight change,
//! and milestone detection. Nothing here performs I/O or mutates its
//! inputs.

pub mod daily;
pub mod rolling;
pub mod snapshot;
pub mod trends;

pub use daily::{calculate_daily_summary, DailySummary};
pub use rolling::{
    average_weight_change, milestone_crossings, rolling_weight_deltas,
    weight_samples_from_snapshots, weight_samples_from_weigh_ins, AverageWeightChange,
    MilestoneCrossing, RollingWindowDelta, WeightSample, MILESTONE_START_LBS, MILESTONE_STEP_LBS,
    ROLLING_WINDOW_MIN_DAYS, WEIGHT_UNIT,
};
pub use snapshot::{
    filter_by_date_range, group_metric_rows, read_metrics_log, read_metrics_log_file,
    RawMetricRow, Snapshot, METRICS_LOG_TIMESTAMP_FORMAT,
};
pub use trends::{
    all_metric_changes, analyze_metric_trends, metric_change, MetricChange, MetricTrend,
    TrendDirection,
};
