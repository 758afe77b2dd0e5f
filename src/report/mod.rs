//! Report generation
//!
//! Chart rendering for weight progress.

pub mod chart;

pub use chart::{generate_weight_chart, render_weight_chart_file};
