//! BeWell Tracker Library
//!
//! Core functionality for body composition and energy balance tracking.

pub mod analytics;
pub mod build_info;
pub mod db;
pub mod export;
pub mod models;
pub mod report;
pub mod tools;
