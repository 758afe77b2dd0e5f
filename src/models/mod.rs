//! Data models
//!
//! Rust structs representing database entities.

mod activity_entry;
mod food_entry;
mod weigh_in;

pub use activity_entry::{ActivityEntry, ActivityEntryCreate};
pub use food_entry::{FoodEntry, FoodEntryCreate};
pub use weigh_in::{BodyMetric, WeighIn, WeighInCreate};
