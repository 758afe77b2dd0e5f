//! Record logging tools
//!
//! Data entry for food, activity, and weigh-in records. Validation
//! mirrors the logging forms: a food entry needs a name, an activity
//! needs a type, duration, and calories, and a weigh-in needs a weight.

use serde::Serialize;

use crate::db::Database;
use crate::models::{
    ActivityEntry, ActivityEntryCreate, FoodEntry, FoodEntryCreate, WeighIn, WeighInCreate,
};

/// Response for log_food
#[derive(Debug, Serialize)]
pub struct LogFoodResponse {
    pub id: i64,
    pub food_name: String,
    pub calories: i64,
    pub date_eaten: String,
}

/// Response for log_activity
#[derive(Debug, Serialize)]
pub struct LogActivityResponse {
    pub id: i64,
    pub activity_type: String,
    pub calories_burned: i64,
    pub date_logged: String,
}

/// Response for log_weigh_in
#[derive(Debug, Serialize)]
pub struct LogWeighInResponse {
    pub id: i64,
    pub date_logged: String,
    pub weight_lbs: f64,
    pub bmr_kcal: f64,
}

/// Response for list_food_entries
#[derive(Debug, Serialize)]
pub struct ListFoodEntriesResponse {
    pub entries: Vec<FoodEntry>,
    pub total: usize,
}

/// Response for list_activity_entries
#[derive(Debug, Serialize)]
pub struct ListActivityEntriesResponse {
    pub entries: Vec<ActivityEntry>,
    pub total: usize,
}

/// Response for list_weigh_ins
#[derive(Debug, Serialize)]
pub struct ListWeighInsResponse {
    pub entries: Vec<WeighIn>,
    pub total: usize,
}

/// Log a food entry
pub fn log_food(db: &Database, data: FoodEntryCreate) -> Result<LogFoodResponse, String> {
    if data.food_name.trim().is_empty() {
        return Err("Food name is required".to_string());
    }
    if let Some(multiplier) = data.serving_multiplier {
        if multiplier <= 0.0 {
            return Err("Serving multiplier must be greater than 0".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entry = FoodEntry::create(&conn, &data)
        .map_err(|e| format!("Failed to log food entry: {}", e))?;

    Ok(LogFoodResponse {
        id: entry.id,
        food_name: entry.food_name,
        calories: entry.calories,
        date_eaten: entry.date_eaten,
    })
}

/// Log an activity entry
pub fn log_activity(
    db: &Database,
    data: ActivityEntryCreate,
) -> Result<LogActivityResponse, String> {
    if data.activity_type.trim().is_empty() {
        return Err("Activity type is required".to_string());
    }
    if data.duration_minutes <= 0.0 {
        return Err("Duration must be greater than 0".to_string());
    }
    if data.calories_burned <= 0 {
        return Err("Calories burned must be greater than 0".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entry = ActivityEntry::create(&conn, &data)
        .map_err(|e| format!("Failed to log activity entry: {}", e))?;

    Ok(LogActivityResponse {
        id: entry.id,
        activity_type: entry.activity_type,
        calories_burned: entry.calories_burned,
        date_logged: entry.date_logged,
    })
}

/// Log a weigh-in with all ten body composition metrics
pub fn log_weigh_in(db: &Database, data: WeighInCreate) -> Result<LogWeighInResponse, String> {
    if data.weight_lbs <= 0.0 {
        return Err("Weight must be entered to log metrics".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entry = WeighIn::create(&conn, &data)
        .map_err(|e| format!("Failed to log weigh-in: {}", e))?;

    Ok(LogWeighInResponse {
        id: entry.id,
        date_logged: entry.date_logged,
        weight_lbs: entry.weight_lbs,
        bmr_kcal: entry.bmr_kcal,
    })
}

/// List food entries, newest first
pub fn list_food_entries(
    db: &Database,
    limit: Option<i64>,
) -> Result<ListFoodEntriesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = FoodEntry::list(&conn, limit)
        .map_err(|e| format!("Failed to list food entries: {}", e))?;

    let total = entries.len();
    Ok(ListFoodEntriesResponse { entries, total })
}

/// List activity entries, newest first
pub fn list_activity_entries(
    db: &Database,
    limit: Option<i64>,
) -> Result<ListActivityEntriesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = ActivityEntry::list(&conn, limit)
        .map_err(|e| format!("Failed to list activity entries: {}", e))?;

    let total = entries.len();
    Ok(ListActivityEntriesResponse { entries, total })
}

/// List weigh-ins, newest first
pub fn list_weigh_ins(db: &Database, limit: Option<i64>) -> Result<ListWeighInsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = WeighIn::list(&conn, limit)
        .map_err(|e| format!("Failed to list weigh-ins: {}", e))?;

    let total = entries.len();
    Ok(ListWeighInsResponse { entries, total })
}

/// Get the most recent weigh-in, if any
pub fn latest_weigh_in(db: &Database) -> Result<Option<WeighIn>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    WeighIn::latest(&conn).map_err(|e| format!("Failed to get latest weigh-in: {}", e))
}
