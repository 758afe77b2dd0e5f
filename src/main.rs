//! BeWell Tracker
//!
//! Command line interface for body composition and energy balance
//! tracking.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use bewell::{build_info, db, tools};

/// Default chart dimensions in pixels
const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 600;

/// How many entries the list commands show
const RECENT_LIMIT: i64 = 10;

/// Get the database path from environment or use default
fn get_database_path() -> PathBuf {
    std::env::var("BEWELL_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("bewell.db");
            path
        })
}

fn print_usage() {
    eprintln!("Usage: bewell <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  log-food <name> <calories> [protein] [carbs] [fat] [date]");
    eprintln!("  log-activity <type> <minutes> <calories> [distance] [date]");
    eprintln!("  log-weigh-in <date> <weight> [fat bmi bmr visceral muscle bone protein water skeletal]");
    eprintln!("  food | activity | weigh-ins             List recent entries");
    eprintln!("  summary                                 Daily energy balance from stored records");
    eprintln!("  trends                                  Long-term metric trends from weigh-ins");
    eprintln!("  progress                                Rolling weight change and milestones");
    eprintln!("  log-summary <log.csv> [start] [end]     Summarize a flat metrics log");
    eprintln!("  export <log.csv> <out.csv> [start] [end] Export the four-section summary");
    eprintln!("  chart <log.csv> <out.png>               Render the weight progress chart");
    eprintln!();
    eprintln!("Stored record dates use YYYY-MM-DD; metrics log filter dates use MM-DD-YYYY.");
}

fn parse_f64(value: Option<&str>, field: &str) -> Result<f64, String> {
    match value {
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid number for {}: {}", field, s)),
        None => Ok(0.0),
    }
}

fn parse_i64(value: &str, field: &str) -> Result<i64, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid number for {}: {}", field, value))
}

/// Today's date in stored-record form
fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_database() -> Result<db::Database, Box<dyn std::error::Error>> {
    let db_path = get_database_path();
    eprintln!("Database path: {}", db_path.display());

    // Ensure data directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    Ok(database)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bewell=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);
    let arg = |i: usize| args.get(i).map(String::as_str);

    match command {
        Some("log-food") => {
            let name = arg(2).ok_or("log-food requires a food name")?;
            let calories = parse_i64(arg(3).ok_or("log-food requires calories")?, "calories")?;
            let data = bewell::models::FoodEntryCreate {
                food_name: name.to_string(),
                serving_multiplier: None,
                calories,
                protein: parse_f64(arg(4), "protein")?,
                carbs: parse_f64(arg(5), "carbs")?,
                fat: parse_f64(arg(6), "fat")?,
                notes: None,
                date_eaten: arg(7).map(str::to_string).unwrap_or_else(today),
            };

            let database = open_database()?;
            let response = tools::logging::log_food(&database, data)?;
            print_json(&response)?;
        }
        Some("log-activity") => {
            let activity_type = arg(2).ok_or("log-activity requires an activity type")?;
            let duration = parse_f64(arg(3), "minutes")?;
            let calories =
                parse_i64(arg(4).ok_or("log-activity requires calories burned")?, "calories")?;
            let data = bewell::models::ActivityEntryCreate {
                activity_type: activity_type.to_string(),
                duration_minutes: duration,
                calories_burned: calories,
                distance_miles: arg(5).map(|s| parse_f64(Some(s), "distance")).transpose()?,
                notes: None,
                date_logged: arg(6).map(str::to_string).unwrap_or_else(today),
            };

            let database = open_database()?;
            let response = tools::logging::log_activity(&database, data)?;
            print_json(&response)?;
        }
        Some("log-weigh-in") => {
            let date = arg(2).ok_or("log-weigh-in requires a date")?;
            let data = bewell::models::WeighInCreate {
                date_logged: date.to_string(),
                weight_lbs: parse_f64(arg(3), "weight")?,
                fat_pct: parse_f64(arg(4), "fat")?,
                bmi: parse_f64(arg(5), "bmi")?,
                bmr_kcal: parse_f64(arg(6), "bmr")?,
                visceral_fat: parse_f64(arg(7), "visceral")?,
                muscle_lbs: parse_f64(arg(8), "muscle")?,
                bone_mass_lbs: parse_f64(arg(9), "bone")?,
                protein_pct: parse_f64(arg(10), "protein")?,
                water_pct: parse_f64(arg(11), "water")?,
                skeletal_muscle_lbs: parse_f64(arg(12), "skeletal")?,
            };

            let database = open_database()?;
            let response = tools::logging::log_weigh_in(&database, data)?;
            print_json(&response)?;
        }
        Some("food") => {
            let database = open_database()?;
            let response = tools::logging::list_food_entries(&database, Some(RECENT_LIMIT))?;
            print_json(&response)?;
        }
        Some("activity") => {
            let database = open_database()?;
            let response = tools::logging::list_activity_entries(&database, Some(RECENT_LIMIT))?;
            print_json(&response)?;
        }
        Some("weigh-ins") => {
            let database = open_database()?;
            let response = tools::logging::list_weigh_ins(&database, Some(RECENT_LIMIT))?;
            print_json(&response)?;
        }
        Some("summary") => {
            let database = open_database()?;
            let response = tools::summary::get_daily_summaries(&database)?;
            print_json(&response)?;
        }
        Some("trends") => {
            let database = open_database()?;
            let response = tools::summary::get_metric_trends(&database)?;
            print_json(&response)?;
        }
        Some("progress") => {
            let database = open_database()?;
            let response = tools::summary::get_weight_progress(&database)?;
            print_json(&response)?;
        }
        Some("log-summary") => {
            let log_path = arg(2).ok_or("log-summary requires a metrics log path")?;
            let response = tools::summary::summarize_metrics_log(
                Path::new(log_path),
                arg(3),
                arg(4),
            )?;
            print_json(&response)?;
        }
        Some("export") => {
            let log_path = arg(2).ok_or("export requires a metrics log path")?;
            let out_path = arg(3).ok_or("export requires an output path")?;
            let response = tools::summary::export_metrics_log_summary(
                Path::new(log_path),
                Path::new(out_path),
                arg(4),
                arg(5),
            )?;
            eprintln!(
                "Exported summary of {} snapshots to {}",
                response.snapshot_count, response.file_path
            );
        }
        Some("chart") => {
            let log_path = arg(2).ok_or("chart requires a metrics log path")?;
            let out_path = arg(3).ok_or("chart requires an output path")?;
            let response = tools::summary::render_weight_chart(
                Path::new(log_path),
                Path::new(out_path),
                CHART_WIDTH,
                CHART_HEIGHT,
            )?;
            eprintln!(
                "Rendered chart of {} weight samples to {}",
                response.sample_count, response.file_path
            );
        }
        _ => {
            print_usage();
        }
    }

    Ok(())
}
