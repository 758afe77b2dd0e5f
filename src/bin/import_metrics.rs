//! Utility to import a long-format metrics log into the weigh-ins table
//! Usage: cargo run --bin import_metrics -- <metrics_log.csv>

use std::path::PathBuf;

use bewell::analytics::read_metrics_log_file;
use bewell::models::{BodyMetric, WeighIn, WeighInCreate};

fn get_database_path() -> PathBuf {
    std::env::var("BEWELL_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("bewell.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let log_path = args.get(1).ok_or("Usage: import_metrics <metrics_log.csv>")?;

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());

    let snapshots = read_metrics_log_file(log_path)?;
    println!("Loaded {} snapshots from {}", snapshots.len(), log_path);

    let database = bewell::db::Database::new(&db_path)?;

    database.with_conn(|conn| {
        bewell::db::migrations::run_migrations(conn)?;

        let mut imported = 0;
        let mut skipped = 0;

        for snapshot in &snapshots {
            // A weigh-in needs a weight; snapshots without one (or with a
            // placeholder zero) are skipped.
            let weight = snapshot.weight().unwrap_or(0.0);
            if weight <= 0.0 {
                skipped += 1;
                continue;
            }

            let metric = |m: BodyMetric| snapshot.get(m.log_name()).unwrap_or(0.0);

            let data = WeighInCreate {
                date_logged: snapshot.timestamp.date().format("%Y-%m-%d").to_string(),
                weight_lbs: weight,
                fat_pct: metric(BodyMetric::BodyFat),
                bmi: metric(BodyMetric::Bmi),
                bmr_kcal: metric(BodyMetric::Bmr),
                visceral_fat: metric(BodyMetric::VisceralFat),
                muscle_lbs: metric(BodyMetric::Muscle),
                bone_mass_lbs: metric(BodyMetric::BoneMass),
                protein_pct: metric(BodyMetric::Protein),
                water_pct: metric(BodyMetric::Water),
                skeletal_muscle_lbs: metric(BodyMetric::SkeletalMuscle),
            };

            let entry = WeighIn::create(conn, &data)?;
            println!(
                "  {} -> weigh-in {} ({:.1} lbs)",
                entry.date_logged, entry.id, entry.weight_lbs
            );
            imported += 1;
        }

        println!("Imported {} weigh-ins, skipped {} snapshots", imported, skipped);
        Ok(())
    })?;

    Ok(())
}
