//! Weigh-in model
//!
//! Represents one weigh-in event carrying all ten body composition
//! metrics. Exactly one row is written per logging event; no metric is
//! logged independently of the others.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// The ten tracked body composition metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyMetric {
    #[serde(rename = "weight_lbs")]
    Weight,
    #[serde(rename = "fat_pct")]
    BodyFat,
    #[serde(rename = "muscle_lbs")]
    Muscle,
    #[serde(rename = "water_pct")]
    Water,
    #[serde(rename = "bmi")]
    Bmi,
    #[serde(rename = "bmr_kcal")]
    Bmr,
    #[serde(rename = "visceral_fat")]
    VisceralFat,
    #[serde(rename = "bone_mass_lbs")]
    BoneMass,
    #[serde(rename = "protein_pct")]
    Protein,
    #[serde(rename = "skeletal_muscle_lbs")]
    SkeletalMuscle,
}

impl BodyMetric {
    /// All metrics in reporting order
    pub const ALL: [BodyMetric; 10] = [
        BodyMetric::Weight,
        BodyMetric::BodyFat,
        BodyMetric::Muscle,
        BodyMetric::Water,
        BodyMetric::Bmi,
        BodyMetric::Bmr,
        BodyMetric::VisceralFat,
        BodyMetric::BoneMass,
        BodyMetric::Protein,
        BodyMetric::SkeletalMuscle,
    ];

    /// Column key used in storage and serialized output
    pub fn key(&self) -> &'static str {
        match self {
            BodyMetric::Weight => "weight_lbs",
            BodyMetric::BodyFat => "fat_pct",
            BodyMetric::Muscle => "muscle_lbs",
            BodyMetric::Water => "water_pct",
            BodyMetric::Bmi => "bmi",
            BodyMetric::Bmr => "bmr_kcal",
            BodyMetric::VisceralFat => "visceral_fat",
            BodyMetric::BoneMass => "bone_mass_lbs",
            BodyMetric::Protein => "protein_pct",
            BodyMetric::SkeletalMuscle => "skeletal_muscle_lbs",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            BodyMetric::Weight => "Weight",
            BodyMetric::BodyFat => "Body Fat",
            BodyMetric::Muscle => "Muscle",
            BodyMetric::Water => "Water",
            BodyMetric::Bmi => "BMI",
            BodyMetric::Bmr => "BMR",
            BodyMetric::VisceralFat => "Visceral Fat",
            BodyMetric::BoneMass => "Bone Mass",
            BodyMetric::Protein => "Protein",
            BodyMetric::SkeletalMuscle => "Skeletal Muscle",
        }
    }

    /// Display unit for this metric
    pub fn unit(&self) -> &'static str {
        match self {
            BodyMetric::Weight => "lbs",
            BodyMetric::BodyFat => "%",
            BodyMetric::Muscle => "lbs",
            BodyMetric::Water => "%",
            BodyMetric::Bmi => "",
            BodyMetric::Bmr => "kcal/day",
            BodyMetric::VisceralFat => "",
            BodyMetric::BoneMass => "lbs",
            BodyMetric::Protein => "%",
            BodyMetric::SkeletalMuscle => "lbs",
        }
    }

    /// Metric name as it appears in the long-format metrics log
    pub fn log_name(&self) -> &'static str {
        match self {
            BodyMetric::Weight => "weight",
            BodyMetric::BodyFat => "fat",
            BodyMetric::Muscle => "muscle",
            BodyMetric::Water => "water",
            BodyMetric::Bmi => "BMI",
            BodyMetric::Bmr => "BMR",
            BodyMetric::VisceralFat => "visceral_fat",
            BodyMetric::BoneMass => "bone_mass",
            BodyMetric::Protein => "protein",
            BodyMetric::SkeletalMuscle => "skeletal_muscle",
        }
    }

    /// Parse from a long-format log metric name
    pub fn from_log_name(s: &str) -> Option<Self> {
        BodyMetric::ALL.iter().copied().find(|m| m.log_name() == s)
    }
}

/// A weigh-in with all ten body composition metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighIn {
    pub id: i64,
    pub date_logged: String, // ISO date: "2025-01-09"
    pub weight_lbs: f64,
    pub fat_pct: f64,
    pub bmi: f64,
    pub bmr_kcal: f64, // kcal/day
    pub visceral_fat: f64,
    pub muscle_lbs: f64,
    pub bone_mass_lbs: f64,
    pub protein_pct: f64,
    pub water_pct: f64,
    pub skeletal_muscle_lbs: f64,
    pub created_at: String,
}

/// Data for creating a new weigh-in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeighInCreate {
    pub date_logged: String,
    pub weight_lbs: f64,
    pub fat_pct: f64,
    pub bmi: f64,
    pub bmr_kcal: f64,
    pub visceral_fat: f64,
    pub muscle_lbs: f64,
    pub bone_mass_lbs: f64,
    pub protein_pct: f64,
    pub water_pct: f64,
    pub skeletal_muscle_lbs: f64,
}

impl WeighIn {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date_logged: row.get("date_logged")?,
            weight_lbs: row.get("weight_lbs")?,
            fat_pct: row.get("fat_pct")?,
            bmi: row.get("bmi")?,
            bmr_kcal: row.get("bmr_kcal")?,
            visceral_fat: row.get("visceral_fat")?,
            muscle_lbs: row.get("muscle_lbs")?,
            bone_mass_lbs: row.get("bone_mass_lbs")?,
            protein_pct: row.get("protein_pct")?,
            water_pct: row.get("water_pct")?,
            skeletal_muscle_lbs: row.get("skeletal_muscle_lbs")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Value of a tracked metric on this weigh-in
    pub fn metric(&self, metric: BodyMetric) -> f64 {
        match metric {
            BodyMetric::Weight => self.weight_lbs,
            BodyMetric::BodyFat => self.fat_pct,
            BodyMetric::Muscle => self.muscle_lbs,
            BodyMetric::Water => self.water_pct,
            BodyMetric::Bmi => self.bmi,
            BodyMetric::Bmr => self.bmr_kcal,
            BodyMetric::VisceralFat => self.visceral_fat,
            BodyMetric::BoneMass => self.bone_mass_lbs,
            BodyMetric::Protein => self.protein_pct,
            BodyMetric::SkeletalMuscle => self.skeletal_muscle_lbs,
        }
    }

    /// Create a new weigh-in
    pub fn create(conn: &Connection, data: &WeighInCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO weigh_ins
                (date_logged, weight_lbs, fat_pct, bmi, bmr_kcal, visceral_fat,
                 muscle_lbs, bone_mass_lbs, protein_pct, water_pct, skeletal_muscle_lbs)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                data.date_logged,
                data.weight_lbs,
                data.fat_pct,
                data.bmi,
                data.bmr_kcal,
                data.visceral_fat,
                data.muscle_lbs,
                data.bone_mass_lbs,
                data.protein_pct,
                data.water_pct,
                data.skeletal_muscle_lbs,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a weigh-in by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM weigh_ins WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all weigh-ins, newest first
    pub fn list(conn: &Connection, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let sql = match limit {
            Some(n) => format!(
                "SELECT * FROM weigh_ins ORDER BY date_logged DESC, id DESC LIMIT {}",
                n
            ),
            None => "SELECT * FROM weigh_ins ORDER BY date_logged DESC, id DESC".to_string(),
        };

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// List weigh-ins by date range (inclusive)
    pub fn list_by_date_range(
        conn: &Connection,
        start_date: &str,
        end_date: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM weigh_ins WHERE date_logged >= ?1 AND date_logged <= ?2
             ORDER BY date_logged DESC, id DESC",
        )?;
        let entries = stmt
            .query_map(params![start_date, end_date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get the most recent weigh-in
    pub fn latest(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM weigh_ins ORDER BY date_logged DESC, id DESC LIMIT 1",
        )?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a weigh-in
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM weigh_ins WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn create_data(date: &str, weight: f64) -> WeighInCreate {
        WeighInCreate {
            date_logged: date.to_string(),
            weight_lbs: weight,
            fat_pct: 32.0,
            bmi: 30.1,
            bmr_kcal: 2100.0,
            visceral_fat: 12.0,
            muscle_lbs: 150.0,
            bone_mass_lbs: 8.2,
            protein_pct: 17.0,
            water_pct: 55.0,
            skeletal_muscle_lbs: 80.0,
        }
    }

    #[test]
    fn test_create_and_latest() {
        let conn = test_conn();

        WeighIn::create(&conn, &create_data("2025-01-05", 250.0)).unwrap();
        WeighIn::create(&conn, &create_data("2025-01-19", 246.5)).unwrap();
        WeighIn::create(&conn, &create_data("2025-01-12", 248.0)).unwrap();

        let latest = WeighIn::latest(&conn).unwrap().unwrap();
        assert_eq!(latest.date_logged, "2025-01-19");
        assert_eq!(latest.weight_lbs, 246.5);

        let all = WeighIn::list(&conn, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].date_logged, "2025-01-19");

        let ranged = WeighIn::list_by_date_range(&conn, "2025-01-01", "2025-01-12").unwrap();
        assert_eq!(ranged.len(), 2);
    }

    #[test]
    fn test_metric_accessor_reads_every_field() {
        let conn = test_conn();
        let entry = WeighIn::create(&conn, &create_data("2025-01-05", 250.0)).unwrap();

        assert_eq!(entry.metric(BodyMetric::Weight), 250.0);
        assert_eq!(entry.metric(BodyMetric::BodyFat), 32.0);
        assert_eq!(entry.metric(BodyMetric::Bmr), 2100.0);
        assert_eq!(entry.metric(BodyMetric::SkeletalMuscle), 80.0);
    }

    #[test]
    fn test_metric_table_is_complete() {
        assert_eq!(BodyMetric::ALL.len(), 10);
        for metric in BodyMetric::ALL {
            assert!(!metric.key().is_empty());
            assert!(!metric.label().is_empty());
            assert_eq!(BodyMetric::from_log_name(metric.log_name()), Some(metric));
        }
    }

    #[test]
    fn test_from_log_name_unknown() {
        assert_eq!(BodyMetric::from_log_name("heart_rate"), None);
        assert_eq!(BodyMetric::from_log_name("bmi"), None); // log name is "BMI"
    }
}
