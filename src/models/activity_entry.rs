//! Activity entry model
//!
//! Represents a logged physical activity with duration, calories burned,
//! and optional distance.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A logged activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub activity_type: String,
    pub duration_minutes: f64,
    pub calories_burned: i64,
    pub distance_miles: f64,
    pub notes: Option<String>,
    pub date_logged: String, // ISO date: "2025-01-09"
    pub created_at: String,
}

/// Data for creating a new activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntryCreate {
    pub activity_type: String,
    pub duration_minutes: f64,
    pub calories_burned: i64,
    pub distance_miles: Option<f64>, // defaults to 0
    pub notes: Option<String>,
    pub date_logged: String,
}

impl ActivityEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            activity_type: row.get("activity_type")?,
            duration_minutes: row.get("duration_minutes")?,
            calories_burned: row.get("calories_burned")?,
            distance_miles: row.get("distance_miles")?,
            notes: row.get("notes")?,
            date_logged: row.get("date_logged")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Create a new activity entry
    pub fn create(conn: &Connection, data: &ActivityEntryCreate) -> DbResult<Self> {
        let distance = data.distance_miles.unwrap_or(0.0);

        conn.execute(
            r#"
            INSERT INTO activity_entries
                (activity_type, duration_minutes, calories_burned, distance_miles, notes, date_logged)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                data.activity_type,
                data.duration_minutes,
                data.calories_burned,
                distance,
                data.notes,
                data.date_logged,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an activity entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM activity_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all activity entries, newest first
    pub fn list(conn: &Connection, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let sql = match limit {
            Some(n) => format!(
                "SELECT * FROM activity_entries ORDER BY date_logged DESC, id DESC LIMIT {}",
                n
            ),
            None => "SELECT * FROM activity_entries ORDER BY date_logged DESC, id DESC".to_string(),
        };

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// List activity entries by date range (inclusive)
    pub fn list_by_date_range(
        conn: &Connection,
        start_date: &str,
        end_date: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM activity_entries WHERE date_logged >= ?1 AND date_logged <= ?2
             ORDER BY date_logged DESC, id DESC",
        )?;
        let entries = stmt
            .query_map(params![start_date, end_date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete an activity entry
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM activity_entries WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
