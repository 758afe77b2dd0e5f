//! Food entry model
//!
//! Represents a logged serving of food with its macros. Entries are
//! immutable once logged; macros are materialized at logging time from
//! the source food and serving multiplier.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A logged food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: i64,
    pub food_name: String,
    pub serving_multiplier: f64,
    pub calories: i64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub notes: Option<String>,
    pub date_eaten: String, // ISO date: "2025-01-09"
    pub created_at: String,
}

/// Data for creating a new food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryCreate {
    pub food_name: String,
    pub serving_multiplier: Option<f64>, // defaults to 1.0
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub notes: Option<String>,
    pub date_eaten: String,
}

impl FoodEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            food_name: row.get("food_name")?,
            serving_multiplier: row.get("serving_multiplier")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            notes: row.get("notes")?,
            date_eaten: row.get("date_eaten")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Create a new food entry
    pub fn create(conn: &Connection, data: &FoodEntryCreate) -> DbResult<Self> {
        let serving_multiplier = data.serving_multiplier.unwrap_or(1.0);

        conn.execute(
            r#"
            INSERT INTO food_entries
                (food_name, serving_multiplier, calories, protein, carbs, fat, notes, date_eaten)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.food_name,
                serving_multiplier,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.notes,
                data.date_eaten,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a food entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_entries WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all food entries, newest first
    pub fn list(conn: &Connection, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let sql = match limit {
            Some(n) => format!(
                "SELECT * FROM food_entries ORDER BY date_eaten DESC, id DESC LIMIT {}",
                n
            ),
            None => "SELECT * FROM food_entries ORDER BY date_eaten DESC, id DESC".to_string(),
        };

        let mut stmt = conn.prepare(&sql)?;
        let entries = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// List food entries by date range (inclusive)
    pub fn list_by_date_range(
        conn: &Connection,
        start_date: &str,
        end_date: &str,
    ) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_entries WHERE date_eaten >= ?1 AND date_eaten <= ?2
             ORDER BY date_eaten DESC, id DESC",
        )?;
        let entries = stmt
            .query_map(params![start_date, end_date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Delete a food entry
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM food_entries WHERE id = ?1", [id])?;
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

    #[test]
    fn test_create_and_list_newest_first() {
        let conn = test_conn();

        for (date, calories) in [("2025-01-10", 500), ("2025-01-12", 700)] {
            FoodEntry::create(
                &conn,
                &FoodEntryCreate {
                    food_name: "Default Protein Shake".to_string(),
                    serving_multiplier: None,
                    calories,
                    protein: 30.0,
                    carbs: 5.0,
                    fat: 2.0,
                    notes: None,
                    date_eaten: date.to_string(),
                },
            )
            .unwrap();
        }

        let entries = FoodEntry::list(&conn, None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date_eaten, "2025-01-12");
        assert_eq!(entries[0].serving_multiplier, 1.0);

        let ranged = FoodEntry::list_by_date_range(&conn, "2025-01-01", "2025-01-10").unwrap();
        assert_eq!(ranged.len(), 1);
        assert_eq!(ranged[0].calories, 500);
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();

        let entry = FoodEntry::create(
            &conn,
            &FoodEntryCreate {
                food_name: "Oatmeal".to_string(),
                serving_multiplier: Some(1.5),
                calories: 225,
                protein: 7.5,
                carbs: 40.5,
                fat: 4.5,
                notes: None,
                date_eaten: "2025-01-10".to_string(),
            },
        )
        .unwrap();

        assert!(FoodEntry::delete(&conn, entry.id).unwrap());
        assert!(FoodEntry::get_by_id(&conn, entry.id).unwrap().is_none());
        assert!(!FoodEntry::delete(&conn, entry.id).unwrap());
    }
}
