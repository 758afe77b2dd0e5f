//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check that the schema version matches what this build expects
pub fn check_schema_version(conn: &Connection) -> DbResult<bool> {
    Ok(get_schema_version(conn)? == SCHEMA_VERSION)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- FOOD ENTRIES
        -- One row per logged serving of food
        -- ============================================
        CREATE TABLE food_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_name TEXT NOT NULL,
            serving_multiplier REAL NOT NULL DEFAULT 1.0,

            -- Macros for the logged serving
            calories INTEGER NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,     -- grams
            carbs REAL NOT NULL DEFAULT 0,       -- grams
            fat REAL NOT NULL DEFAULT 0,         -- grams

            notes TEXT,
            date_eaten TEXT NOT NULL,            -- ISO date: "2025-01-09"
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_food_entries_date ON food_entries(date_eaten);

        -- ============================================
        -- ACTIVITY ENTRIES
        -- Physical activity and calories burned
        -- ============================================
        CREATE TABLE activity_entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            activity_type TEXT NOT NULL,
            duration_minutes REAL NOT NULL,
            calories_burned INTEGER NOT NULL,
            distance_miles REAL NOT NULL DEFAULT 0,

            notes TEXT,
            date_logged TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_activity_entries_date ON activity_entries(date_logged);

        -- ============================================
        -- WEIGH-INS
        -- One row per logging event carrying all ten
        -- body composition metrics
        -- ============================================
        CREATE TABLE weigh_ins (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date_logged TEXT NOT NULL,

            weight_lbs REAL NOT NULL,
            fat_pct REAL NOT NULL DEFAULT 0,
            bmi REAL NOT NULL DEFAULT 0,
            bmr_kcal REAL NOT NULL DEFAULT 0,    -- kcal/day
            visceral_fat REAL NOT NULL DEFAULT 0,
            muscle_lbs REAL NOT NULL DEFAULT 0,
            bone_mass_lbs REAL NOT NULL DEFAULT 0,
            protein_pct REAL NOT NULL DEFAULT 0,
            water_pct REAL NOT NULL DEFAULT 0,
            skeletal_muscle_lbs REAL NOT NULL DEFAULT 0,

            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_weigh_ins_date ON weigh_ins(date_logged);
        "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(check_schema_version(&conn).unwrap());
    }

    #[test]
    fn test_v1_tables_exist() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["food_entries", "activity_entries", "weigh_ins"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }
}
