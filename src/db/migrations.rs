use crate::db::Database;
use crate::error::Result;

const MIGRATIONS: &[&str] = &[
    // Migration 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS weather_master (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        datetime TEXT NOT NULL,
        temp REAL,
        feelslike REAL,
        humidity REAL,
        windspeed REAL,
        cloudcover REAL,
        uvindex REAL,
        precip REAL,
        precipprob REAL,
        conditions TEXT,
        sunrise TEXT,
        sunset TEXT,
        source TEXT,
        UNIQUE(name, datetime)
    );

    CREATE TABLE IF NOT EXISTS weather_data (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        datetime TEXT NOT NULL,
        temp REAL,
        feelslike REAL,
        humidity REAL,
        windspeed REAL,
        cloudcover REAL,
        uvindex REAL,
        precip REAL,
        precipprob REAL,
        conditions TEXT,
        sunrise TEXT,
        sunset TEXT,
        source TEXT,
        UNIQUE(name, datetime)
    );

    CREATE TABLE IF NOT EXISTS weather_predictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        base_date TEXT NOT NULL,
        predicted_date TEXT NOT NULL,
        pred_temp REAL NOT NULL,
        pred_rain_prob REAL NOT NULL,
        pred_rain_flag INTEGER NOT NULL,
        humidity REAL,
        feelslike REAL,
        windspeed REAL,
        uvindex REAL,
        conditions TEXT NOT NULL,
        description TEXT NOT NULL,
        icon TEXT NOT NULL,
        sunrise TEXT,
        sunset TEXT,
        UNIQUE(name, predicted_date)
    );

    CREATE TABLE IF NOT EXISTS festivals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        festival_name TEXT NOT NULL,
        festival_date TEXT NOT NULL,
        recommended_places TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS schema_migrations (
        version INTEGER PRIMARY KEY,
        applied_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    // Migration 2: Add indexes
    r#"
    CREATE INDEX IF NOT EXISTS idx_weather_master_datetime
        ON weather_master(datetime);
    CREATE INDEX IF NOT EXISTS idx_weather_data_datetime
        ON weather_data(datetime);
    CREATE INDEX IF NOT EXISTS idx_weather_predictions_date
        ON weather_predictions(predicted_date);
    CREATE INDEX IF NOT EXISTS idx_festivals_date
        ON festivals(festival_date);
    "#,
];

pub fn run(db: &Database) -> Result<()> {
    db.with_conn_mut(|conn| {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            let version = (i + 1) as i32;
            if version > current_version {
                tracing::info!("Applying migration {}", version);
                let tx = conn.transaction()?;
                tx.execute_batch(migration)?;
                tx.execute(
                    "INSERT INTO schema_migrations (version) VALUES (?1)",
                    [version],
                )?;
                tx.commit()?;
            }
        }

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let db = Database::open_in_memory().unwrap();
        run(&db).unwrap();

        let version: i32 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |r| {
                    r.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(version, MIGRATIONS.len() as i32);
    }
}
