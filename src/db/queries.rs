use crate::db::{Database, WeatherStore};
use crate::error::Result;
use crate::models::{
    FestivalEntry, PlaceCategory, PlaceWeather, WeatherCondition, WeatherObservation,
    WeatherPrediction,
};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn sql_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(row: &Row, column: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        let idx = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

fn keep_readable<T>(result: rusqlite::Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(error = %e, "Skipping unreadable {} row", what);
            None
        }
    }
}

// Observation Queries

impl Database {
    /// Insert observations, superseding any existing row for the same (place, date).
    pub fn replace_observations(
        &self,
        category: PlaceCategory,
        rows: &[WeatherObservation],
    ) -> Result<usize> {
        let sql = format!(
            r#"
            INSERT OR REPLACE INTO {}
                (name, datetime, temp, feelslike, humidity, windspeed, cloudcover, uvindex,
                 precip, precipprob, conditions, sunrise, sunset, source)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            category.table_name()
        );

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&sql)?;
                for obs in rows {
                    stmt.execute(params![
                        obs.name,
                        sql_date(obs.date),
                        obs.temp,
                        obs.feelslike,
                        obs.humidity,
                        obs.windspeed,
                        obs.cloudcover,
                        obs.uvindex,
                        obs.precip,
                        obs.precipprob,
                        obs.conditions,
                        obs.sunrise,
                        obs.sunset,
                        obs.source,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(rows.len())
        })
    }
}

fn row_to_observation(row: &Row) -> rusqlite::Result<WeatherObservation> {
    Ok(WeatherObservation {
        name: row.get("name")?,
        date: parse_date(row, "datetime")?,
        temp: row.get("temp")?,
        feelslike: row.get("feelslike")?,
        humidity: row.get("humidity")?,
        windspeed: row.get("windspeed")?,
        cloudcover: row.get("cloudcover")?,
        uvindex: row.get("uvindex")?,
        precip: row.get("precip")?,
        precipprob: row.get("precipprob")?,
        conditions: row.get("conditions")?,
        sunrise: row.get("sunrise")?,
        sunset: row.get("sunset")?,
        source: row.get("source")?,
    })
}

// Prediction Queries

impl Database {
    pub fn predictions_for_place(&self, name: &str) -> Result<Vec<WeatherPrediction>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM weather_predictions WHERE name = ?1 ORDER BY predicted_date",
            )?;
            let predictions = stmt
                .query_map([name], row_to_prediction)?
                .filter_map(|r| keep_readable(r, "prediction"))
                .collect();
            Ok(predictions)
        })
    }
}

fn row_to_prediction(row: &Row) -> rusqlite::Result<WeatherPrediction> {
    let condition_str: String = row.get("conditions")?;
    let flag: i64 = row.get("pred_rain_flag")?;

    let condition = WeatherCondition::from_str(&condition_str).unwrap_or_else(|| {
        warn!(
            conditions = %condition_str,
            "Unknown prediction condition in database, defaulting to Clear"
        );
        WeatherCondition::Clear
    });

    Ok(WeatherPrediction {
        name: row.get("name")?,
        base_date: parse_date(row, "base_date")?,
        predicted_date: parse_date(row, "predicted_date")?,
        pred_temp: row.get("pred_temp")?,
        pred_rain_prob: row.get("pred_rain_prob")?,
        pred_rain_flag: flag != 0,
        humidity: row.get::<_, Option<f64>>("humidity")?.unwrap_or_default(),
        feelslike: row.get("feelslike")?,
        windspeed: row.get::<_, Option<f64>>("windspeed")?.unwrap_or_default(),
        uvindex: row.get::<_, Option<f64>>("uvindex")?.unwrap_or_default(),
        condition,
        sunrise: row.get("sunrise")?,
        sunset: row.get("sunset")?,
    })
}

fn row_to_place_weather(row: &Row) -> rusqlite::Result<PlaceWeather> {
    Ok(PlaceWeather {
        name: row.get("name")?,
        temp: row.get("temp")?,
        conditions: row.get("conditions")?,
        rain_prob: row.get("rain_prob")?,
    })
}

// Festival Queries

impl Database {
    pub fn insert_festival(&self, festival: &FestivalEntry) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO festivals (festival_name, festival_date, recommended_places)
                VALUES (?1, ?2, ?3)
                "#,
                params![
                    festival.festival_name,
                    sql_date(festival.festival_date),
                    festival.recommended_places,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

fn row_to_festival(row: &Row) -> rusqlite::Result<FestivalEntry> {
    Ok(FestivalEntry {
        festival_name: row.get("festival_name")?,
        festival_date: parse_date(row, "festival_date")?,
        recommended_places: row
            .get::<_, Option<String>>("recommended_places")?
            .unwrap_or_default(),
    })
}

// Diagnostics

impl Database {
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        const TABLES: [&str; 4] = [
            "weather_master",
            "weather_data",
            "weather_predictions",
            "festivals",
        ];

        self.with_conn(|conn| {
            TABLES
                .iter()
                .map(|table| -> Result<(&'static str, i64)> {
                    let count: i64 = conn.query_row(
                        &format!("SELECT COUNT(*) FROM {}", table),
                        [],
                        |row| row.get(0),
                    )?;
                    Ok((*table, count))
                })
                .collect()
        })
    }
}

impl WeatherStore for Database {
    fn distinct_places(&self, category: PlaceCategory) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT name FROM {} ORDER BY name",
            category.table_name()
        );
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(names)
        })
    }

    fn place_history(
        &self,
        category: PlaceCategory,
        name: &str,
    ) -> Result<Vec<WeatherObservation>> {
        let sql = format!(
            "SELECT * FROM {} WHERE name = ?1 ORDER BY datetime",
            category.table_name()
        );
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([name], row_to_observation)?
                .filter_map(|r| keep_readable(r, "observation"))
                .collect();
            Ok(rows)
        })
    }

    fn purge_stale_predictions(&self, today: NaiveDate) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM weather_predictions WHERE predicted_date < ?1",
                [sql_date(today)],
            )?;
            Ok(removed)
        })
    }

    fn upsert_prediction(&self, prediction: &WeatherPrediction) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO weather_predictions
                    (name, base_date, predicted_date, pred_temp, pred_rain_prob, pred_rain_flag,
                     humidity, feelslike, windspeed, uvindex,
                     conditions, description, icon, sunrise, sunset)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                ON CONFLICT(name, predicted_date) DO UPDATE SET
                    pred_temp = excluded.pred_temp,
                    pred_rain_prob = excluded.pred_rain_prob,
                    pred_rain_flag = excluded.pred_rain_flag,
                    conditions = excluded.conditions,
                    description = excluded.description,
                    icon = excluded.icon
                "#,
                params![
                    prediction.name,
                    sql_date(prediction.base_date),
                    sql_date(prediction.predicted_date),
                    prediction.pred_temp,
                    prediction.pred_rain_prob,
                    prediction.pred_rain_flag as i64,
                    prediction.humidity,
                    prediction.feelslike,
                    prediction.windspeed,
                    prediction.uvindex,
                    prediction.condition.as_str(),
                    prediction.condition.description(),
                    prediction.condition.icon(),
                    prediction.sunrise,
                    prediction.sunset,
                ],
            )?;
            Ok(())
        })
    }

    fn observed_weather(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PlaceWeather>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT name, datetime, temp, conditions, precipprob / 100.0 AS rain_prob
                FROM weather_master
                WHERE datetime BETWEEN ?1 AND ?2
                UNION ALL
                SELECT name, datetime, temp, conditions, precipprob / 100.0 AS rain_prob
                FROM weather_data
                WHERE datetime BETWEEN ?1 AND ?2
                ORDER BY datetime, name
                "#,
            )?;
            let rows = stmt
                .query_map([sql_date(start), sql_date(end)], row_to_place_weather)?
                .filter_map(|r| keep_readable(r, "observed weather"))
                .collect();
            Ok(rows)
        })
    }

    fn predicted_weather(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PlaceWeather>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT name, pred_temp AS temp, conditions, pred_rain_prob AS rain_prob
                FROM weather_predictions
                WHERE predicted_date BETWEEN ?1 AND ?2
                ORDER BY predicted_date, name
                "#,
            )?;
            let rows = stmt
                .query_map([sql_date(start), sql_date(end)], row_to_place_weather)?
                .filter_map(|r| keep_readable(r, "predicted weather"))
                .collect();
            Ok(rows)
        })
    }

    fn festivals_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<FestivalEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT festival_name, festival_date, recommended_places
                FROM festivals
                WHERE festival_date BETWEEN ?1 AND ?2
                ORDER BY festival_date, id
                "#,
            )?;
            let rows = stmt
                .query_map([sql_date(start), sql_date(end)], row_to_festival)?
                .filter_map(|r| keep_readable(r, "festival"))
                .collect();
            Ok(rows)
        })
    }
}
