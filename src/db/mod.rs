pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::Database;

use crate::error::Result;
use crate::models::{
    FestivalEntry, PlaceCategory, PlaceWeather, WeatherObservation, WeatherPrediction,
};
use chrono::NaiveDate;

/// Store access needed by the forecasting batch and the recommendation scorer.
///
/// The forecasting batch is the only writer of predictions; the scorer only
/// reads. Nothing here serializes a forecast run against concurrent readers in
/// other processes, so deployments sharing one store must not overlap them.
pub trait WeatherStore {
    /// Distinct place names present in a category's observation table
    fn distinct_places(&self, category: PlaceCategory) -> Result<Vec<String>>;

    /// Full observation history for a place, oldest first
    fn place_history(
        &self,
        category: PlaceCategory,
        name: &str,
    ) -> Result<Vec<WeatherObservation>>;

    /// Drop predictions dated before today; returns rows removed
    fn purge_stale_predictions(&self, today: NaiveDate) -> Result<usize>;

    /// Insert, or refresh the predicted values of, the row for (place, predicted date)
    fn upsert_prediction(&self, prediction: &WeatherPrediction) -> Result<()>;

    /// Observations from both categories within a date window
    fn observed_weather(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PlaceWeather>>;

    /// Predictions within a date window
    fn predicted_weather(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PlaceWeather>>;

    fn festivals_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<FestivalEntry>>;
}
