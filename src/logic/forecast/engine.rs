use crate::config::ForecastConfig;
use crate::db::WeatherStore;
use crate::error::Result;
use crate::logic::calculations::round_to;
use crate::logic::forecast::features::{
    build_training_rows, ForwardState, TrainingRow, FEATURE_NAMES,
};
use crate::logic::forecast::forest::{RainModel, TemperatureModel};
use crate::models::{PlaceCategory, WeatherCondition, WeatherPrediction};
use chrono::{Duration, NaiveDate};

/// Probability at or above which a day is flagged as rainy
pub const RAIN_THRESHOLD: f64 = 0.5;

/// What happened to one place in a forecast run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastOutcome {
    /// Too little history to train on; nothing was written
    InsufficientData { rows: usize, required: usize },
    /// Every horizon day was written
    Persisted { days: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub forecasted: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub purged: usize,
    pub cities: CategoryReport,
    pub tourist_places: CategoryReport,
}

impl BatchReport {
    fn category_mut(&mut self, category: PlaceCategory) -> &mut CategoryReport {
        match category {
            PlaceCategory::City => &mut self.cities,
            PlaceCategory::TouristPlace => &mut self.tourist_places,
        }
    }

    pub fn forecasted(&self) -> usize {
        self.cities.forecasted + self.tourist_places.forecasted
    }

    pub fn failed(&self) -> usize {
        self.cities.failed.len() + self.tourist_places.failed.len()
    }
}

struct TrainedModels {
    temperature: TemperatureModel,
    rain: RainModel,
}

/// Trains per-place models and writes a rolling forecast through a [`WeatherStore`].
pub struct ForecastEngine<'a> {
    store: &'a dyn WeatherStore,
    config: ForecastConfig,
}

impl<'a> ForecastEngine<'a> {
    pub fn new(store: &'a dyn WeatherStore, config: ForecastConfig) -> Self {
        Self { store, config }
    }

    pub fn min_rows(&self, category: PlaceCategory) -> usize {
        match category {
            PlaceCategory::City => self.config.min_rows_city,
            PlaceCategory::TouristPlace => self.config.min_rows_place,
        }
    }

    /// Forecast one place and persist every horizon day.
    ///
    /// Predictions are written one day at a time without a transaction; an
    /// error part way through leaves the days already written.
    pub fn run_forecast(
        &self,
        place: &str,
        category: PlaceCategory,
        min_rows: usize,
        today: NaiveDate,
    ) -> Result<ForecastOutcome> {
        let history = self.store.place_history(category, place)?;
        if history.len() < min_rows {
            tracing::info!(
                place = %place,
                rows = history.len(),
                required = min_rows,
                "Skipping forecast, not enough history"
            );
            return Ok(ForecastOutcome::InsufficientData {
                rows: history.len(),
                required: min_rows,
            });
        }

        let rows = build_training_rows(&history);
        if rows.is_empty() {
            tracing::warn!(place = %place, rows = history.len(), "No complete training rows");
            return Ok(ForecastOutcome::InsufficientData {
                rows: 0,
                required: 1,
            });
        }

        let models = self.train(&rows)?;
        let predictions = self.project(place, &models, &rows, today)?;

        for prediction in &predictions {
            self.store.upsert_prediction(prediction)?;
        }

        tracing::info!(place = %place, days = predictions.len(), "Forecast saved");
        Ok(ForecastOutcome::Persisted {
            days: predictions.len(),
        })
    }

    /// Purge past predictions, then forecast every city followed by every
    /// tourist place. A failing place is logged and the batch moves on.
    pub fn run_batch(&self, today: NaiveDate) -> Result<BatchReport> {
        let mut report = BatchReport {
            purged: self.store.purge_stale_predictions(today)?,
            ..BatchReport::default()
        };
        tracing::info!(removed = report.purged, "Purged stale predictions");

        for category in PlaceCategory::ALL {
            let places = self.store.distinct_places(category)?;
            let min_rows = self.min_rows(category);
            tracing::info!(category = %category, places = places.len(), "Forecasting");

            for place in places {
                let entry = report.category_mut(category);
                match self.run_forecast(&place, category, min_rows, today) {
                    Ok(ForecastOutcome::Persisted { .. }) => entry.forecasted += 1,
                    Ok(ForecastOutcome::InsufficientData { .. }) => entry.skipped += 1,
                    Err(e) => {
                        tracing::error!(place = %place, "Forecast failed: {}", e);
                        entry.failed.push(place);
                    }
                }
            }
        }

        tracing::info!(
            forecasted = report.forecasted(),
            failed = report.failed(),
            "Forecast batch complete"
        );
        Ok(report)
    }

    fn train(&self, rows: &[TrainingRow]) -> Result<TrainedModels> {
        let x: Vec<Vec<f64>> = rows.iter().map(|r| r.features.clone()).collect();
        let temps: Vec<f64> = rows.iter().map(|r| r.temp).collect();
        let rained: Vec<bool> = rows.iter().map(|r| r.rained).collect();
        tracing::debug!(rows = rows.len(), features = ?FEATURE_NAMES, "Training models");

        Ok(TrainedModels {
            temperature: TemperatureModel::fit(
                &x,
                &temps,
                self.config.temperature_trees,
                self.config.seed,
            )?,
            rain: RainModel::fit(
                &x,
                &rained,
                self.config.rain_trees,
                self.config.seed,
            )?,
        })
    }

    /// Feed each predicted temperature back in as the next day's one-day lag
    fn project(
        &self,
        place: &str,
        models: &TrainedModels,
        rows: &[TrainingRow],
        today: NaiveDate,
    ) -> Result<Vec<WeatherPrediction>> {
        let (Some(mut state), Some(last)) = (ForwardState::from_rows(rows), rows.last()) else {
            return Ok(Vec::new());
        };

        let mut predictions = Vec::with_capacity(self.config.horizon_days as usize);
        for offset in 1..=i64::from(self.config.horizon_days) {
            let date = today + Duration::days(offset);
            let features = state.features_for(date);

            let temp = models.temperature.predict(&features)?;
            let rain_prob = models.rain.probability(&features)?;
            let rain_flag = rain_prob >= RAIN_THRESHOLD;
            let inputs = state.inputs();

            predictions.push(WeatherPrediction {
                name: place.to_string(),
                base_date: today,
                predicted_date: date,
                pred_temp: round_to(temp, 2),
                pred_rain_prob: round_to(rain_prob, 3),
                pred_rain_flag: rain_flag,
                humidity: inputs.humidity,
                feelslike: last.feelslike,
                windspeed: inputs.windspeed,
                uvindex: inputs.uvindex,
                condition: WeatherCondition::derive(temp, rain_flag, inputs.cloudcover),
                sunrise: last.sunrise.clone(),
                sunset: last.sunset.clone(),
            });

            state.advance(temp);
        }

        Ok(predictions)
    }
}
