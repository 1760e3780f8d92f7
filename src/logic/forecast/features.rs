use crate::models::WeatherObservation;
use chrono::{Datelike, NaiveDate};

/// Model input order. Both forests are trained and queried with this layout.
pub const FEATURE_NAMES: [&str; 8] = [
    "temp_lag_1",
    "temp_lag_7",
    "humidity",
    "windspeed",
    "cloudcover",
    "uvindex",
    "month",
    "dayofyear",
];

/// Rows needed before the first one has a seven-day lag
pub const LAG_WINDOW: usize = 7;

/// Weather inputs other than temperature; carried forward unchanged over the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInputs {
    pub humidity: f64,
    pub windspeed: f64,
    pub cloudcover: f64,
    pub uvindex: f64,
}

pub fn feature_vector(lag_1: f64, lag_7: f64, inputs: &WeatherInputs, date: NaiveDate) -> Vec<f64> {
    vec![
        lag_1,
        lag_7,
        inputs.humidity,
        inputs.windspeed,
        inputs.cloudcover,
        inputs.uvindex,
        date.month() as f64,
        date.ordinal() as f64,
    ]
}

/// One complete history day, ready for training
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRow {
    pub date: NaiveDate,
    pub features: Vec<f64>,
    pub temp: f64,
    pub rained: bool,
    pub inputs: WeatherInputs,
    pub feelslike: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Build training rows from a date-ordered history.
///
/// Lags are positional: the row one and seven places earlier, whatever their
/// dates. Rows missing any model input, or whose lagged rows lack a
/// temperature, are dropped.
pub fn build_training_rows(history: &[WeatherObservation]) -> Vec<TrainingRow> {
    (LAG_WINDOW..history.len())
        .filter_map(|i| {
            let obs = &history[i];
            let temp = obs.temp?;
            let lag_1 = history[i - 1].temp?;
            let lag_7 = history[i - LAG_WINDOW].temp?;
            let inputs = WeatherInputs {
                humidity: obs.humidity?,
                windspeed: obs.windspeed?,
                cloudcover: obs.cloudcover?,
                uvindex: obs.uvindex?,
            };

            Some(TrainingRow {
                date: obs.date,
                features: feature_vector(lag_1, lag_7, &inputs, obs.date),
                temp,
                rained: obs.rained(),
                inputs,
                feelslike: obs.feelslike,
                sunrise: obs.sunrise.clone(),
                sunset: obs.sunset.clone(),
            })
        })
        .collect()
}

/// Lag state while feeding predictions forward one day at a time
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardState {
    lag_1: f64,
    lag_7: Option<f64>,
    inputs: WeatherInputs,
}

impl ForwardState {
    /// Seeds from the last training row. The seven-day lag is the temperature
    /// seven rows from the end and stays fixed; with fewer rows it follows the
    /// running one-day lag.
    pub fn from_rows(rows: &[TrainingRow]) -> Option<Self> {
        let last = rows.last()?;
        let lag_7 = rows
            .len()
            .checked_sub(LAG_WINDOW)
            .map(|idx| rows[idx].temp);

        Some(Self {
            lag_1: last.temp,
            lag_7,
            inputs: last.inputs,
        })
    }

    pub fn features_for(&self, date: NaiveDate) -> Vec<f64> {
        feature_vector(
            self.lag_1,
            self.lag_7.unwrap_or(self.lag_1),
            &self.inputs,
            date,
        )
    }

    pub fn advance(&mut self, predicted_temp: f64) {
        self.lag_1 = predicted_temp;
    }

    pub fn inputs(&self) -> &WeatherInputs {
        &self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Duration::days(n)
    }

    fn complete(n: i64, temp: f64) -> WeatherObservation {
        let mut obs = WeatherObservation::new("Jaipur,IN", day(n));
        obs.temp = Some(temp);
        obs.humidity = Some(40.0);
        obs.windspeed = Some(10.0);
        obs.cloudcover = Some(20.0);
        obs.uvindex = Some(6.0);
        obs
    }

    #[test]
    fn first_rows_lack_lags() {
        let history: Vec<_> = (0..10).map(|n| complete(n, n as f64)).collect();
        let rows = build_training_rows(&history);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, day(7));
        assert_eq!(rows[0].features[0], 6.0);
        assert_eq!(rows[0].features[1], 0.0);
    }

    #[test]
    fn calendar_features() {
        let history: Vec<_> = (0..40).map(|n| complete(n, 20.0)).collect();
        let rows = build_training_rows(&history);
        let feb = rows.iter().find(|r| r.date == day(31)).unwrap();
        assert_eq!(feb.features[6], 2.0);
        assert_eq!(feb.features[7], 32.0);
        assert_eq!(feb.features.len(), FEATURE_NAMES.len());
    }

    #[test]
    fn gaps_drop_dependent_rows() {
        let mut history: Vec<_> = (0..20).map(|n| complete(n, 25.0)).collect();
        history[10].temp = None;
        history[15].humidity = None;
        let rows = build_training_rows(&history);

        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();
        // day 10 itself, day 11 (lag 1) and day 17 (lag 7) lose their row
        for missing in [day(10), day(11), day(15), day(17)] {
            assert!(!dates.contains(&missing), "{} kept", missing);
        }
        assert_eq!(rows.len(), 13 - 4);
    }

    #[test]
    fn rain_flag_from_precipitation() {
        let mut history: Vec<_> = (0..9).map(|n| complete(n, 25.0)).collect();
        history[8].precip = Some(1.5);
        let rows = build_training_rows(&history);
        assert!(!rows[0].rained);
        assert!(rows[1].rained);
    }

    #[test]
    fn forward_state_holds_lag_seven() {
        let history: Vec<_> = (0..17).map(|n| complete(n, n as f64)).collect();
        let rows = build_training_rows(&history);
        assert_eq!(rows.len(), 10);

        let mut state = ForwardState::from_rows(&rows).unwrap();
        let f = state.features_for(day(20));
        assert_eq!(f[0], 16.0);
        assert_eq!(f[1], 10.0);

        state.advance(30.5);
        let f = state.features_for(day(21));
        assert_eq!(f[0], 30.5);
        assert_eq!(f[1], 10.0);
    }

    #[test]
    fn short_history_lag_seven_follows_running_temp() {
        let history: Vec<_> = (0..10).map(|n| complete(n, n as f64)).collect();
        let rows = build_training_rows(&history);
        let mut state = ForwardState::from_rows(&rows).unwrap();
        assert_eq!(state.features_for(day(11))[1], 9.0);
        state.advance(12.0);
        assert_eq!(state.features_for(day(12))[1], 12.0);
    }

    #[test]
    fn no_rows_no_state() {
        assert!(ForwardState::from_rows(&[]).is_none());
    }
}
