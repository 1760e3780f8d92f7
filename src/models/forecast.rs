use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Qualitative label derived for a predicted day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    Rain,
    Cloudy,
    Hot,
    Cold,
    #[default]
    Clear,
}

impl WeatherCondition {
    /// Rules are checked in order: rain beats cloud cover, cloud cover beats temperature.
    pub fn derive(temp_c: f64, rain_flag: bool, cloudcover: f64) -> Self {
        if rain_flag {
            WeatherCondition::Rain
        } else if cloudcover >= 75.0 {
            WeatherCondition::Cloudy
        } else if temp_c >= 32.0 {
            WeatherCondition::Hot
        } else if temp_c <= 10.0 {
            WeatherCondition::Cold
        } else {
            WeatherCondition::Clear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Hot => "Hot",
            WeatherCondition::Cold => "Cold",
            WeatherCondition::Clear => "Clear",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Rain => "rain",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Hot => "clear-day",
            WeatherCondition::Cold => "clear-night",
            WeatherCondition::Clear => "clear-day",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherCondition::Rain => "Rain expected",
            WeatherCondition::Cloudy => "Mostly cloudy skies",
            WeatherCondition::Hot => "Hot weather conditions",
            WeatherCondition::Cold => "Cold weather conditions",
            WeatherCondition::Clear => "Clear and pleasant weather",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rain" => Some(WeatherCondition::Rain),
            "cloudy" => Some(WeatherCondition::Cloudy),
            "hot" => Some(WeatherCondition::Hot),
            "cold" => Some(WeatherCondition::Cold),
            "clear" => Some(WeatherCondition::Clear),
            _ => None,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One forecast day for a place, as stored in `weather_predictions`.
///
/// Humidity, feels-like, wind, UV and sun times are carried forward unchanged
/// from the last day of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPrediction {
    pub name: String,
    pub base_date: NaiveDate,
    pub predicted_date: NaiveDate,
    pub pred_temp: f64,
    pub pred_rain_prob: f64,
    pub pred_rain_flag: bool,
    pub humidity: f64,
    pub feelslike: Option<f64>,
    pub windspeed: f64,
    pub uvindex: f64,
    pub condition: WeatherCondition,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl WeatherPrediction {
    pub fn days_ahead(&self) -> i64 {
        (self.predicted_date - self.base_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_flag_wins() {
        assert_eq!(
            WeatherCondition::derive(40.0, true, 90.0),
            WeatherCondition::Rain
        );
    }

    #[test]
    fn condition_boundaries() {
        assert_eq!(
            WeatherCondition::derive(32.0, false, 50.0),
            WeatherCondition::Hot
        );
        assert_eq!(
            WeatherCondition::derive(10.0, false, 50.0),
            WeatherCondition::Cold
        );
        assert_eq!(
            WeatherCondition::derive(32.0, false, 75.0),
            WeatherCondition::Cloudy
        );
        assert_eq!(
            WeatherCondition::derive(10.0, false, 75.0),
            WeatherCondition::Cloudy
        );
        assert_eq!(
            WeatherCondition::derive(31.99, false, 74.9),
            WeatherCondition::Clear
        );
        assert_eq!(
            WeatherCondition::derive(10.01, false, 0.0),
            WeatherCondition::Clear
        );
    }

    #[test]
    fn condition_round_trips_through_label() {
        for condition in [
            WeatherCondition::Rain,
            WeatherCondition::Cloudy,
            WeatherCondition::Hot,
            WeatherCondition::Cold,
            WeatherCondition::Clear,
        ] {
            assert_eq!(WeatherCondition::from_str(condition.as_str()), Some(condition));
        }
        assert_eq!(WeatherCondition::from_str("Partially cloudy"), None);
    }

    #[test]
    fn icons_and_descriptions() {
        assert_eq!(WeatherCondition::Cold.icon(), "clear-night");
        assert_eq!(WeatherCondition::Hot.icon(), "clear-day");
        assert_eq!(WeatherCondition::Rain.description(), "Rain expected");
    }
}
