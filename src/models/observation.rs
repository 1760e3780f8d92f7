use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two observation tables share a schema but differ in how much history a
/// place needs before it is worth forecasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum PlaceCategory {
    City,
    TouristPlace,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 2] = [PlaceCategory::City, PlaceCategory::TouristPlace];

    pub fn table_name(&self) -> &'static str {
        match self {
            PlaceCategory::City => "weather_master",
            PlaceCategory::TouristPlace => "weather_data",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::City => "City",
            PlaceCategory::TouristPlace => "Tourist place",
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ingested day of weather for a place.
///
/// Every measurement is optional because upstream feeds leave gaps.
/// `precipprob` is a percentage (0-100) as delivered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub name: String,
    #[serde(alias = "datetime")]
    pub date: NaiveDate,
    pub temp: Option<f64>,
    pub feelslike: Option<f64>,
    pub humidity: Option<f64>,
    pub windspeed: Option<f64>,
    pub cloudcover: Option<f64>,
    pub uvindex: Option<f64>,
    pub precip: Option<f64>,
    pub precipprob: Option<f64>,
    pub conditions: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub source: Option<String>,
}

impl WeatherObservation {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            temp: None,
            feelslike: None,
            humidity: None,
            windspeed: None,
            cloudcover: None,
            uvindex: None,
            precip: None,
            precipprob: None,
            conditions: None,
            sunrise: None,
            sunset: None,
            source: None,
        }
    }

    pub fn rained(&self) -> bool {
        self.precip.unwrap_or(0.0) > 0.0
    }
}

/// A single weather row feeding the recommendation aggregation, either
/// observed or predicted. `rain_prob` is always a 0-1 fraction here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceWeather {
    pub name: String,
    pub temp: Option<f64>,
    pub conditions: Option<String>,
    pub rain_prob: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_precipitation_is_dry() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut obs = WeatherObservation::new("Goa,IN", date);
        assert!(!obs.rained());

        obs.precip = Some(0.0);
        assert!(!obs.rained());

        obs.precip = Some(0.2);
        assert!(obs.rained());
    }

    #[test]
    fn deserializes_provider_day() {
        let json = r#"{"name": "Goa,IN", "datetime": "2025-02-03", "temp": 27.4, "precipprob": 12}"#;
        let obs: WeatherObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2025, 2, 3).unwrap());
        assert_eq!(obs.temp, Some(27.4));
        assert_eq!(obs.precipprob, Some(12.0));
        assert!(obs.humidity.is_none());
    }

    #[test]
    fn categories_map_to_tables() {
        assert_eq!(PlaceCategory::City.table_name(), "weather_master");
        assert_eq!(PlaceCategory::TouristPlace.table_name(), "weather_data");
    }
}
