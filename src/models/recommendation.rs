use crate::models::{TransportMode, TravelType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the weather behind a recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherSource {
    /// Window already over: same window one year earlier
    Historical,
    /// Window inside the forecast horizon
    Predicted,
    /// Window past the horizon: same window one year earlier
    Seasonal,
}

impl WeatherSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherSource::Historical => "historical",
            WeatherSource::Predicted => "AI prediction",
            WeatherSource::Seasonal => "seasonal estimate",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            WeatherSource::Historical => "Based on last year historical data",
            WeatherSource::Predicted => "AI-based weather prediction",
            WeatherSource::Seasonal => "Based on last year seasonal data",
        }
    }

    pub fn uses_predictions(&self) -> bool {
        matches!(self, WeatherSource::Predicted)
    }
}

impl std::fmt::Display for WeatherSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.note())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub travel_type: TravelType,
    pub origin: Option<String>,
    pub transport: TransportMode,
    pub max_distance_km: Option<f64>,
}

impl RecommendRequest {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            travel_type: TravelType::default(),
            origin: None,
            transport: TransportMode::default(),
            max_distance_km: None,
        }
    }

    pub fn travel_type(mut self, travel_type: TravelType) -> Self {
        self.travel_type = travel_type;
        self
    }

    pub fn from_origin(mut self, origin: impl Into<String>, transport: TransportMode) -> Self {
        self.origin = Some(origin.into());
        self.transport = transport;
        self
    }

    pub fn max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }
}

/// One ranked place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub place: String,
    pub distance_km: Option<f64>,
    pub travel_hours: Option<f64>,
    pub travel_time: String,
    pub avg_temp: f64,
    pub condition: String,
    pub avg_rain: Option<f64>,
    pub festivals: Vec<String>,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl RecommendationResult {
    pub fn festival_label(&self) -> String {
        self.festivals.join(", ")
    }

    pub fn why(&self) -> String {
        self.reasons.join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub source: WeatherSource,
    pub places: Vec<RecommendationResult>,
}

impl RecommendationReport {
    pub fn empty(source: WeatherSource) -> Self {
        Self {
            source,
            places: Vec::new(),
        }
    }

    pub fn source_note(&self) -> &'static str {
        self.source.note()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_predicted_source_reads_predictions() {
        assert!(WeatherSource::Predicted.uses_predictions());
        assert!(!WeatherSource::Historical.uses_predictions());
        assert!(!WeatherSource::Seasonal.uses_predictions());
    }

    #[test]
    fn request_builder_defaults() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let req = RecommendRequest::new(d, d);
        assert_eq!(req.travel_type, TravelType::Solo);
        assert_eq!(req.transport, TransportMode::Car);
        assert!(req.origin.is_none());
        assert!(req.max_distance_km.is_none());

        let req = req
            .travel_type(TravelType::Family)
            .from_origin("Pune,IN", TransportMode::Train)
            .max_distance_km(500.0);
        assert_eq!(req.origin.as_deref(), Some("Pune,IN"));
        assert_eq!(req.transport, TransportMode::Train);
        assert_eq!(req.max_distance_km, Some(500.0));
    }
}
