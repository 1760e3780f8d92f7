use crate::config::GeocodingConfig;
use crate::datasources::Geocoder;
use crate::error::{Result, TripCastError};
use crate::models::Coordinates;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

/// Forward geocoding against OpenStreetMap Nominatim `/search`
pub struct NominatimClient {
    client: Client,
    config: GeocodingConfig,
}

// Nominatim returns coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[allow(dead_code)]
    display_name: Option<String>,
}

impl NominatimClient {
    pub fn new(config: GeocodingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    fn search_url(&self, query: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[("q", query), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| TripCastError::Config(format!("Invalid geocoding URL: {}", e)))
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TripCastError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            return Err(TripCastError::DataSourceUnavailable(format!(
                "Nominatim returned {} for {}",
                response.status(),
                query
            )));
        }

        let places: Vec<NominatimPlace> = response.json().map_err(|e| {
            TripCastError::DataSourceUnavailable(format!(
                "Failed to parse Nominatim response: {}",
                e
            ))
        })?;

        let Some(first) = places.first() else {
            return Ok(None);
        };

        parse_place(first).map(Some)
    }
}

fn parse_place(place: &NominatimPlace) -> Result<Coordinates> {
    let latitude = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|e| TripCastError::InvalidData(format!("latitude '{}': {}", place.lat, e)))?;
    let longitude = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|e| TripCastError::InvalidData(format!("longitude '{}': {}", place.lon, e)))?;
    Ok(Coordinates::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let client = NominatimClient::new(GeocodingConfig::default()).unwrap();
        let url = client.search_url("Mount Abu,IN").unwrap();
        assert_eq!(url.host_str(), Some("nominatim.openstreetmap.org"));
        let query = url.query().unwrap();
        assert!(query.contains("q=Mount+Abu%2CIN"));
        assert!(query.contains("limit=1"));
        assert!(query.contains("format=json"));
    }

    #[test]
    fn parses_string_coordinates() {
        let body = r#"[{"lat": "19.0759899", "lon": "72.8773928", "display_name": "Mumbai"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let coords = parse_place(&places[0]).unwrap();
        assert!((coords.latitude - 19.0759899).abs() < 1e-9);
        assert!((coords.longitude - 72.8773928).abs() < 1e-9);
    }

    #[test]
    fn malformed_coordinates_are_errors() {
        let place = NominatimPlace {
            lat: "north".into(),
            lon: "72.8".into(),
            display_name: None,
        };
        assert!(parse_place(&place).is_err());
    }
}
