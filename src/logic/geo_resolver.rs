use crate::datasources::Geocoder;
use crate::logic::calculations::distance_km;
use crate::logic::geo_cache::GeoCache;
use crate::models::Coordinates;
use std::time::Duration;
use tracing::{debug, warn};

/// Place name → coordinates, cache first, network second.
///
/// Misses and failures are never cached, so an unresolvable place is retried
/// on the next call.
pub struct GeoResolver {
    geocoder: Box<dyn Geocoder>,
    cache: GeoCache,
    request_delay: Duration,
}

impl GeoResolver {
    pub fn new(geocoder: Box<dyn Geocoder>, cache: GeoCache, request_delay: Duration) -> Self {
        Self {
            geocoder,
            cache,
            request_delay,
        }
    }

    pub fn cache(&self) -> &GeoCache {
        &self.cache
    }

    pub fn resolve(&mut self, place: &str) -> Option<Coordinates> {
        if place.trim().is_empty() {
            return None;
        }

        if let Some(coords) = self.cache.get(place) {
            return Some(coords);
        }

        let coords = match self.geocoder.geocode(place) {
            Ok(Some(coords)) => coords,
            Ok(None) => {
                warn!(place = %place, "No geocoding result");
                return None;
            }
            Err(e) => {
                warn!(place = %place, "Geocoding failed: {}", e);
                return None;
            }
        };

        if let Err(e) = self.cache.insert(place, coords) {
            // The lookup itself succeeded; keep going with the in-memory entry
            warn!(place = %place, "Failed to save geo cache: {}", e);
        }
        debug!(place = %place, lat = coords.latitude, lon = coords.longitude, "Geocoded");

        if !self.request_delay.is_zero() {
            std::thread::sleep(self.request_delay);
        }

        Some(coords)
    }

    /// Great-circle distance in km, `None` if either place cannot be resolved
    pub fn distance_between(&mut self, a: &str, b: &str) -> Option<f64> {
        let from = self.resolve(a)?;
        let to = self.resolve(b)?;
        Some(distance_km(from, to))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::{Result, TripCastError};
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Geocoder backed by a fixed table that counts lookups
    pub struct FakeGeocoder {
        pub places: HashMap<String, Coordinates>,
        pub failing: Vec<String>,
        pub calls: Rc<Cell<usize>>,
    }

    impl FakeGeocoder {
        pub fn new(places: &[(&str, f64, f64)]) -> Self {
            Self {
                places: places
                    .iter()
                    .map(|(name, lat, lon)| (name.to_string(), Coordinates::new(*lat, *lon)))
                    .collect(),
                failing: Vec::new(),
                calls: Rc::new(Cell::new(0)),
            }
        }

        pub fn failing_on(mut self, place: &str) -> Self {
            self.failing.push(place.to_string());
            self
        }
    }

    impl Geocoder for FakeGeocoder {
        fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.iter().any(|f| f == query) {
                return Err(TripCastError::DataSourceUnavailable("simulated outage".into()));
            }
            Ok(self.places.get(query).copied())
        }
    }

    pub fn resolver_with(geocoder: FakeGeocoder) -> GeoResolver {
        GeoResolver::new(Box::new(geocoder), GeoCache::in_memory(), Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{resolver_with, FakeGeocoder};
    use super::*;

    fn geocoder() -> FakeGeocoder {
        FakeGeocoder::new(&[
            ("Mumbai,IN", 19.0760, 72.8777),
            ("Pune,IN", 18.5204, 73.8567),
        ])
    }

    #[test]
    fn second_lookup_hits_cache() {
        let fake = geocoder();
        let calls = fake.calls.clone();
        let mut resolver = resolver_with(fake);

        let first = resolver.resolve("Mumbai,IN");
        assert!(first.is_some());
        assert_eq!(calls.get(), 1);

        let second = resolver.resolve("  mumbai,in ");
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn misses_are_not_cached() {
        let fake = geocoder();
        let calls = fake.calls.clone();
        let mut resolver = resolver_with(fake);

        assert!(resolver.resolve("Atlantis,IN").is_none());
        assert!(resolver.resolve("Atlantis,IN").is_none());
        assert_eq!(calls.get(), 2);
        assert!(resolver.cache().get("atlantis,in").is_none());
    }

    #[test]
    fn failures_are_not_cached() {
        let fake = geocoder().failing_on("Pune,IN");
        let calls = fake.calls.clone();
        let mut resolver = resolver_with(fake);

        assert!(resolver.resolve("Pune,IN").is_none());
        assert!(resolver.resolve("Pune,IN").is_none());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn distance_symmetric_and_zero_on_self() {
        let mut resolver = resolver_with(geocoder());
        let ab = resolver.distance_between("Mumbai,IN", "Pune,IN").unwrap();
        let ba = resolver.distance_between("Pune,IN", "Mumbai,IN").unwrap();
        assert_eq!(ab, ba);
        assert!(ab > 100.0);
        assert_eq!(
            resolver.distance_between("Mumbai,IN", "Mumbai,IN"),
            Some(0.0)
        );
    }

    #[test]
    fn distance_unresolvable_when_either_side_missing() {
        let mut resolver = resolver_with(geocoder());
        assert_eq!(resolver.distance_between("Mumbai,IN", "Atlantis,IN"), None);
        assert_eq!(resolver.distance_between("Atlantis,IN", "Mumbai,IN"), None);
    }

    #[test]
    fn blank_place_is_not_looked_up() {
        let fake = geocoder();
        let calls = fake.calls.clone();
        let mut resolver = resolver_with(fake);
        assert!(resolver.resolve("   ").is_none());
        assert_eq!(calls.get(), 0);
    }
}
