use crate::config::RecommendConfig;
use crate::db::WeatherStore;
use crate::error::{Result, TripCastError};
use crate::logic::calculations::{format_hours, normalize_place, round_to, travel_time_hours};
use crate::logic::geo_resolver::GeoResolver;
use crate::logic::recommend::aggregate::aggregate;
use crate::logic::recommend::festivals::FestivalIndex;
use crate::logic::recommend::profiles::profile_for;
use crate::logic::recommend::scoring::{base_score, reasons, PlaceFacts};
use crate::models::{RecommendRequest, RecommendationReport, RecommendationResult, WeatherSource};
use chrono::{Duration, NaiveDate};

/// Days the seasonal proxy looks back
pub const SEASONAL_SHIFT_DAYS: i64 = 365;

/// The dates actually queried for a request window, and where they come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceWindow {
    pub source: WeatherSource,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Past windows and windows beyond the horizon use last year's observations
/// for the same dates; anything else reads the forecast.
pub fn select_window(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    horizon_days: u32,
) -> SourceWindow {
    let shifted = |source| SourceWindow {
        source,
        start: start - Duration::days(SEASONAL_SHIFT_DAYS),
        end: end - Duration::days(SEASONAL_SHIFT_DAYS),
    };

    if end < today {
        shifted(WeatherSource::Historical)
    } else if (end - today).num_days() <= i64::from(horizon_days) {
        SourceWindow {
            source: WeatherSource::Predicted,
            start,
            end,
        }
    } else {
        shifted(WeatherSource::Seasonal)
    }
}

/// Ranks places for a travel window. Reads the store, never writes it.
pub struct RecommendationScorer<'a> {
    store: &'a dyn WeatherStore,
    resolver: &'a mut GeoResolver,
    config: RecommendConfig,
    horizon_days: u32,
}

impl<'a> RecommendationScorer<'a> {
    pub fn new(
        store: &'a dyn WeatherStore,
        resolver: &'a mut GeoResolver,
        config: RecommendConfig,
        horizon_days: u32,
    ) -> Self {
        Self {
            store,
            resolver,
            config,
            horizon_days,
        }
    }

    pub fn recommend(
        &mut self,
        request: &RecommendRequest,
        today: NaiveDate,
    ) -> Result<RecommendationReport> {
        validate(request)?;

        let window = select_window(request.start, request.end, today, self.horizon_days);
        let rows = if window.source.uses_predictions() {
            self.store.predicted_weather(window.start, window.end)?
        } else {
            self.store.observed_weather(window.start, window.end)?
        };

        tracing::debug!(
            source = window.source.as_str(),
            from = %window.start,
            to = %window.end,
            rows = rows.len(),
            "Loaded weather for window"
        );

        if rows.is_empty() {
            tracing::info!(source = window.source.as_str(), "No weather data for window");
            return Ok(RecommendationReport::empty(window.source));
        }

        // Festivals always use the requested dates, not the proxy window
        let festival_entries = self.store.festivals_between(request.start, request.end)?;
        let festivals = FestivalIndex::build(&festival_entries);
        if !festivals.is_empty() {
            tracing::debug!(places = festivals.len(), "Festival places in window");
        }
        let profile = profile_for(request.travel_type);
        let origin = request.origin.as_deref().and_then(normalize_place);

        let mut places = Vec::new();
        for summary in aggregate(&rows) {
            let Some(place) = normalize_place(&summary.name) else {
                continue;
            };

            let distance = match &origin {
                Some(origin) => {
                    let Some(km) = self.resolver.distance_between(origin, &place) else {
                        tracing::debug!(place = %place, "Skipping place, distance unknown");
                        continue;
                    };
                    if request.max_distance_km.is_some_and(|max| km > max) {
                        continue;
                    }
                    Some(km)
                }
                None => None,
            };
            let travel_hours = distance.map(|km| travel_time_hours(km, request.transport));

            let facts = PlaceFacts {
                avg_temp: summary.avg_temp,
                avg_rain: summary.avg_rain,
                condition: &summary.condition,
                travel_hours,
                festivals: festivals.for_place(&place),
            };

            let mut score = base_score(&facts) + profile.bonus(&facts);
            if facts.has_festival() {
                score += self.config.festival_weight;
            }

            places.push(RecommendationResult {
                distance_km: distance.map(|km| round_to(km, 1)),
                travel_hours,
                travel_time: format_hours(travel_hours),
                avg_temp: round_to(summary.avg_temp, 1),
                condition: summary.condition.clone(),
                avg_rain: summary.avg_rain.map(|r| round_to(r, 3)),
                festivals: facts.festivals.to_vec(),
                score: round_to(f64::from(score), 2),
                reasons: reasons(&facts, request.transport),
                place,
            });
        }

        places.sort_by(|a, b| b.score.total_cmp(&a.score));
        places.truncate(self.config.max_results);

        tracing::info!(
            source = window.source.as_str(),
            profile = %profile.travel_type(),
            results = places.len(),
            "Recommendations ready"
        );

        Ok(RecommendationReport {
            source: window.source,
            places,
        })
    }
}

fn validate(request: &RecommendRequest) -> Result<()> {
    if request.start > request.end {
        return Err(TripCastError::InvalidInput(format!(
            "start date {} is after end date {}",
            request.start, request.end
        )));
    }
    if let Some(max) = request.max_distance_km {
        if !max.is_finite() || max < 0.0 {
            return Err(TripCastError::InvalidInput(format!(
                "max distance must be a non-negative number of km, got {}",
                max
            )));
        }
    }
    Ok(())
}
