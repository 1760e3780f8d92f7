use crate::models::{Coordinates, TransportMode};
use haversine::{distance, Location as HaversineLocation, Units};

/// Great-circle distance in km (Earth radius 6371 km), rounded to 0.1 km
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let km = distance(
        HaversineLocation {
            latitude: a.latitude,
            longitude: a.longitude,
        },
        HaversineLocation {
            latitude: b.latitude,
            longitude: b.longitude,
        },
        Units::Kilometers,
    );
    round_to(km, 1)
}

/// Round to `places` decimals; exact midpoints go to the even digit
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Hours on the road, rounded to the nearest half hour.
/// Exact quarter-hour midpoints round to the even half step.
pub fn travel_time_hours(distance_km: f64, mode: TransportMode) -> f64 {
    let hours = distance_km / mode.speed_kmh();
    (hours * 2.0).round_ties_even() / 2.0
}

/// "45 min" or "3 h 30 min"
pub fn format_hours(hours: Option<f64>) -> String {
    let Some(hours) = hours else {
        return "—".to_string();
    };
    let h = hours.trunc() as i64;
    let m = ((hours - h as f64) * 60.0) as i64;
    if h == 0 {
        format!("{} min", m)
    } else {
        format!("{} h {} min", h, m)
    }
}

/// Canonical "Title Case,IN" form used to match weather places against
/// festival place lists and to query the geocoder.
pub fn normalize_place(name: &str) -> Option<String> {
    let mut name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    if !name.ends_with(",in") {
        name.push_str(",in");
    }
    Some(title_case(&name).replace(",In", ",IN"))
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
