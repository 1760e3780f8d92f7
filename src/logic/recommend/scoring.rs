//! Point tables shared by every traveler profile.

use crate::models::TransportMode;

/// Facts about one candidate place that the scoring rules look at
#[derive(Debug, Clone)]
pub struct PlaceFacts<'a> {
    pub avg_temp: f64,
    pub avg_rain: Option<f64>,
    pub condition: &'a str,
    /// `None` when no origin was given
    pub travel_hours: Option<f64>,
    pub festivals: &'a [String],
}

impl PlaceFacts<'_> {
    pub fn is_pleasant(&self) -> bool {
        (18.0..=28.0).contains(&self.avg_temp)
    }

    pub fn is_warm(&self) -> bool {
        self.avg_temp >= 25.0
    }

    pub fn is_low_rain(&self) -> bool {
        self.avg_rain.is_some_and(|r| r <= 0.2)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self.condition, "Clear" | "Cloudy")
    }

    pub fn has_festival(&self) -> bool {
        !self.festivals.is_empty()
    }

    pub fn within_hours(&self, hours: f64) -> bool {
        self.travel_hours.is_some_and(|h| h <= hours)
    }
}

pub fn temperature_points(avg_temp: f64) -> i32 {
    if (18.0..=28.0).contains(&avg_temp) {
        20
    } else if (15.0..=32.0).contains(&avg_temp) {
        15
    } else {
        8
    }
}

pub fn condition_points(condition: &str) -> i32 {
    match condition {
        "Clear" | "Cloudy" => 10,
        "Rain" => -8,
        _ => 0,
    }
}

/// Unknown rain probability scores nothing
pub fn rain_points(avg_rain: Option<f64>) -> i32 {
    match avg_rain {
        Some(r) if r <= 0.1 => 10,
        Some(r) if r <= 0.3 => 4,
        Some(r) if r >= 0.6 => -10,
        _ => 0,
    }
}

pub fn travel_points(hours: f64) -> i32 {
    if hours <= 3.0 {
        15
    } else if hours <= 6.0 {
        5
    } else if hours <= 10.0 {
        -5
    } else {
        -12
    }
}

/// Weather and travel points, before festival and profile bonuses
pub fn base_score(facts: &PlaceFacts) -> i32 {
    temperature_points(facts.avg_temp)
        + condition_points(facts.condition)
        + rain_points(facts.avg_rain)
        + facts.travel_hours.map_or(0, travel_points)
}

/// Human-readable reasons for the predicates that fired
pub fn reasons(facts: &PlaceFacts, transport: TransportMode) -> Vec<String> {
    let mut reasons = Vec::new();

    if facts.is_pleasant() {
        reasons.push("Pleasant temperature".to_string());
    }
    if facts.is_low_rain() {
        reasons.push("Low chance of rain".to_string());
    }
    if let Some(hours) = facts.travel_hours {
        let phrase = if hours <= 3.0 {
            "Short travel time"
        } else if hours <= 6.0 {
            "Moderate travel time"
        } else {
            "Long journey"
        };
        reasons.push(format!("{} by {}", phrase, transport));
    }
    if facts.has_festival() {
        reasons.push(format!("Festival: {}", facts.festivals.join(", ")));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(temp: f64, rain: Option<f64>, condition: &str, hours: Option<f64>) -> PlaceFacts<'_> {
        PlaceFacts {
            avg_temp: temp,
            avg_rain: rain,
            condition,
            travel_hours: hours,
            festivals: &[],
        }
    }

    #[test]
    fn temperature_bands() {
        assert_eq!(temperature_points(18.0), 20);
        assert_eq!(temperature_points(28.0), 20);
        assert_eq!(temperature_points(15.0), 15);
        assert_eq!(temperature_points(32.0), 15);
        assert_eq!(temperature_points(32.1), 8);
        assert_eq!(temperature_points(-3.0), 8);
    }

    #[test]
    fn rain_bands() {
        assert_eq!(rain_points(Some(0.1)), 10);
        assert_eq!(rain_points(Some(0.3)), 4);
        assert_eq!(rain_points(Some(0.45)), 0);
        assert_eq!(rain_points(Some(0.6)), -10);
        assert_eq!(rain_points(None), 0);
    }

    #[test]
    fn travel_bands() {
        assert_eq!(travel_points(3.0), 15);
        assert_eq!(travel_points(6.0), 5);
        assert_eq!(travel_points(10.0), -5);
        assert_eq!(travel_points(10.5), -12);
    }

    #[test]
    fn condition_labels() {
        assert_eq!(condition_points("Clear"), 10);
        assert_eq!(condition_points("Cloudy"), 10);
        assert_eq!(condition_points("Rain"), -8);
        assert_eq!(condition_points("Hot"), 0);
        assert_eq!(condition_points("Partially cloudy"), 0);
    }

    #[test]
    fn base_score_without_origin_skips_travel() {
        assert_eq!(base_score(&facts(22.0, Some(0.05), "Clear", None)), 40);
        assert_eq!(base_score(&facts(22.0, Some(0.05), "Clear", Some(2.0))), 55);
    }

    #[test]
    fn reasons_follow_predicates() {
        let festivals = vec!["Diwali".to_string(), "Chhath".to_string()];
        let f = PlaceFacts {
            festivals: &festivals,
            ..facts(22.0, Some(0.1), "Clear", Some(4.5))
        };
        assert_eq!(
            reasons(&f, TransportMode::Train),
            vec![
                "Pleasant temperature",
                "Low chance of rain",
                "Moderate travel time by Train",
                "Festival: Diwali, Chhath",
            ]
        );

        let hot = facts(35.0, Some(0.5), "Hot", Some(12.0));
        assert_eq!(reasons(&hot, TransportMode::Car), vec!["Long journey by Car"]);
        assert!(reasons(&facts(35.0, None, "Hot", None), TransportMode::Car).is_empty());
    }
}
