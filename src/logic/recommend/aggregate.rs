use crate::logic::calculations::mean;
use crate::models::PlaceWeather;
use std::collections::BTreeMap;

pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Window averages for one place
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub name: String,
    pub avg_temp: f64,
    pub avg_rain: Option<f64>,
    pub condition: String,
}

/// Group rows by place name, in name order.
///
/// Places without a single temperature reading are left out.
pub fn aggregate(rows: &[PlaceWeather]) -> Vec<PlaceSummary> {
    let mut grouped: BTreeMap<&str, Vec<&PlaceWeather>> = BTreeMap::new();
    for row in rows {
        grouped.entry(row.name.as_str()).or_default().push(row);
    }

    grouped
        .into_iter()
        .filter_map(|(name, rows)| {
            let avg_temp = mean(rows.iter().filter_map(|r| r.temp))?;
            Some(PlaceSummary {
                name: name.to_string(),
                avg_temp,
                avg_rain: mean(rows.iter().filter_map(|r| r.rain_prob)),
                condition: modal_condition(rows.iter().filter_map(|r| r.conditions.as_deref()))
                    .unwrap_or(UNKNOWN_CONDITION)
                    .to_string(),
            })
        })
        .collect()
}

/// Most frequent label; on a tie the one seen first wins
pub fn modal_condition<'a>(labels: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (label, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((label, n));
        }
    }
    best.map(|(label, _)| label)
}
