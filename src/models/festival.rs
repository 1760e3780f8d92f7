use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalEntry {
    pub festival_name: String,
    pub festival_date: NaiveDate,
    /// Comma-separated place names, as stored
    pub recommended_places: String,
}

impl FestivalEntry {
    pub fn new(
        festival_name: impl Into<String>,
        festival_date: NaiveDate,
        recommended_places: impl Into<String>,
    ) -> Self {
        Self {
            festival_name: festival_name.into(),
            festival_date,
            recommended_places: recommended_places.into(),
        }
    }

    /// Raw place tokens, best effort.
    ///
    /// Entries are split on commas, so a list written as "Goa,IN, Puri,IN"
    /// leaves dangling "IN" country codes behind; those and blank tokens are
    /// dropped.
    pub fn place_tokens(&self) -> impl Iterator<Item = &str> {
        self.recommended_places
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty() && !p.eq_ignore_ascii_case("in"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(places: &str) -> FestivalEntry {
        FestivalEntry::new(
            "Diwali",
            NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            places,
        )
    }

    #[test]
    fn plain_list() {
        let e = entry("Varanasi, Jaipur,Udaipur");
        let tokens: Vec<_> = e.place_tokens().collect();
        assert_eq!(tokens, vec!["Varanasi", "Jaipur", "Udaipur"]);
    }

    #[test]
    fn country_suffixed_list() {
        let e = entry("Goa,IN, Puri,IN");
        let tokens: Vec<_> = e.place_tokens().collect();
        assert_eq!(tokens, vec!["Goa", "Puri"]);
    }

    #[test]
    fn malformed_list_is_skipped_not_fatal() {
        let e = entry(" , ,,  ");
        assert_eq!(e.place_tokens().count(), 0);
    }
}
