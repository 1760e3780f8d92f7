use crate::logic::calculations::normalize_place;
use crate::models::FestivalEntry;
use std::collections::HashMap;

/// Normalized place name → festivals recommending it
#[derive(Debug, Default)]
pub struct FestivalIndex {
    by_place: HashMap<String, Vec<String>>,
}

impl FestivalIndex {
    pub fn build(entries: &[FestivalEntry]) -> Self {
        let mut by_place: HashMap<String, Vec<String>> = HashMap::new();
        for entry in entries {
            for token in entry.place_tokens() {
                let Some(place) = normalize_place(token) else {
                    continue;
                };
                let names = by_place.entry(place).or_default();
                if !names.contains(&entry.festival_name) {
                    names.push(entry.festival_name.clone());
                }
            }
        }
        Self { by_place }
    }

    pub fn for_place(&self, normalized: &str) -> &[String] {
        self.by_place
            .get(normalized)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_place.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_place.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
    }

    #[test]
    fn tokens_are_normalized() {
        let index = FestivalIndex::build(&[
            FestivalEntry::new("Pushkar Fair", date(), "pushkar, Ajmer ,"),
            FestivalEntry::new("Diwali", date(), "Jaipur,IN, Varanasi,IN"),
        ]);
        assert_eq!(index.for_place("Pushkar,IN"), ["Pushkar Fair".to_string()]);
        assert_eq!(index.for_place("Ajmer,IN"), ["Pushkar Fair".to_string()]);
        assert_eq!(index.for_place("Varanasi,IN"), ["Diwali".to_string()]);
        assert!(index.for_place("In,IN").is_empty());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn several_festivals_per_place() {
        let index = FestivalIndex::build(&[
            FestivalEntry::new("Diwali", date(), "Jaipur"),
            FestivalEntry::new("Teej", date(), "jaipur"),
            FestivalEntry::new("Diwali", date(), "JAIPUR"),
        ]);
        assert_eq!(
            index.for_place("Jaipur,IN"),
            ["Diwali".to_string(), "Teej".to_string()]
        );
    }

    #[test]
    fn empty_lists_are_ignored() {
        let index = FestivalIndex::build(&[FestivalEntry::new("Holi", date(), " , ,")]);
        assert!(index.is_empty());
    }
}
