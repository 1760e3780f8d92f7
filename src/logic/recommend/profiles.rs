use crate::logic::recommend::scoring::PlaceFacts;
use crate::models::TravelType;

/// Extra points a traveler profile awards on top of the shared score
pub trait ProfileBonus {
    fn travel_type(&self) -> TravelType;

    fn bonus(&self, facts: &PlaceFacts) -> i32;
}

fn points(fired: bool, value: i32) -> i32 {
    if fired {
        value
    } else {
        0
    }
}

/// Comfortable weather within half a day's travel
pub struct FamilyProfile;

impl ProfileBonus for FamilyProfile {
    fn travel_type(&self) -> TravelType {
        TravelType::Family
    }

    fn bonus(&self, facts: &PlaceFacts) -> i32 {
        points(facts.is_pleasant(), 10) + points(facts.within_hours(6.0), 10)
    }
}

/// Festivals and clear skies
pub struct HoneymoonProfile;

impl ProfileBonus for HoneymoonProfile {
    fn travel_type(&self) -> TravelType {
        TravelType::Honeymoon
    }

    fn bonus(&self, facts: &PlaceFacts) -> i32 {
        points(facts.has_festival(), 20) + points(facts.is_clear(), 15)
    }
}

/// Warm weather and festivals
pub struct FriendsProfile;

impl ProfileBonus for FriendsProfile {
    fn travel_type(&self) -> TravelType {
        TravelType::Friends
    }

    fn bonus(&self, facts: &PlaceFacts) -> i32 {
        points(facts.is_warm(), 15) + points(facts.has_festival(), 10)
    }
}

/// Dry, pleasant days
pub struct SoloProfile;

impl ProfileBonus for SoloProfile {
    fn travel_type(&self) -> TravelType {
        TravelType::Solo
    }

    fn bonus(&self, facts: &PlaceFacts) -> i32 {
        points(facts.is_low_rain(), 8) + points(facts.is_pleasant(), 6)
    }
}

pub fn profile_for(travel_type: TravelType) -> Box<dyn ProfileBonus> {
    match travel_type {
        TravelType::Family => Box::new(FamilyProfile),
        TravelType::Honeymoon => Box::new(HoneymoonProfile),
        TravelType::Friends => Box::new(FriendsProfile),
        TravelType::Solo => Box::new(SoloProfile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FESTIVALS: &[String] = &[];

    fn facts<'a>(
        temp: f64,
        rain: f64,
        condition: &'a str,
        hours: Option<f64>,
        festivals: &'a [String],
    ) -> PlaceFacts<'a> {
        PlaceFacts {
            avg_temp: temp,
            avg_rain: Some(rain),
            condition,
            travel_hours: hours,
            festivals,
        }
    }

    #[test]
    fn dispatch_matches_travel_type() {
        for travel_type in [
            TravelType::Solo,
            TravelType::Family,
            TravelType::Friends,
            TravelType::Honeymoon,
        ] {
            assert_eq!(profile_for(travel_type).travel_type(), travel_type);
        }
    }

    #[test]
    fn family_needs_short_trip_for_full_bonus() {
        let family = FamilyProfile;
        assert_eq!(family.bonus(&facts(22.0, 0.5, "Rain", Some(6.0), NO_FESTIVALS)), 20);
        assert_eq!(family.bonus(&facts(22.0, 0.5, "Rain", Some(6.5), NO_FESTIVALS)), 10);
        assert_eq!(family.bonus(&facts(22.0, 0.5, "Rain", None, NO_FESTIVALS)), 10);
        assert_eq!(family.bonus(&facts(35.0, 0.5, "Rain", Some(1.0), NO_FESTIVALS)), 10);
    }

    #[test]
    fn honeymoon_and_friends_reward_festivals() {
        let festivals = vec!["Hornbill".to_string()];
        let with = facts(26.0, 0.5, "Cloudy", None, &festivals);
        let without = facts(26.0, 0.5, "Cloudy", None, NO_FESTIVALS);

        assert_eq!(HoneymoonProfile.bonus(&with), 35);
        assert_eq!(HoneymoonProfile.bonus(&without), 15);
        assert_eq!(FriendsProfile.bonus(&with), 25);
        assert_eq!(FriendsProfile.bonus(&without), 15);
    }

    #[test]
    fn solo_rewards_dry_pleasant_days() {
        assert_eq!(SoloProfile.bonus(&facts(22.0, 0.2, "Clear", None, NO_FESTIVALS)), 14);
        assert_eq!(SoloProfile.bonus(&facts(29.0, 0.21, "Clear", None, NO_FESTIVALS)), 0);
    }
}
