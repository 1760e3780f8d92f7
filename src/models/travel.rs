use serde::{Deserialize, Serialize};

/// Who is travelling. Each profile carries its own bonus rules in the scorer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TravelType {
    #[default]
    Solo,
    Family,
    Friends,
    Honeymoon,
}

impl TravelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelType::Solo => "Solo",
            TravelType::Family => "Family",
            TravelType::Friends => "Friends",
            TravelType::Honeymoon => "Honeymoon",
        }
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum TransportMode {
    #[default]
    Car,
    Bike,
    Train,
    Flight,
}

impl TransportMode {
    /// Average door-to-door speed in km/h
    pub fn speed_kmh(&self) -> f64 {
        match self {
            TransportMode::Car => 80.0,
            TransportMode::Bike => 60.0,
            TransportMode::Train => 100.0,
            TransportMode::Flight => 600.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "Car",
            TransportMode::Bike => "Bike",
            TransportMode::Train => "Train",
            TransportMode::Flight => "Flight",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_speeds() {
        assert_eq!(TransportMode::Car.speed_kmh(), 80.0);
        assert_eq!(TransportMode::Bike.speed_kmh(), 60.0);
        assert_eq!(TransportMode::Train.speed_kmh(), 100.0);
        assert_eq!(TransportMode::Flight.speed_kmh(), 600.0);
    }

    #[test]
    fn display_labels() {
        assert_eq!(TravelType::Honeymoon.to_string(), "Honeymoon");
        assert_eq!(TransportMode::Flight.to_string(), "Flight");
    }
}
