use crate::models::{PlaceCategory, TransportMode, TravelType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tripcast",
    version,
    about = "Weather-aware travel destination recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the data directory (SQLite store and geocode cache)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Purge past predictions and forecast every place
    Forecast,
    /// Rank destinations for a travel window
    Recommend(RecommendArgs),
    /// Show the stored forecast for a place
    Show {
        /// Place name as stored, e.g. "Goa,IN"
        place: String,
    },
    /// Load daily observations from a JSON array, replacing same-day rows
    Import {
        #[arg(long, value_enum)]
        category: PlaceCategory,
        file: PathBuf,
    },
    /// Record a festival and the places it recommends
    AddFestival {
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: NaiveDate,
        /// Comma-separated place names
        #[arg(long)]
        places: String,
    },
    /// Validate config and report store contents
    Check,
    /// Re-run interactive setup
    Init,
}

#[derive(clap::Args)]
pub struct RecommendArgs {
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    #[arg(long, value_enum, default_value_t = TravelType::Solo)]
    pub travel_type: TravelType,

    /// Starting place, e.g. "Mumbai"; enables distance scoring
    #[arg(long)]
    pub origin: Option<String>,

    #[arg(long, value_enum, default_value_t = TransportMode::Car)]
    pub transport: TransportMode,

    /// Drop places further than this from the origin (km)
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recommend_flags() {
        let cli = Cli::try_parse_from([
            "tripcast",
            "-vv",
            "recommend",
            "--start",
            "2025-12-20",
            "--end",
            "2025-12-27",
            "--travel-type",
            "honeymoon",
            "--origin",
            "Mumbai",
            "--transport",
            "flight",
            "--max-distance",
            "1500",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2025, 12, 20).unwrap());
        assert_eq!(args.travel_type, TravelType::Honeymoon);
        assert_eq!(args.transport, TransportMode::Flight);
        assert_eq!(args.origin.as_deref(), Some("Mumbai"));
        assert_eq!(args.max_distance, Some(1500.0));
        assert!(!args.json);
    }

    #[test]
    fn recommend_defaults() {
        let cli = Cli::try_parse_from([
            "tripcast",
            "recommend",
            "--start",
            "2025-12-20",
            "--end",
            "2025-12-20",
        ])
        .unwrap();
        let Commands::Recommend(args) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(args.travel_type, TravelType::Solo);
        assert_eq!(args.transport, TransportMode::Car);
        assert!(args.origin.is_none());
    }

    #[test]
    fn parses_import() {
        let cli = Cli::try_parse_from([
            "tripcast",
            "import",
            "--category",
            "tourist-place",
            "days.json",
        ])
        .unwrap();
        let Commands::Import { category, file } = cli.command else {
            panic!("expected import");
        };
        assert_eq!(category, PlaceCategory::TouristPlace);
        assert_eq!(file, PathBuf::from("days.json"));
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from([
            "tripcast",
            "recommend",
            "--start",
            "20/12/2025",
            "--end",
            "2025-12-20",
        ])
        .is_err());
    }
}
