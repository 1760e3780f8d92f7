mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, RecommendArgs};
use config::Config;
use datasources::NominatimClient;
use db::Database;
use logic::{BatchReport, ForecastEngine, GeoCache, GeoResolver, RecommendationScorer};
use models::{
    FestivalEntry, PlaceCategory, RecommendRequest, RecommendationReport, WeatherObservation,
};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init = cli.command {
        Config::setup_interactive()?;
        return Ok(());
    }

    let config = Config::load_or_default(cli.config.clone()).context("Configuration error")?;

    let db_path = Config::db_path(cli.data_dir.as_ref())?;
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open store at {}", db_path.display()))?;

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Forecast => {
            let engine = ForecastEngine::new(&db, config.forecast.clone());
            let report = engine.run_batch(today)?;
            print_batch(&report);
        }
        Commands::Recommend(args) => {
            let cache_path = config.geo_cache_path(cli.data_dir.as_ref())?;
            let mut resolver = build_resolver(&config, &cache_path)?;
            let mut scorer = RecommendationScorer::new(
                &db,
                &mut resolver,
                config.recommend.clone(),
                config.forecast.horizon_days,
            );
            let report = scorer.recommend(&request_from(&args), today)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Show { place } => {
            print_forecast(&db, &place)?;
        }
        Commands::Import { category, file } => {
            let count = import_observations(&db, category, &file)?;
            println!("Imported {} {} observations", count, category);
        }
        Commands::AddFestival { name, date, places } => {
            let festival = FestivalEntry::new(name, date, places);
            db.insert_festival(&festival)?;
            println!("Added {} on {}", festival.festival_name, festival.festival_date);
        }
        Commands::Check => {
            let cache_path = config.geo_cache_path(cli.data_dir.as_ref())?;
            let resolver = build_resolver(&config, &cache_path)?;
            run_check(&db, &resolver, &cache_path)?;
        }
        Commands::Init => {}
    }

    db.close()?;
    Ok(())
}

fn build_resolver(config: &Config, cache_path: &Path) -> Result<GeoResolver> {
    let client = NominatimClient::new(config.geocoding.clone())?;
    Ok(GeoResolver::new(
        Box::new(client),
        GeoCache::load(cache_path),
        Duration::from_millis(config.geocoding.request_delay_ms),
    ))
}

fn request_from(args: &RecommendArgs) -> RecommendRequest {
    let mut request = RecommendRequest::new(args.start, args.end).travel_type(args.travel_type);
    if let Some(origin) = &args.origin {
        request = request.from_origin(origin.clone(), args.transport);
    }
    if let Some(km) = args.max_distance {
        request = request.max_distance_km(km);
    }
    request
}

fn print_batch(report: &BatchReport) {
    println!("Purged {} past predictions", report.purged);
    for (label, category) in [
        ("Cities", &report.cities),
        ("Tourist places", &report.tourist_places),
    ] {
        println!(
            "{:<15} forecasted {:>4}  skipped {:>4}  failed {:>4}",
            label,
            category.forecasted,
            category.skipped,
            category.failed.len()
        );
        for place in &category.failed {
            println!("  failed: {}", place);
        }
    }
}

fn print_report(report: &RecommendationReport) {
    println!("{}", report.source_note());
    println!();

    if report.is_empty() {
        println!("No weather data for these dates.");
        return;
    }

    println!(
        "{:<4} {:<24} {:>9} {:>12} {:>7} {:<18} {:>6} {:>6}  {:<24} {}",
        "#", "Place", "Km", "Travel", "Temp", "Condition", "Rain", "Score", "Festivals", "Why"
    );
    for (i, place) in report.places.iter().enumerate() {
        let distance = place
            .distance_km
            .map(|d| format!("{:.1}", d))
            .unwrap_or_else(|| "—".to_string());
        let rain = place
            .avg_rain
            .map(|r| format!("{:.3}", r))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<4} {:<24} {:>9} {:>12} {:>7.1} {:<18} {:>6} {:>6.2}  {:<24} {}",
            i + 1,
            place.place,
            distance,
            place.travel_time,
            place.avg_temp,
            place.condition,
            rain,
            place.score,
            place.festival_label(),
            place.why()
        );
    }
}

fn import_observations(db: &Database, category: PlaceCategory, file: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let rows: Vec<WeatherObservation> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of daily observations", file.display()))?;
    Ok(db.replace_observations(category, &rows)?)
}

fn print_forecast(db: &Database, place: &str) -> Result<()> {
    let predictions = db.predictions_for_place(place)?;
    if predictions.is_empty() {
        println!("No stored forecast for {}", place);
        return Ok(());
    }

    println!(
        "{:<12} {:>5} {:>7} {:>6}  {:<8} {}",
        "Date", "Day", "Temp", "Rain", "Cond", "Description"
    );
    for p in &predictions {
        println!(
            "{:<12} {:>5} {:>7.2} {:>6.3}  {:<8} {}",
            p.predicted_date.to_string(),
            format!("+{}", p.days_ahead()),
            p.pred_temp,
            p.pred_rain_prob,
            p.condition.as_str(),
            p.condition.description()
        );
    }
    Ok(())
}

fn run_check(db: &Database, resolver: &GeoResolver, cache_path: &Path) -> Result<()> {
    println!("Store: {}", db.path().display());
    for (table, count) in db.table_counts()? {
        println!("  {:<22} {:>8} rows", table, count);
    }

    println!("Geocode cache: {}", cache_path.display());
    let cache = resolver.cache();
    if cache.is_empty() {
        println!("  no places resolved yet");
    } else {
        println!("  {:<22} {:>8} places", "entries", cache.len());
    }
    Ok(())
}
