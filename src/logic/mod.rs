pub mod calculations;
pub mod forecast;
pub mod geo_cache;
pub mod geo_resolver;
pub mod recommend;

pub use forecast::{BatchReport, ForecastEngine};
pub use geo_cache::GeoCache;
pub use geo_resolver::GeoResolver;
pub use recommend::RecommendationScorer;
