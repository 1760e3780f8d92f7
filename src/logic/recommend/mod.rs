pub mod aggregate;
pub mod engine;
pub mod festivals;
pub mod profiles;
pub mod scoring;

pub use engine::RecommendationScorer;
