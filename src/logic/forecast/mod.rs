pub mod engine;
pub mod features;
pub mod forest;

pub use engine::{BatchReport, ForecastEngine};
