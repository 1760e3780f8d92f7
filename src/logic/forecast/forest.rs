//! Random-forest models behind the per-place forecast, backed by smartcore.
//!
//! Both models are regression forests. The rain model is fit on 0/1 rain
//! flags, so its averaged leaf values read directly as a rain probability.

use crate::error::{Result, TripCastError};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::error::Failed;
use smartcore::linalg::basic::matrix::DenseMatrix;

type Regressor = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// How many candidate features each split looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxFeatures {
    All,
    Sqrt,
}

impl MaxFeatures {
    fn count(&self, n_features: usize) -> usize {
        match self {
            MaxFeatures::All => n_features,
            MaxFeatures::Sqrt => ((n_features as f64).sqrt() as usize).max(1),
        }
    }
}

fn model_error(e: Failed) -> TripCastError {
    TripCastError::Model(e.to_string())
}

fn check_shape(x: &[Vec<f64>], y: &[f64], n_trees: usize) -> Result<usize> {
    if x.is_empty() {
        return Err(TripCastError::Model("no training rows".into()));
    }
    if x.len() != y.len() {
        return Err(TripCastError::Model(format!(
            "{} feature rows but {} targets",
            x.len(),
            y.len()
        )));
    }
    let width = x[0].len();
    if width == 0 || x.iter().any(|row| row.len() != width) {
        return Err(TripCastError::Model("inconsistent feature width".into()));
    }
    if n_trees == 0 {
        return Err(TripCastError::Model("forest needs at least one tree".into()));
    }
    Ok(width)
}

/// A seeded bagged-tree regressor over fixed-width feature rows
pub struct Forest {
    model: Regressor,
    width: usize,
}

impl Forest {
    pub fn fit(
        x: &[Vec<f64>],
        y: &[f64],
        n_trees: usize,
        max_features: MaxFeatures,
        seed: u64,
    ) -> Result<Self> {
        let width = check_shape(x, y, n_trees)?;
        let matrix = DenseMatrix::from_2d_vec(&x.to_vec()).map_err(model_error)?;
        let params = RandomForestRegressorParameters::default()
            .with_n_trees(n_trees)
            .with_m(max_features.count(width))
            .with_seed(seed);

        let model = Regressor::fit(&matrix, &y.to_vec(), params).map_err(model_error)?;
        Ok(Self { model, width })
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.width {
            return Err(TripCastError::Model(format!(
                "expected {} features, got {}",
                self.width,
                row.len()
            )));
        }
        let matrix = DenseMatrix::from_2d_vec(&vec![row.to_vec()]).map_err(model_error)?;
        let predicted = self.model.predict(&matrix).map_err(model_error)?;
        predicted
            .first()
            .copied()
            .ok_or_else(|| TripCastError::Model("empty prediction".into()))
    }
}

/// Same-day temperature; every split considers all features
pub struct TemperatureModel {
    forest: Forest,
}

impl TemperatureModel {
    pub fn fit(x: &[Vec<f64>], temps: &[f64], n_trees: usize, seed: u64) -> Result<Self> {
        Ok(Self {
            forest: Forest::fit(x, temps, n_trees, MaxFeatures::All, seed)?,
        })
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64> {
        self.forest.predict(row)
    }
}

/// Rain probability; splits consider √features candidates
pub struct RainModel {
    forest: Forest,
}

impl RainModel {
    pub fn fit(x: &[Vec<f64>], rained: &[bool], n_trees: usize, seed: u64) -> Result<Self> {
        let flags: Vec<f64> = rained.iter().map(|&r| if r { 1.0 } else { 0.0 }).collect();
        Ok(Self {
            forest: Forest::fit(x, &flags, n_trees, MaxFeatures::Sqrt, seed)?,
        })
    }

    pub fn probability(&self, row: &[f64]) -> Result<f64> {
        Ok(self.forest.predict(row)?.clamp(0.0, 1.0))
    }
}
