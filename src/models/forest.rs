//! Random forest regressor.
//!
//! Averages bootstrap-sampled regression trees. Tree `i` draws its sample and
//! its feature order from generators seeded with `seed + i`, so a fixed seed
//! reproduces the whole ensemble.

use super::traits::{check_query_row, check_training_set, Regressor};
use super::tree::{DecisionTreeRegressor, TreeConfig};
use crate::error::{ForecastError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Random forest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (all if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestConfig {
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    fn tree_config(&self, index: usize) -> TreeConfig {
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: self.max_features,
            seed: self.seed.wrapping_add(index as u64),
        }
    }
}

/// Bagged ensemble of regression trees.
#[derive(Debug, Clone, Default)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    trees: Vec<DecisionTreeRegressor>,
    n_features: usize,
    importances: Vec<f64>,
}

impl RandomForestRegressor {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
            importances: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn sample_indices(&self, n: usize, index: usize) -> Vec<usize> {
        if !self.config.bootstrap {
            return (0..n).collect();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(index as u64));
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        let width = check_training_set(self.name(), features, targets)?;
        if self.config.n_trees == 0 {
            return Err(ForecastError::model_fit(self.name(), "forest needs at least one tree"));
        }

        let n = features.len();
        let mut trees = Vec::with_capacity(self.config.n_trees);
        let mut importances = vec![0.0; width];

        for i in 0..self.config.n_trees {
            let mut tree = DecisionTreeRegressor::new(self.config.tree_config(i));
            tree.fit_indices(features, targets, self.sample_indices(n, i));

            let raw = tree.raw_importances();
            let total: f64 = raw.iter().sum();
            if total > 0.0 {
                for (acc, &imp) in importances.iter_mut().zip(raw) {
                    *acc += imp / total;
                }
            }
            trees.push(tree);
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        self.trees = trees;
        self.n_features = width;
        self.importances = importances;
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(ForecastError::FitRequired);
        }
        check_query_row(self.n_features, row)?;

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_row(row)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        if self.trees.is_empty() {
            None
        } else {
            Some(&self.importances)
        }
    }

    fn name(&self) -> &str {
        "RandomForest"
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn linear_data(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
        let features: Vec<Vec<f64>> = (0..n)
            .map(|i| vec![i as f64, ((i * 5) % 7) as f64])
            .collect();
        let targets: Vec<f64> = (0..n).map(|i| 20.0 + 2.0 * i as f64).collect();
        (features, targets)
    }

    #[test]
    fn fits_and_predicts_within_target_range() {
        let (x, y) = linear_data(30);
        let mut forest = RandomForestRegressor::new(ForestConfig::default().with_trees(25));
        forest.fit(&x, &y).unwrap();

        assert_eq!(forest.n_trees(), 25);
        for row in &x {
            let pred = forest.predict_row(row).unwrap();
            assert!((20.0..=78.0).contains(&pred));
        }
        // Extrapolation is bounded by the training targets
        let far = forest.predict_row(&[1000.0, 3.0]).unwrap();
        assert!(far <= 78.0 + 1e-9);
    }

    #[test]
    fn same_seed_is_deterministic() {
        let (x, y) = linear_data(20);
        let mut a = RandomForestRegressor::new(ForestConfig::default().with_trees(10));
        let mut b = RandomForestRegressor::new(ForestConfig::default().with_trees(10));
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        let query = [7.5, 2.0];
        assert_eq!(a.predict_row(&query).unwrap(), b.predict_row(&query).unwrap());
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn different_seeds_differ() {
        let (x, y) = linear_data(20);
        let mut a = RandomForestRegressor::new(ForestConfig::default().with_trees(10));
        let mut b =
            RandomForestRegressor::new(ForestConfig::default().with_trees(10).with_seed(7));
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();

        let preds_a = a.predict(&x).unwrap();
        let preds_b = b.predict(&x).unwrap();
        assert_ne!(preds_a, preds_b);
    }

    #[test]
    fn without_bootstrap_trees_memorize() {
        let (x, y) = linear_data(12);
        let mut forest =
            RandomForestRegressor::new(ForestConfig::default().with_trees(3).with_bootstrap(false));
        forest.fit(&x, &y).unwrap();
        for (row, target) in x.iter().zip(&y) {
            assert_relative_eq!(forest.predict_row(row).unwrap(), *target, epsilon = 1e-9);
        }
    }

    #[test]
    fn importances_sum_to_one() {
        let (x, y) = linear_data(30);
        let mut forest = RandomForestRegressor::new(ForestConfig::default().with_trees(10));
        forest.fit(&x, &y).unwrap();

        let imp = forest.feature_importances().unwrap();
        assert_eq!(imp.len(), 2);
        assert_relative_eq!(imp.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(imp[0] > imp[1]);
    }

    #[test]
    fn fit_errors_are_model_fit() {
        let mut forest = RandomForestRegressor::default();
        let err = forest.fit(&[], &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ModelFit);

        let mut empty = RandomForestRegressor::new(ForestConfig::default().with_trees(0));
        let (x, y) = linear_data(5);
        assert_eq!(empty.fit(&x, &y).unwrap_err().kind(), ErrorKind::ModelFit);
    }

    #[test]
    fn predict_before_fit_fails() {
        let forest = RandomForestRegressor::default();
        assert_eq!(forest.predict_row(&[1.0]), Err(ForecastError::FitRequired));
        assert!(forest.feature_importances().is_none());
    }
}
