//! CART regression tree.
//!
//! Splits minimize the summed squared error of the two children. Candidate
//! features are visited in a seeded random order, so ties between equally
//! good splits are broken reproducibly.

use super::traits::{check_query_row, check_training_set, Regressor};
use crate::error::{ForecastError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Regression tree configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree
    pub max_depth: usize,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Maximum features to consider for split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

impl TreeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Regression tree fitted by recursive binary splitting.
#[derive(Debug, Clone)]
pub struct DecisionTreeRegressor {
    config: TreeConfig,
    root: Option<Node>,
    n_features: usize,
    importances: Vec<f64>,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new(TreeConfig::default())
    }
}

impl DecisionTreeRegressor {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_features: 0,
            importances: Vec::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Depth of the fitted tree (a single leaf has depth 1).
    pub fn depth(&self) -> Option<usize> {
        self.root.as_ref().map(Node::depth)
    }

    pub fn n_leaves(&self) -> Option<usize> {
        self.root.as_ref().map(Node::n_leaves)
    }

    /// Unnormalized squared-error reduction per feature.
    pub(crate) fn raw_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Fit on the rows selected by `indices` (repeats allowed).
    ///
    /// The caller must have validated the training set.
    pub(crate) fn fit_indices(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: Vec<usize>,
    ) {
        self.n_features = features.first().map(|r| r.len()).unwrap_or(0);
        self.importances = vec![0.0; self.n_features];
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let root = self.build(features, targets, indices, 0, &mut rng);
        self.root = Some(root);
    }

    fn build(
        &mut self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> Node {
        let n = indices.len();
        let (sum, sum_sq) = indices.iter().fold((0.0, 0.0), |(s, sq), &i| {
            (s + targets[i], sq + targets[i] * targets[i])
        });
        let value = sum / n as f64;
        let sse = sum_sq - sum * sum / n as f64;

        if depth >= self.config.max_depth
            || n < self.config.min_samples_split.max(2)
            || sse <= 1e-12
        {
            return Node::Leaf { value };
        }

        let Some(best) = self.find_best_split(features, targets, &indices, sse, rng) else {
            return Node::Leaf { value };
        };

        self.importances[best.feature] += best.gain;

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| features[i][best.feature] <= best.threshold);

        let left = self.build(features, targets, left_idx, depth + 1, rng);
        let right = self.build(features, targets, right_idx, depth + 1, rng);

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn find_best_split(
        &self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        parent_sse: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let max_features = self
            .config
            .max_features
            .unwrap_or(self.n_features)
            .clamp(1, self.n_features);

        let mut candidates: Vec<usize> = (0..self.n_features).collect();
        candidates.shuffle(rng);
        candidates.truncate(max_features);

        let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
        let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

        let mut best: Option<BestSplit> = None;
        let mut sorted = indices.to_vec();

        for feature in candidates {
            sorted.sort_by(|&a, &b| features[a][feature].total_cmp(&features[b][feature]));

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            for k in 0..n - 1 {
                let y = targets[sorted[k]];
                left_sum += y;
                left_sq += y * y;

                let left_n = k + 1;
                let right_n = n - left_n;
                if left_n < min_leaf || right_n < min_leaf {
                    continue;
                }

                let here = features[sorted[k]][feature];
                let next = features[sorted[k + 1]][feature];
                if next <= here {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;
                let child_sse = (left_sq - left_sum * left_sum / left_n as f64)
                    + (right_sq - right_sum * right_sum / right_n as f64);
                let gain = parent_sse - child_sse;

                if gain > 1e-12 && best.as_ref().map_or(true, |b| gain > b.gain) {
                    let mut threshold = here + (next - here) / 2.0;
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(BestSplit {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }
}

impl Regressor for DecisionTreeRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        check_training_set(self.name(), features, targets)?;
        self.fit_indices(features, targets, (0..features.len()).collect());

        let total: f64 = self.importances.iter().sum();
        if total > 0.0 {
            for imp in &mut self.importances {
                *imp /= total;
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64> {
        let mut node = self.root.as_ref().ok_or(ForecastError::FitRequired)?;
        check_query_row(self.n_features, row)?;

        loop {
            match node {
                Node::Leaf { value } => return Ok(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.root.as_ref().map(|_| self.importances.as_slice())
    }

    fn name(&self) -> &str {
        "DecisionTree"
    }

    fn is_fitted(&self) -> bool {
        self.root.is_some()
    }
}
