//! Random Forest - Bagged ensemble of weighted CART trees
//!
//! Output probability = mean of the trees' leaf probabilities.
//! Each tree owns a seed drawn up front from the forest seed, so the fitted
//! forest is the same whether trees are grown on one thread or many.

use std::thread;

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::tree::{fit_tree, DecisionTree, FittedTree, TreeParams};
use crate::logic::config::{ClassWeight, ForestParams};
use crate::logic::dataset::Dataset;
use crate::logic::error::{RiskError, RiskResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    /// Mean decrease in impurity, sums to 1 (all zeros if no tree split)
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Fit on `data` with a fixed seed
    pub fn fit(data: &Dataset, params: &ForestParams, seed: u64) -> RiskResult<Self> {
        validate_params(params)?;

        if data.is_empty() {
            return Err(RiskError::ModelFit("training set is empty".to_string()));
        }
        let counts = data.class_counts();
        if counts[0] == 0 || counts[1] == 0 {
            return Err(RiskError::ModelFit(format!(
                "training set needs both outcomes, got {} negative / {} positive",
                counts[0], counts[1]
            )));
        }

        let n = data.len();
        let n_features = data.features.ncols();
        let y: Vec<u8> = data.labels.to_vec();
        let class_weight = class_weights(params.class_weight, counts, n);
        let weights: Vec<f64> = y.iter().map(|&c| class_weight[c as usize]).collect();

        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let mut seeder = StdRng::seed_from_u64(seed);
        let tree_seeds: Vec<u64> = (0..params.n_trees).map(|_| seeder.gen()).collect();

        let job = TreeJob {
            x: &data.features,
            y: &y,
            weights: &weights,
            params: tree_params,
        };

        let workers = if params.use_parallelism {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(params.n_trees)
        } else {
            1
        };

        log::debug!(
            "Fitting {} trees on {} rows with {} worker(s), class weights {:?}",
            params.n_trees,
            n,
            workers,
            class_weight
        );

        let fitted = if workers <= 1 {
            tree_seeds.iter().map(|&s| job.grow(s)).collect::<Vec<_>>()
        } else {
            grow_parallel(&job, &tree_seeds, workers)?
        };

        let feature_importances = aggregate_importances(&fitted, n_features);
        let trees = fitted.into_iter().map(|f| f.tree).collect();

        Ok(Self {
            trees,
            n_features,
            feature_importances,
        })
    }

    /// Class-1 probability in [0, 1]
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(x)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    /// Predicted class; ties go to class 0
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> u8 {
        u8::from(self.predict_proba(x) > 0.5)
    }

    pub fn predict_batch(&self, features: &Array2<f64>) -> Vec<u8> {
        features.rows().into_iter().map(|row| self.predict(row)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn validate_params(params: &ForestParams) -> RiskResult<()> {
    if params.n_trees == 0 {
        return Err(RiskError::ModelFit("forest needs at least one tree".to_string()));
    }
    if params.min_samples_split < 2 {
        return Err(RiskError::ModelFit(format!(
            "min_samples_split must be >= 2, got {}",
            params.min_samples_split
        )));
    }
    Ok(())
}

/// Per-class sample weight
pub fn class_weights(mode: ClassWeight, counts: [usize; 2], n: usize) -> [f64; 2] {
    match mode {
        ClassWeight::Uniform => [1.0, 1.0],
        ClassWeight::Balanced => [
            n as f64 / (2.0 * counts[0] as f64),
            n as f64 / (2.0 * counts[1] as f64),
        ],
    }
}

struct TreeJob<'a> {
    x: &'a Array2<f64>,
    y: &'a [u8],
    weights: &'a [f64],
    params: TreeParams,
}

impl TreeJob<'_> {
    /// Bootstrap sample + tree fit from one seed
    fn grow(&self, seed: u64) -> FittedTree {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = self.y.len();
        let mut samples: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        fit_tree(self.x, self.y, self.weights, &mut samples, self.params, &mut rng)
    }
}

fn grow_parallel(job: &TreeJob<'_>, seeds: &[u64], workers: usize) -> RiskResult<Vec<FittedTree>> {
    let chunk_size = seeds.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || chunk.iter().map(|&s| job.grow(s)).collect::<Vec<_>>()))
            .collect();

        let mut fitted = Vec::with_capacity(seeds.len());
        for handle in handles {
            let part = handle
                .join()
                .map_err(|_| RiskError::ModelFit("tree worker thread panicked".to_string()))?;
            fitted.extend(part);
        }
        Ok(fitted)
    })
}

/// Normalise each tree's impurity decrease, average over trees that split,
/// then normalise the mean.
fn aggregate_importances(fitted: &[FittedTree], n_features: usize) -> Vec<f64> {
    let mut mean = vec![0.0f64; n_features];
    let mut used = 0usize;

    for f in fitted {
        let total: f64 = f.importances.iter().sum();
        if f.tree.node_count() <= 1 || total <= 0.0 {
            continue;
        }
        for (m, v) in mean.iter_mut().zip(&f.importances) {
            *m += v / total;
        }
        used += 1;
    }

    if used == 0 {
        return mean;
    }
    let sum: f64 = mean.iter().sum();
    if sum > 0.0 {
        mean.iter_mut().for_each(|m| *m /= sum);
    }
    mean
}

// ============================================================================
// TESTS
// ============================================================================
