//! Decision Tree - Weighted CART classifier (binary, Gini)
//!
//! Building block của forest. Nodes live in a flat Vec, root at index 0.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Minimum impurity decrease for a split to be kept
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Weighted fraction of class 1 among the samples that reached the leaf
    Leaf { proba: f64 },
    /// `x[feature] <= threshold` goes left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Candidate features drawn per split
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

/// Fitted tree plus its unnormalised impurity decrease per feature
pub struct FittedTree {
    pub tree: DecisionTree,
    pub importances: Vec<f64>,
}

// ============================================================================
// PREDICTION
// ============================================================================

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Class-1 probability for one row
    pub fn predict_proba(&self, x: ArrayView1<'_, f64>) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { proba } => return *proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

// ============================================================================
// FITTING
// ============================================================================

/// Grow one tree on `samples` (row indices, duplicates allowed)
///
/// `weights[i]` is the weight of row `i` each time it appears.
pub fn fit_tree(
    x: &Array2<f64>,
    y: &[u8],
    weights: &[f64],
    samples: &mut [usize],
    params: TreeParams,
    rng: &mut StdRng,
) -> FittedTree {
    let mut builder = TreeBuilder {
        x,
        y,
        weights,
        params,
        rng,
        nodes: Vec::new(),
        importances: vec![0.0; x.ncols()],
    };
    builder.build(samples, 0);

    FittedTree {
        tree: DecisionTree {
            nodes: builder.nodes,
        },
        importances: builder.importances,
    }
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Weighted child impurity (w_left * gini_left + w_right * gini_right)
    child_impurity: f64,
}

struct TreeBuilder<'a> {
    x: &'a Array2<f64>,
    y: &'a [u8],
    weights: &'a [f64],
    params: TreeParams,
    rng: &'a mut StdRng,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl TreeBuilder<'_> {
    fn class_weights(&self, samples: &[usize]) -> [f64; 2] {
        let mut totals = [0.0f64; 2];
        for &i in samples {
            totals[self.y[i] as usize] += self.weights[i];
        }
        totals
    }

    fn build(&mut self, samples: &mut [usize], depth: usize) -> usize {
        let totals = self.class_weights(samples);
        let total = totals[0] + totals[1];
        let proba = if total > 0.0 { totals[1] / total } else { 0.0 };

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { proba });

        let pure = totals[0] == 0.0 || totals[1] == 0.0;
        if depth >= self.params.max_depth || samples.len() < self.params.min_samples_split || pure {
            return id;
        }

        let parent_impurity = total * gini(totals);
        let best = match self.find_split(samples) {
            Some(best) if parent_impurity - best.child_impurity > MIN_IMPURITY_DECREASE => best,
            _ => return id,
        };

        self.importances[best.feature] += parent_impurity - best.child_impurity;

        let f = best.feature;
        let x = self.x;
        samples.sort_by(|&a, &b| x[[a, f]].total_cmp(&x[[b, f]]));
        let cut = samples.partition_point(|&i| x[[i, f]] <= best.threshold);
        let (left_samples, right_samples) = samples.split_at_mut(cut);

        let left = self.build(left_samples, depth + 1);
        let right = self.build(right_samples, depth + 1);
        self.nodes[id] = Node::Split {
            feature: f,
            threshold: best.threshold,
            left,
            right,
        };
        id
    }

    fn find_split(&mut self, samples: &mut [usize]) -> Option<BestSplit> {
        let n_features = self.x.ncols();
        let k = self.params.max_features.clamp(1, n_features);
        // Random visiting order; constant features don't count towards `k`
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(&mut *self.rng);

        let totals = self.class_weights(samples);
        let x = self.x;
        let mut best: Option<BestSplit> = None;
        let mut visited = 0;

        for f in order {
            if visited == k {
                break;
            }
            samples.sort_by(|&a, &b| x[[a, f]].total_cmp(&x[[b, f]]));
            let first = x[[samples[0], f]];
            let last = x[[samples[samples.len() - 1], f]];
            if first >= last {
                continue;
            }
            visited += 1;

            let mut left = [0.0f64; 2];
            for pos in 0..samples.len() - 1 {
                let i = samples[pos];
                left[self.y[i] as usize] += self.weights[i];

                let here = x[[i, f]];
                let next = x[[samples[pos + 1], f]];
                if here >= next {
                    continue;
                }

                let right = [totals[0] - left[0], totals[1] - left[1]];
                let w_left = left[0] + left[1];
                let w_right = right[0] + right[1];
                let child_impurity = w_left * gini(left) + w_right * gini(right);

                if best.as_ref().map_or(true, |b| child_impurity < b.child_impurity) {
                    let mut threshold = here + (next - here) / 2.0;
                    // Adjacent floats: midpoint may round up to `next`
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(BestSplit {
                        feature: f,
                        threshold,
                        child_impurity,
                    });
                }
            }
        }

        best
    }
}

/// Gini impurity of a weighted binary class distribution
fn gini(totals: [f64; 2]) -> f64 {
    let total = totals[0] + totals[1];
    if total <= 0.0 {
        return 0.0;
    }
    let p0 = totals[0] / total;
    let p1 = totals[1] / total;
    1.0 - (p0 * p0 + p1 * p1)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;

    fn params(max_depth: usize) -> TreeParams {
        TreeParams {
            max_depth,
            min_samples_split: 2,
            max_features: 1,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini([1.0, 0.0]), 0.0);
        assert!((gini([1.0, 1.0]) - 0.5).abs() < 1e-12);
        assert_eq!(gini([0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_separable_single_feature() {
        let x = array![[1.0], [2.0], [3.0], [10.0], [11.0], [12.0]];
        let y = [0, 0, 0, 1, 1, 1];
        let weights = [1.0; 6];
        let mut samples: Vec<usize> = (0..6).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let fitted = fit_tree(&x, &y, &weights, &mut samples, params(6), &mut rng);

        assert_eq!(fitted.tree.node_count(), 3);
        assert_eq!(fitted.tree.depth(), 1);
        assert_eq!(fitted.tree.predict_proba(array![2.5].view()), 0.0);
        assert_eq!(fitted.tree.predict_proba(array![9.0].view()), 1.0);
        assert!(fitted.importances[0] > 0.0);
    }

    #[test]
    fn test_max_depth_zero_is_single_leaf() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = [0, 1, 1, 1];
        let weights = [1.0; 4];
        let mut samples: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let fitted = fit_tree(&x, &y, &weights, &mut samples, params(0), &mut rng);
        assert_eq!(fitted.tree.node_count(), 1);
        assert!((fitted.tree.predict_proba(array![1.0].view()) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_leaf_proba_uses_weights() {
        let x = array![[1.0], [1.0], [1.0], [1.0]];
        let y = [0, 0, 0, 1];
        // Positive row weighted 3x: 3 / (3 + 3)
        let weights = [1.0, 1.0, 1.0, 3.0];
        let mut samples: Vec<usize> = (0..4).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let fitted = fit_tree(&x, &y, &weights, &mut samples, params(6), &mut rng);
        assert_eq!(fitted.tree.node_count(), 1);
        assert!((fitted.tree.predict_proba(array![1.0].view()) - 0.5).abs() < 1e-12);
    }
}
