use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

/// One CSV row before imputation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    /// `None` = missing cell
    pub features: [Option<f64>; FEATURE_COUNT],
    /// 0 = no diabetes, 1 = diabetes
    pub outcome: u8,
}

impl DatasetRecord {
    pub fn complete(features: [f64; FEATURE_COUNT], outcome: u8) -> Self {
        Self {
            features: features.map(Some),
            outcome,
        }
    }
}

/// Fully numeric dataset: one row per subject, columns in layout order
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Array1<u8>,
}

impl Dataset {
    pub fn new(features: Array2<f64>, labels: Array1<u8>) -> Self {
        debug_assert_eq!(features.nrows(), labels.len());
        Self { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.features.row(index)
    }

    /// [negatives, positives]
    pub fn class_counts(&self) -> [usize; 2] {
        let positives = self.labels.iter().filter(|&&y| y == 1).count();
        [self.len() - positives, positives]
    }

    /// Rows at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), indices),
            labels: self.labels.select(Axis(0), indices),
        }
    }
}
