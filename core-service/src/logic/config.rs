//! Trainer Configuration
//!
//! Hyperparameters và đường dẫn cho một lần training.
//! Default values come from `constants.rs`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATASET_PATH, DEFAULT_MAX_DEPTH, DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_MODEL_PATH,
    DEFAULT_N_TREES, DEFAULT_REPORT_PATH, DEFAULT_SEED, DEFAULT_TEST_SIZE,
};

/// How samples are weighted during the fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassWeight {
    /// Every sample counts once
    Uniform,
    /// n_samples / (n_classes * count_c)
    Balanced,
}

/// Forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub class_weight: ClassWeight,
    /// Fit trees on worker threads (result is identical either way)
    pub use_parallelism: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_N_TREES,
            max_depth: DEFAULT_MAX_DEPTH,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            class_weight: ClassWeight::Balanced,
            use_parallelism: true,
        }
    }
}

/// Trainer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    /// JSON report written after the model; `None` skips it
    pub report_path: Option<PathBuf>,
    /// Held-out fraction (0.0 - 1.0)
    pub test_size: f64,
    pub seed: u64,
    pub forest: ForestParams,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            report_path: Some(PathBuf::from(DEFAULT_REPORT_PATH)),
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
            forest: ForestParams::default(),
        }
    }
}

impl TrainerConfig {
    pub fn new(dataset_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            model_path: model_path.into(),
            report_path: None,
            ..Default::default()
        }
    }

    /// Small forest for quick experiments and tests
    pub fn quick(dataset_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            forest: ForestParams {
                n_trees: 25,
                ..Default::default()
            },
            ..Self::new(dataset_path, model_path)
        }
    }

    pub fn with_report(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(report_path.into());
        self
    }

    pub fn single_threaded(mut self) -> Self {
        self.forest.use_parallelism = false;
        self
    }
}
