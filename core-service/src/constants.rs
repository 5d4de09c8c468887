//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change where the dataset or model live, only edit this file.

/// Labeled dataset (CSV with header), relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/diabetes.csv";

/// Serialized model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/diabetes_model.bin";

/// Training report written next to the artifact
pub const DEFAULT_REPORT_PATH: &str = "models/training_report.json";

/// Name of the label column in the dataset
pub const OUTCOME_COLUMN: &str = "Outcome";

// ============================================
// Training defaults
// ============================================

/// Fixed seed for split and forest
pub const DEFAULT_SEED: u64 = 42;

/// Fraction of rows held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Number of trees in the forest
pub const DEFAULT_N_TREES: usize = 150;

/// Maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Minimum samples required to split a node
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 5;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Diabetes Risk";
