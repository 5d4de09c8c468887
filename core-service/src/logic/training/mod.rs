//! Training Module
//!
//! Pipeline: load → impute → split → fit → evaluate → persist.
//!
//! ## Structure
//! - `trainer`: Trainer (runs the pipeline, prints progress)
//! - `report`: TrainingReport (metrics + importances, saved as JSON)

pub mod trainer;
pub mod report;


pub use report::{FeatureImportance, TrainingReport};
pub use trainer::{train, Trainer};
