//! Evaluation Module
//!
//! Metrics trên test set. Reported only; nothing here gates training.

pub mod metrics;

pub use metrics::{
    classification_report, ClassMetrics, ClassificationReport, ConfusionMatrix, CLASS_NAMES,
};
