//! Logic Module - Business Logic & Engines
//!
//! Chứa pipeline train/predict: Features, Dataset, Model, Training,
//! Evaluation, Risk.
//!
//! ## Architecture
//! - `features/` - Feature layout & vector (8 clinical measurements)
//! - `dataset/` - CSV loading, median imputation, stratified split
//! - `model/` - Random forest, artifact storage, inference service
//! - `training/` - End-to-end training pipeline
//! - `evaluation/` - Classification metrics
//! - `risk/` - Probability → risk category

pub mod config;
pub mod error;

pub mod features;
pub mod dataset;
pub mod model;
pub mod evaluation;
pub mod training;
pub mod risk;

pub use error::{RiskError, RiskResult};
