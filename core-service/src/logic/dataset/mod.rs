//! Dataset Module - Labeled Training Data
//!
//! Loads the diabetes CSV, fills missing values with column medians
//! and partitions rows into stratified train/test sets.

pub mod record;
pub mod loader;
pub mod split;

#[cfg(test)]
mod tests;

pub use loader::{impute_median, load_csv, load_records, ImputationSummary};
pub use record::{Dataset, DatasetRecord};
pub use split::{stratified_split, TrainTestSplit};
