//! Training Report
//!
//! Everything a training run measured. Printed to the console and saved as
//! pretty JSON next to the model.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::config::ForestParams;
use crate::logic::dataset::ImputationSummary;
use crate::logic::error::{RiskError, RiskResult};
use crate::logic::evaluation::ClassificationReport;
use crate::logic::features::FEATURE_LAYOUT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub dataset_path: String,
    pub model_path: String,
    pub trained_at: DateTime<Utc>,
    pub rows: usize,
    pub imputation: ImputationSummary,
    pub train_rows: usize,
    pub test_rows: usize,
    /// [negative, positive] in the training partition
    pub train_class_counts: [usize; 2],
    /// [negative, positive] in the test partition
    pub test_class_counts: [usize; 2],
    pub seed: u64,
    pub params: ForestParams,
    pub metrics: ClassificationReport,
    /// Most important first
    pub feature_importances: Vec<FeatureImportance>,
    pub elapsed_secs: f64,
}

impl TrainingReport {
    pub fn accuracy(&self) -> f64 {
        self.metrics.accuracy
    }
}

/// Pair importances with layout names, sorted descending
pub fn ranked_importances(importances: &[f64]) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = FEATURE_LAYOUT
        .iter()
        .zip(importances)
        .map(|(name, &importance)| FeatureImportance {
            feature: name.to_string(),
            importance,
        })
        .collect();
    ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    ranked
}

/// Report written to `<name>.tmp`, waiting for the model to be saved
#[derive(Debug)]
pub struct StagedReport {
    staged: PathBuf,
    target: PathBuf,
}

/// Encode the report and write it beside `path`, leaving `path` untouched.
/// Fails if the report cannot land at `path` at all.
pub fn stage_report(report: &TrainingReport, path: &Path) -> RiskResult<StagedReport> {
    if path.is_dir() {
        return Err(RiskError::data_access(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "report path is a directory"),
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RiskError::data_access(parent, e))?;
    }
    let json = serde_json::to_vec_pretty(report)
        .map_err(|e| RiskError::Artifact(format!("cannot encode training report: {}", e)))?;

    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    let staged = path.with_file_name(name);
    if let Err(e) = fs::write(&staged, json) {
        let _ = fs::remove_file(&staged);
        return Err(RiskError::data_access(&staged, e));
    }
    Ok(StagedReport {
        staged,
        target: path.to_path_buf(),
    })
}

impl StagedReport {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Move the staged file into place
    pub fn commit(self) -> RiskResult<()> {
        fs::rename(&self.staged, &self.target).map_err(|e| {
            let _ = fs::remove_file(&self.staged);
            RiskError::data_access(&self.target, e)
        })
    }

    /// Drop the staged file, leaving any previous report in place
    pub fn discard(self) {
        if let Err(e) = fs::remove_file(&self.staged) {
            log::debug!("Could not remove {}: {}", self.staged.display(), e);
        }
    }
}
