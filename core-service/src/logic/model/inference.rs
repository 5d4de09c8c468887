//! Inference Service - Loaded model façade
//!
//! Artifact được load đúng một lần rồi dùng lại cho mọi request.
//! The service is an ordinary value: construct it at startup and pass it
//! (or an `Arc` of it) to whatever serves predictions.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::artifact::{load_artifact, ModelArtifact};
use crate::logic::error::RiskResult;
use crate::logic::features::{FeatureVector, FEATURE_LAYOUT};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Status snapshot for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub trained_at: DateTime<Utc>,
    pub loaded_at: DateTime<Utc>,
    pub n_trees: usize,
    pub seed: u64,
    pub train_rows: usize,
    pub test_accuracy: f64,
    /// (feature, importance), most important first
    pub top_features: Vec<(String, f64)>,
}

// ============================================================================
// MODEL TRAIT
// ============================================================================

/// Anything that maps a feature vector to a class-1 probability
pub trait RiskModel {
    fn predict_proba(&self, features: &FeatureVector) -> f64;
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone)]
pub struct InferenceService {
    artifact: ModelArtifact,
    model_path: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl InferenceService {
    /// Load the artifact from disk (the only deserialization)
    pub fn load(path: &Path) -> RiskResult<Self> {
        log::info!("Loading model from: {}", path.display());
        let artifact = load_artifact(path)?;
        log::info!(
            "Model loaded: {} trees, trained {}, test accuracy {:.3}",
            artifact.forest.n_trees(),
            artifact.trained_at.format("%Y-%m-%d %H:%M:%S"),
            artifact.test_accuracy
        );
        Ok(Self::from_artifact(artifact, path))
    }

    /// Wrap an in-memory artifact
    pub fn from_artifact(artifact: ModelArtifact, path: impl Into<PathBuf>) -> Self {
        Self {
            artifact,
            model_path: path.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Class-1 probability for a validated vector
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        let row = ndarray::ArrayView1::from(features.as_slice());
        self.artifact.forest.predict_proba(row)
    }

    /// Parse raw fields, then predict. A bad field fails only this call.
    pub fn predict_fields<S: AsRef<str>>(&self, fields: &[S]) -> RiskResult<f64> {
        let features = FeatureVector::parse_fields(fields)?;
        Ok(self.predict_proba(&features))
    }

    pub fn info(&self) -> ModelInfo {
        let mut top_features: Vec<(String, f64)> = FEATURE_LAYOUT
            .iter()
            .zip(self.artifact.forest.feature_importances())
            .map(|(name, &v)| (name.to_string(), v))
            .collect();
        top_features.sort_by(|a, b| b.1.total_cmp(&a.1));

        ModelInfo {
            model_path: self.model_path.display().to_string(),
            trained_at: self.artifact.trained_at,
            loaded_at: self.loaded_at,
            n_trees: self.artifact.forest.n_trees(),
            seed: self.artifact.seed,
            train_rows: self.artifact.train_rows,
            test_accuracy: self.artifact.test_accuracy,
            top_features,
        }
    }
}

impl RiskModel for InferenceService {
    fn predict_proba(&self, features: &FeatureVector) -> f64 {
        InferenceService::predict_proba(self, features)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::ForestParams;
    use crate::logic::dataset::Dataset;
    use crate::logic::features::FEATURE_COUNT;
    use crate::logic::model::forest::RandomForest;
    use crate::logic::model::save_artifact;
    use ndarray::{Array1, Array2};
    use tempfile::tempdir;

    /// Glucose decides the outcome
    fn service() -> InferenceService {
        let features = Array2::from_shape_fn((20, FEATURE_COUNT), |(i, j)| {
            if j == 1 {
                if i < 10 { 80.0 + i as f64 } else { 180.0 + i as f64 }
            } else {
                1.0
            }
        });
        let labels: Array1<u8> = (0..20).map(|i| u8::from(i >= 10)).collect();
        let params = ForestParams {
            n_trees: 15,
            use_parallelism: false,
            ..Default::default()
        };
        let forest = RandomForest::fit(&Dataset::new(features, labels), &params, 42).unwrap();
        InferenceService::from_artifact(ModelArtifact::new(forest, &params, 42, 20, 1.0), "memory")
    }

    fn fields(glucose: &str) -> [String; FEATURE_COUNT] {
        ["1", glucose, "1", "1", "1", "1", "1", "1"].map(String::from)
    }

    #[test]
    fn test_probability_in_range() {
        let svc = service();
        let low = svc.predict_fields(&fields("85")).unwrap();
        let high = svc.predict_fields(&fields("195")).unwrap();
        assert!((0.0..=1.0).contains(&low));
        assert!((0.0..=1.0).contains(&high));
        assert!(low < 0.5 && high > 0.5);
    }

    #[test]
    fn test_validation_error_leaves_service_usable() {
        let svc = service();
        let before = svc.predict_fields(&fields("195")).unwrap();

        let err = svc.predict_fields(&fields("abc")).unwrap_err();
        assert!(err.is_validation());

        let after = svc.predict_fields(&fields("195")).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_round_trip_same_probabilities() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let svc = service();
        save_artifact(&svc.artifact, &path).unwrap();

        let reloaded = InferenceService::load(&path).unwrap();
        for g in ["60", "120", "150", "200"] {
            let a = svc.predict_fields(&fields(g)).unwrap();
            let b = reloaded.predict_fields(&fields(g)).unwrap();
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_load_missing_fails_fast() {
        let dir = tempdir().unwrap();
        let err = InferenceService::load(&dir.path().join("missing.bin")).unwrap_err();
        assert!(err.is_data_access());
    }

    #[test]
    fn test_info() {
        let info = service().info();
        assert_eq!(info.n_trees, 15);
        assert_eq!(info.seed, 42);
        assert_eq!(info.top_features[0].0, "Glucose");
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InferenceService>();
    }
}
