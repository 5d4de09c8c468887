//! Model Artifact - Persisted forest + metadata
//!
//! On-disk format: bincode `ArtifactEnvelope { checksum, payload }`, where
//! `payload` is the bincode-encoded `ModelArtifact` and `checksum` its
//! SHA-256 (hex). Writes go to a temp file first, then rename.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::forest::RandomForest;
use crate::logic::config::ForestParams;
use crate::logic::error::{RiskError, RiskResult};
use crate::logic::features::{validate_layout, LayoutInfo, FEATURE_COUNT};

/// Bump when the envelope or `ModelArtifact` layout changes
pub const ARTIFACT_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u16,
    pub layout: LayoutInfo,
    pub trained_at: DateTime<Utc>,
    /// Hyperparameters and seed the forest was fitted with
    pub params: ForestParams,
    pub seed: u64,
    pub train_rows: usize,
    pub test_accuracy: f64,
    pub forest: RandomForest,
}

impl ModelArtifact {
    pub fn new(
        forest: RandomForest,
        params: &ForestParams,
        seed: u64,
        train_rows: usize,
        test_accuracy: f64,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            layout: LayoutInfo::current(),
            trained_at: Utc::now(),
            params: params.clone(),
            seed,
            train_rows,
            test_accuracy,
            forest,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ArtifactEnvelope {
    checksum: String,
    payload: Vec<u8>,
}

fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Serialize and write, creating parent directories. Overwrites.
pub fn save_artifact(artifact: &ModelArtifact, path: &Path) -> RiskResult<()> {
    let payload = bincode::serialize(artifact)?;
    let envelope = ArtifactEnvelope {
        checksum: checksum(&payload),
        payload,
    };
    let bytes = bincode::serialize(&envelope)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RiskError::data_access(parent, e))?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(RiskError::data_access(&tmp, e));
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        RiskError::data_access(path, e)
    })?;

    log::info!("Model saved to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Read, verify checksum and feature layout, decode
pub fn load_artifact(path: &Path) -> RiskResult<ModelArtifact> {
    let bytes = fs::read(path).map_err(|e| RiskError::data_access(path, e))?;

    let envelope: ArtifactEnvelope = bincode::deserialize(&bytes)
        .map_err(|e| RiskError::Artifact(format!("{}: not a model file ({})", path.display(), e)))?;

    if checksum(&envelope.payload) != envelope.checksum {
        return Err(RiskError::Artifact(format!(
            "{}: checksum mismatch, file is corrupt",
            path.display()
        )));
    }

    let artifact: ModelArtifact = bincode::deserialize(&envelope.payload)?;

    if artifact.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(RiskError::Artifact(format!(
            "unsupported artifact format v{} (expected v{})",
            artifact.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }
    validate_layout(artifact.layout.version, artifact.layout.hash)
        .map_err(|e| RiskError::Artifact(e.to_string()))?;
    if artifact.forest.n_features() != FEATURE_COUNT {
        return Err(RiskError::Artifact(format!(
            "model expects {} features, layout has {}",
            artifact.forest.n_features(),
            FEATURE_COUNT
        )));
    }

    Ok(artifact)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::Dataset;
    use ndarray::{Array1, Array2};
    use tempfile::tempdir;

    fn tiny_artifact(test_accuracy: f64) -> ModelArtifact {
        ModelArtifact::new(tiny_forest(), &ForestParams::default(), 42, 12, test_accuracy)
    }

    fn tiny_forest() -> RandomForest {
        let features = Array2::from_shape_fn((12, FEATURE_COUNT), |(i, j)| {
            if i < 6 { i as f64 + j as f64 } else { 50.0 + i as f64 + j as f64 }
        });
        let labels: Array1<u8> = (0..12).map(|i| u8::from(i >= 6)).collect();
        let params = ForestParams {
            n_trees: 5,
            use_parallelism: false,
            ..Default::default()
        };
        RandomForest::fit(&Dataset::new(features, labels), &params, 42).unwrap()
    }

    #[test]
    fn test_save_creates_parent_dirs_and_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");
        let artifact = tiny_artifact(1.0);

        save_artifact(&artifact, &path).unwrap();
        assert!(path.exists());
        assert!(!temp_path(&path).exists());

        let loaded = load_artifact(&path).unwrap();
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_overwrite_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");

        save_artifact(&tiny_artifact(0.5), &path).unwrap();
        save_artifact(&tiny_artifact(0.75), &path).unwrap();

        assert_eq!(load_artifact(&path).unwrap().test_accuracy, 0.75);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        save_artifact(&tiny_artifact(1.0), &path).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let err = load_artifact(&path).unwrap_err();
        assert!(matches!(err, RiskError::Artifact(_)));
    }

    #[test]
    fn test_garbage_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, b"not a model").unwrap();

        assert!(matches!(load_artifact(&path).unwrap_err(), RiskError::Artifact(_)));
    }

    #[test]
    fn test_missing_file_is_data_access() {
        let dir = tempdir().unwrap();
        assert!(load_artifact(&dir.path().join("absent.bin")).unwrap_err().is_data_access());
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let mut artifact = tiny_artifact(1.0);
        artifact.layout.hash = artifact.layout.hash.wrapping_add(1);
        save_artifact(&artifact, &path).unwrap();

        let err = load_artifact(&path).unwrap_err();
        assert!(err.to_string().contains("layout mismatch"));
    }
}
