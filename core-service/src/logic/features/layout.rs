//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema shared by training and inference.**
//!
//! Adding, removing or reordering a column → bump `FEATURE_VERSION`.
//! Artifacts store the layout hash; a model trained on another layout
//! is rejected at load time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

pub const FEATURE_COUNT: usize = 8;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Dataset column names, in vector order
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "Pregnancies",              // 0: Number of pregnancies
    "Glucose",                  // 1: Plasma glucose (mg/dL)
    "BloodPressure",            // 2: Diastolic blood pressure (mmHg)
    "SkinThickness",            // 3: Triceps skin fold thickness (mm)
    "Insulin",                  // 4: 2-hour serum insulin (µU/mL)
    "BMI",                      // 5: Body mass index (kg/m²)
    "DiabetesPedigreeFunction", // 6: Family history score
    "Age",                      // 7: Age (years)
];

/// Form labels, same order
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "Pregnancies",
    "Glucose (mg/dL)",
    "Blood pressure (mmHg)",
    "Skin thickness (mm)",
    "Insulin (µU/mL)",
    "BMI (kg/m²)",
    "Diabetes pedigree function",
    "Age (years)",
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version byte and the NUL-separated column names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Layout fingerprint embedded in every artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Ok only for the layout this build was compiled with
pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    let expected_hash = layout_hash();
    if version == FEATURE_VERSION && hash == expected_hash {
        return Ok(());
    }
    Err(LayoutMismatchError {
        expected_version: FEATURE_VERSION,
        expected_hash,
        actual_version: version,
        actual_hash: hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());

        let err = validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).unwrap_err();
        assert!(err.to_string().contains("layout mismatch"));
    }

    #[test]
    fn test_layout_info_matches_columns() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names, FEATURE_LAYOUT.to_vec());
    }
}
