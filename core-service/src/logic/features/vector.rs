//! Feature Vector - Core data structure for ML input
//!
//! Ordered values theo `FEATURE_LAYOUT`. Built fresh for every prediction,
//! never persisted.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LABELS, FEATURE_LAYOUT};
use crate::logic::error::{RiskError, RiskResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Exactly FEATURE_COUNT finite values
    pub fn from_slice(values: &[f64]) -> RiskResult<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(RiskError::Validation(format!(
                "expected {} values, got {}",
                FEATURE_COUNT,
                values.len()
            )));
        }

        let mut array = [0.0f64; FEATURE_COUNT];
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(RiskError::Validation(format!(
                    "{}: value must be a finite number",
                    FEATURE_LABELS[i]
                )));
            }
            array[i] = v;
        }
        Ok(Self::from_values(array))
    }

    /// Parse raw form fields (one string per feature, layout order)
    ///
    /// Surrounding whitespace is ignored. The first bad field is reported
    /// by its display label.
    pub fn parse_fields<S: AsRef<str>>(fields: &[S]) -> RiskResult<Self> {
        if fields.len() != FEATURE_COUNT {
            return Err(RiskError::Validation(format!(
                "expected {} fields, got {}",
                FEATURE_COUNT,
                fields.len()
            )));
        }

        let values = fields
            .iter()
            .zip(FEATURE_LABELS)
            .map(|(field, label)| {
                let raw = field.as_ref().trim();
                raw.parse::<f64>().map_err(|_| {
                    RiskError::Validation(format!("{}: '{}' is not a valid number", label, raw))
                })
            })
            .collect::<RiskResult<Vec<f64>>>()?;

        Self::from_slice(&values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "values": self.values,
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
