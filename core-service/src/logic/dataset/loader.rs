//! CSV loading and median imputation

use std::fs::File;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::record::{Dataset, DatasetRecord};
use crate::constants::OUTCOME_COLUMN;
use crate::logic::error::{RiskError, RiskResult};
use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};

/// Cells treated as missing besides the empty string
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// What the imputation step filled in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationSummary {
    /// Missing cells per feature (layout order)
    pub missing_per_feature: [usize; FEATURE_COUNT],
    /// Median used per feature (layout order)
    pub medians: [f64; FEATURE_COUNT],
}

impl ImputationSummary {
    pub fn total_missing(&self) -> usize {
        self.missing_per_feature.iter().sum()
    }
}

/// Read the CSV and impute missing values in one go
pub fn load_csv(path: &Path) -> RiskResult<(Dataset, ImputationSummary)> {
    let records = load_records(path)?;
    impute_median(&records)
}

/// Read raw rows; columns are matched by header name
pub fn load_records(path: &Path) -> RiskResult<Vec<DatasetRecord>> {
    let file = File::open(path).map_err(|e| RiskError::data_access(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> RiskResult<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| RiskError::Dataset(format!("missing column '{}'", name)))
    };

    let mut feature_columns = [0usize; FEATURE_COUNT];
    for (slot, name) in feature_columns.iter_mut().zip(FEATURE_LAYOUT) {
        *slot = column(name)?;
    }
    let outcome_column = column(OUTCOME_COLUMN)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        // Header is line 1
        let line = row + 2;
        let record = result?;

        let mut features = [None; FEATURE_COUNT];
        for (i, &col) in feature_columns.iter().enumerate() {
            features[i] = parse_cell(record.get(col).unwrap_or(""))
                .map_err(|raw| {
                    RiskError::Dataset(format!(
                        "line {}: {} value '{}' is not a number",
                        line, FEATURE_LAYOUT[i], raw
                    ))
                })?;
        }

        let outcome = parse_outcome(record.get(outcome_column).unwrap_or("")).ok_or_else(|| {
            RiskError::Dataset(format!(
                "line {}: {} must be 0 or 1",
                line, OUTCOME_COLUMN
            ))
        })?;

        records.push(DatasetRecord { features, outcome });
    }

    log::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Fill every missing cell with its column median
pub fn impute_median(records: &[DatasetRecord]) -> RiskResult<(Dataset, ImputationSummary)> {
    if records.is_empty() {
        return Err(RiskError::Dataset("dataset has no rows".to_string()));
    }

    let mut missing_per_feature = [0usize; FEATURE_COUNT];
    let mut medians = [0.0f64; FEATURE_COUNT];

    for i in 0..FEATURE_COUNT {
        let mut present: Vec<f64> = records.iter().filter_map(|r| r.features[i]).collect();
        missing_per_feature[i] = records.len() - present.len();
        medians[i] = median(&mut present).ok_or_else(|| {
            RiskError::Dataset(format!("column '{}' has no values", FEATURE_LAYOUT[i]))
        })?;
    }

    let mut features = Array2::<f64>::zeros((records.len(), FEATURE_COUNT));
    for (mut row, record) in features.rows_mut().into_iter().zip(records) {
        for i in 0..FEATURE_COUNT {
            row[i] = record.features[i].unwrap_or(medians[i]);
        }
    }
    let labels: Array1<u8> = records.iter().map(|r| r.outcome).collect();

    Ok((
        Dataset::new(features, labels),
        ImputationSummary {
            missing_per_feature,
            medians,
        },
    ))
}

/// Median of the values; even count → mean of the two middle values
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

fn parse_cell(raw: &str) -> Result<Option<f64>, String> {
    if raw.is_empty() || MISSING_MARKERS.contains(&raw) {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(raw.to_string()),
    }
}

fn parse_outcome(raw: &str) -> Option<u8> {
    match raw.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(0),
        Ok(v) if v == 1.0 => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("33.6"), Ok(Some(33.6)));
        assert_eq!(parse_cell(""), Ok(None));
        assert_eq!(parse_cell("NA"), Ok(None));
        assert!(parse_cell("high").is_err());
    }

    #[test]
    fn test_parse_outcome() {
        assert_eq!(parse_outcome("0"), Some(0));
        assert_eq!(parse_outcome("1"), Some(1));
        assert_eq!(parse_outcome("1.0"), Some(1));
        assert_eq!(parse_outcome("2"), None);
        assert_eq!(parse_outcome(""), None);
    }
}
