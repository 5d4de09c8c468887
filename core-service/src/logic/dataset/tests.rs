use std::fs;

use ndarray::{Array1, Array2};
use tempfile::tempdir;

use super::loader::{impute_median, load_csv, load_records};
use super::record::{Dataset, DatasetRecord};
use super::split::stratified_split;

const HEADER: &str =
    "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome";

fn labeled(n_neg: usize, n_pos: usize) -> Dataset {
    let n = n_neg + n_pos;
    let features = Array2::from_shape_fn((n, 8), |(i, j)| (i * 8 + j) as f64);
    let labels: Array1<u8> = (0..n).map(|i| if i < n_neg { 0 } else { 1 }).collect();
    Dataset::new(features, labels)
}

#[test]
fn test_load_csv_reads_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("diabetes.csv");
    fs::write(
        &path,
        format!(
            "{}\n6,148,72,35,0,33.6,0.627,50,1\n1,85,66,29,0,26.6,0.351,31,0\n",
            HEADER
        ),
    )
    .unwrap();

    let (data, summary) = load_csv(&path).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.labels.to_vec(), vec![1, 0]);
    assert_eq!(data.row(0)[1], 148.0);
    assert_eq!(summary.total_missing(), 0);
}

#[test]
fn test_load_csv_matches_columns_by_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shuffled.csv");
    fs::write(
        &path,
        "Outcome,Age,Id,Glucose,Pregnancies,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction\n\
         1,50,x1,148,6,72,35,0,33.6,0.627\n",
    )
    .unwrap();

    let records = load_records(&path).unwrap();
    assert_eq!(
        records[0],
        DatasetRecord::complete([6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0], 1)
    );
}

#[test]
fn test_missing_values_are_imputed_with_median() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gaps.csv");
    fs::write(
        &path,
        format!(
            "{}\n1,100,70,20,,30,0.5,30,0\n2,,70,20,50,30,0.5,40,1\n3,120,70,20,150,30,0.5,50,0\n4,140,70,20,NA,30,0.5,60,1\n",
            HEADER
        ),
    )
    .unwrap();

    let (data, summary) = load_csv(&path).unwrap();
    assert_eq!(summary.missing_per_feature[1], 1);
    assert_eq!(summary.missing_per_feature[4], 2);
    // Glucose median of 100, 120, 140
    assert_eq!(data.row(1)[1], 120.0);
    // Insulin median of 50, 150
    assert_eq!(data.row(0)[4], 100.0);
    assert_eq!(data.row(3)[4], 100.0);
}

#[test]
fn test_missing_file_is_data_access_error() {
    let dir = tempdir().unwrap();
    let err = load_csv(&dir.path().join("nope.csv")).unwrap_err();
    assert!(err.is_data_access());
}

#[test]
fn test_missing_outcome_column_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nolabel.csv");
    fs::write(
        &path,
        "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age\n1,2,3,4,5,6,7,8\n",
    )
    .unwrap();

    let err = load_csv(&path).unwrap_err();
    assert!(err.to_string().contains("Outcome"));
}

#[test]
fn test_bad_outcome_and_bad_cell_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, format!("{}\n1,2,3,4,5,6,7,8,2\n", HEADER)).unwrap();
    assert!(load_csv(&path).unwrap_err().to_string().contains("line 2"));

    fs::write(&path, format!("{}\n1,high,3,4,5,6,7,8,1\n", HEADER)).unwrap();
    assert!(load_csv(&path).unwrap_err().to_string().contains("Glucose"));
}

#[test]
fn test_impute_rejects_empty_column() {
    let records = vec![DatasetRecord {
        features: [None, Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0)],
        outcome: 1,
    }];
    let err = impute_median(&records).unwrap_err();
    assert!(err.to_string().contains("Pregnancies"));
}

#[test]
fn test_stratified_split_preserves_ratio() {
    let data = labeled(10, 10);
    let split = stratified_split(&data, 0.2, 42).unwrap();

    assert_eq!(split.train.len(), 16);
    assert_eq!(split.test.len(), 4);
    assert_eq!(split.test.class_counts(), [2, 2]);
    assert_eq!(split.train.class_counts(), [8, 8]);
}

#[test]
fn test_stratified_split_imbalanced() {
    let data = labeled(80, 20);
    let split = stratified_split(&data, 0.2, 7).unwrap();

    assert_eq!(split.test.len(), 20);
    assert_eq!(split.test.class_counts(), [16, 4]);
    assert_eq!(split.train.class_counts(), [64, 16]);
}

#[test]
fn test_stratified_split_half_shares_keep_test_size() {
    // 14 rows → 3 test rows; each class's proportional share is 1.5
    let data = labeled(7, 7);
    let split = stratified_split(&data, 0.2, 42).unwrap();

    assert_eq!(split.test.len(), 3);
    assert_eq!(split.train.len(), 11);
    let test_counts = split.test.class_counts();
    assert!(test_counts[0] >= 1 && test_counts[1] >= 1);
}

#[test]
fn test_stratified_split_is_deterministic() {
    let data = labeled(30, 12);
    let a = stratified_split(&data, 0.2, 42).unwrap();
    let b = stratified_split(&data, 0.2, 42).unwrap();
    assert_eq!(a.train, b.train);
    assert_eq!(a.test, b.test);
}

#[test]
fn test_stratified_split_rejects_bad_input() {
    let data = labeled(5, 5);
    assert!(stratified_split(&data, 0.0, 42).is_err());
    assert!(stratified_split(&data, 1.0, 42).is_err());
    assert!(stratified_split(&labeled(1, 0), 0.2, 42).is_err());
}
