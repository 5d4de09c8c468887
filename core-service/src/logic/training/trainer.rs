//! Trainer - End-to-end training run
//!
//! Stages are numbered on the console the same way every run:
//! `[1/4]` load, `[2/4]` preprocess, `[3/4]` split, `[4/4]` fit.
//! Nothing touches the disk until the forest is fitted and evaluated.
//! The report is staged before the model is saved, so a report that cannot
//! be written fails the run with the previous model still in place.

use std::time::Instant;

use crate::logic::config::TrainerConfig;
use crate::logic::dataset::{impute_median, load_records, stratified_split};
use crate::logic::error::RiskResult;
use crate::logic::evaluation::classification_report;
use crate::logic::model::{save_artifact, ModelArtifact, RandomForest};

use super::report::{ranked_importances, stage_report, TrainingReport};

pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> RiskResult<TrainingReport> {
        let cfg = &self.config;
        let started = Instant::now();

        // [1/4] Load
        println!("\n[1/4] Loading dataset...");
        let records = load_records(&cfg.dataset_path)?;
        println!(
            "  → Loaded {} records from {}",
            records.len(),
            cfg.dataset_path.display()
        );

        // [2/4] Preprocess
        println!("\n[2/4] Preprocessing...");
        let (data, imputation) = impute_median(&records)?;
        if imputation.total_missing() > 0 {
            println!(
                "  → Warning: {} missing values filled with column medians",
                imputation.total_missing()
            );
        }
        log::debug!("Column medians: {:?}", imputation.medians);

        // [3/4] Split
        println!("\n[3/4] Splitting train/test...");
        let split = stratified_split(&data, cfg.test_size, cfg.seed)?;
        println!("  → Training set: {} samples", split.train.len());
        println!("  → Test set: {} samples", split.test.len());

        // [4/4] Fit
        println!("\n[4/4] Training model...");
        let forest = RandomForest::fit(&split.train, &cfg.forest, cfg.seed)?;
        let elapsed_secs = started.elapsed().as_secs_f64();
        println!(
            "\n✔ Model trained ({} trees, total time {:.2}s)",
            forest.n_trees(),
            elapsed_secs
        );

        // Evaluate (reported, never asserted)
        let y_true = split.test.labels.to_vec();
        let y_pred = forest.predict_batch(&split.test.features);
        let metrics = classification_report(&y_true, &y_pred);
        println!("\nPerformance on test set:");
        println!("{}", metrics);

        let feature_importances = ranked_importances(forest.feature_importances());
        println!("\nFeature importances:");
        for item in &feature_importances {
            println!("  → {:<26}: {:.3}", item.feature, item.importance);
        }

        let artifact = ModelArtifact::new(
            forest,
            &cfg.forest,
            cfg.seed,
            split.train.len(),
            metrics.accuracy,
        );
        let report = TrainingReport {
            dataset_path: cfg.dataset_path.display().to_string(),
            model_path: cfg.model_path.display().to_string(),
            trained_at: artifact.trained_at,
            rows: data.len(),
            imputation,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            train_class_counts: split.train.class_counts(),
            test_class_counts: split.test.class_counts(),
            seed: cfg.seed,
            params: cfg.forest.clone(),
            metrics,
            feature_importances,
            elapsed_secs,
        };

        // Persist: stage report, save model, then move the report into place
        let staged = match &cfg.report_path {
            Some(report_path) => Some(stage_report(&report, report_path)?),
            None => None,
        };
        if let Err(e) = save_artifact(&artifact, &cfg.model_path) {
            if let Some(staged) = staged {
                staged.discard();
            }
            return Err(e);
        }
        println!("\nModel saved to: {}", cfg.model_path.display());

        if let Some(staged) = staged {
            let report_path = staged.target().to_path_buf();
            match staged.commit() {
                Ok(()) => log::info!("Training report written to {}", report_path.display()),
                Err(e) => log::warn!("Model saved but training report was not: {}", e),
            }
        }

        log::info!(
            "Training finished: accuracy {:.3} on {} test rows",
            report.accuracy(),
            report.test_rows
        );
        Ok(report)
    }
}

/// Run one training with `config`
pub fn train(config: &TrainerConfig) -> RiskResult<TrainingReport> {
    Trainer::new(config.clone()).run()
}
