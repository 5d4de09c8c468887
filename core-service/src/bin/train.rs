//! Training Entry Point
//!
//! Train với cấu hình mặc định (data/diabetes.csv → models/diabetes_model.bin).
//! Exit code 1 on any failure; never panics.

use std::process;

use diabetes_risk_core::logic::config::TrainerConfig;
use diabetes_risk_core::logic::training::train;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", "=".repeat(50));
    println!("{:.^50}", " DIABETES MODEL TRAINING ");
    println!("{}", "=".repeat(50));

    let config = TrainerConfig::default();
    log::info!(
        "Config: dataset={}, model={}, trees={}, seed={}",
        config.dataset_path.display(),
        config.model_path.display(),
        config.forest.n_trees,
        config.seed
    );

    match train(&config) {
        Ok(report) => {
            log::info!("Test accuracy: {:.3}", report.accuracy());
            println!("\nTraining completed successfully!");
        }
        Err(e) => {
            log::error!("Training error: {}", e);
            println!("\nTraining failed.");
            process::exit(1);
        }
    }
}
