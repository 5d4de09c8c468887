//! Diabetes Risk - Console App Entry Point
//!
//! Load model một lần lúc khởi động, sau đó lặp form: 8 fields → kết quả.
//! Type `q` at any prompt to quit.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use diabetes_risk_core::api::{get_engine_status, predict_form, PredictionView};
use diabetes_risk_core::constants::{APP_NAME, APP_VERSION, DEFAULT_MODEL_PATH};
use diabetes_risk_core::logic::features::FEATURE_LABELS;
use diabetes_risk_core::logic::model::InferenceService;

const ANSI_RESET: &str = "\x1b[0m";

enum Form {
    Filled(Vec<String>),
    Quit,
}

/// Prompt every field in layout order; EOF or `q` quits
fn read_form(input: &mut impl BufRead) -> io::Result<Form> {
    let mut fields = Vec::with_capacity(FEATURE_LABELS.len());
    for label in FEATURE_LABELS {
        print!("  {:<28}: ", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Form::Quit);
        }
        let value = line.trim();
        if value.eq_ignore_ascii_case("q") {
            return Ok(Form::Quit);
        }
        fields.push(value.to_string());
    }
    Ok(Form::Filled(fields))
}

fn render(view: &PredictionView) {
    let accent = view.tier.ansi();
    println!();
    println!("{}  ⚕ {}{}", accent, view.percent_text(), ANSI_RESET);
    println!("{}  {} - {}{}", accent, view.label, view.headline, ANSI_RESET);
    println!();
    println!("  Recommendations:");
    println!("  {}", view.recommendation);
    println!();
}

fn run(service: &InferenceService) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("Enter the clinical data for analysis:");
        let fields = match read_form(&mut input)? {
            Form::Filled(fields) => fields,
            Form::Quit => return Ok(()),
        };

        match predict_form(service, &fields) {
            Ok(view) => render(&view),
            Err(e) if e.is_validation() => {
                println!("\n  Validation error: {}", e);
                println!("  Please fill every field with a valid number.\n");
            }
            Err(e) => {
                log::error!("Prediction failed: {}", e);
                println!("\n  Prediction failed: {}\n", e);
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let service = match InferenceService::load(Path::new(DEFAULT_MODEL_PATH)) {
        Ok(service) => service,
        Err(e) => {
            log::error!("Cannot start without a model: {}", e);
            eprintln!("Model not available. Run the `train` binary first.");
            process::exit(1);
        }
    };

    let status = get_engine_status(&service);
    log::info!(
        "Feature layout v{} ({:08x}), {} features; model trained {} (accuracy {:.3})",
        status.feature_version,
        status.layout_hash,
        status.feature_count,
        status.model.trained_at.format("%Y-%m-%d %H:%M"),
        status.model.test_accuracy
    );

    println!("{}", "=".repeat(50));
    println!("{:^50}", format!("{} v{}", APP_NAME, APP_VERSION));
    println!("{}", "=".repeat(50));
    println!("For educational purposes only. Type q to quit.\n");

    if let Err(e) = run(&service) {
        log::error!("Console I/O failed: {}", e);
        process::exit(1);
    }

    log::info!("Bye");
}
