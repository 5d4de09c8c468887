//! API Module
//!
//! Entry points cho presentation layer (console app hoặc UI khác).
//!
//! Usage:
//! - `api::predict_form(&service, &fields)` - Form → PredictionView
//! - `api::get_engine_status(&service)` - Layout + model info

pub mod commands;

pub use commands::*;
