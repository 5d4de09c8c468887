//! Diabetes Risk Core
//!
//! Train, persist and serve a random forest that estimates diabetes risk
//! from eight clinical measurements.
//!
//! ## Structure
//! - `logic/` - Features, dataset, model, training, evaluation, risk
//! - `api/` - Façade consumed by the presentation layer

pub mod api;
pub mod constants;
pub mod logic;
