//! Risk Module
//!
//! Chuyển probability (0-100) thành risk category và recommendation.
//!
//! ## Structure
//! - `types`: RiskCategory, DisplayTier
//! - `rules`: Cutoffs (constants only)
//! - `interpreter`: interpret / recommendation / display_tier
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{interpret, recommendation};
//!
//! let percent = probability * 100.0;
//! println!("{} - {}", interpret(percent), recommendation(percent));
//! ```

pub mod types;
pub mod rules;
pub mod interpreter;

pub use types::{DisplayTier, RiskCategory};

pub use rules::{HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD};

pub use interpreter::{display_tier, interpret, recommendation};
