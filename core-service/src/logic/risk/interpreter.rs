//! Risk Interpreter
//!
//! Pure functions over a percent value. Input is expected in [0, 100];
//! anything else (NaN included) falls through the comparison chain to the
//! lowest bracket.

use super::rules::{
    HIGH_RISK_THRESHOLD, LOW_RISK_THRESHOLD, MODERATE_RISK_THRESHOLD, RECOMMENDATION_MAINTAIN,
    RECOMMENDATION_PREVENTIVE, RECOMMENDATION_URGENT,
};
use super::types::{DisplayTier, RiskCategory};

/// Percent → risk category
pub fn interpret(percent: f64) -> RiskCategory {
    if percent > HIGH_RISK_THRESHOLD {
        RiskCategory::High
    } else if percent > MODERATE_RISK_THRESHOLD {
        RiskCategory::Moderate
    } else if percent > LOW_RISK_THRESHOLD {
        RiskCategory::Low
    } else {
        RiskCategory::VeryLow
    }
}

/// Canned recommendation paragraph.
///
/// Three tiers only: Low and Very low share the same text.
pub fn recommendation(percent: f64) -> &'static str {
    match display_tier(percent) {
        DisplayTier::Red => RECOMMENDATION_URGENT,
        DisplayTier::Amber => RECOMMENDATION_PREVENTIVE,
        DisplayTier::Green => RECOMMENDATION_MAINTAIN,
    }
}

/// Accent tier, same cutoffs as `recommendation`
pub fn display_tier(percent: f64) -> DisplayTier {
    if percent > HIGH_RISK_THRESHOLD {
        DisplayTier::Red
    } else if percent > MODERATE_RISK_THRESHOLD {
        DisplayTier::Amber
    } else {
        DisplayTier::Green
    }
}
