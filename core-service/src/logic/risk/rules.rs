//! Risk Cutoffs
//!
//! Percent scale (0-100). Strict `>` comparisons: a value equal to a
//! cutoff belongs to the lower bracket.
//! KHÔNG chứa logic - chỉ constants.

/// Above this = High risk
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

/// Above this = Moderate risk
pub const MODERATE_RISK_THRESHOLD: f64 = 40.0;

/// Above this = Low risk, at or below = Very low risk
pub const LOW_RISK_THRESHOLD: f64 = 20.0;

// ============================================================================
// RECOMMENDATION TEXT
// ============================================================================

pub const RECOMMENDATION_URGENT: &str = "Urgent medical consultation is recommended. \
Get fasting blood glucose and glycated hemoglobin (HbA1c) tests. Keep regular medical \
follow-up and make immediate changes to diet and physical activity.";

pub const RECOMMENDATION_PREVENTIVE: &str = "Preventive medical follow-up is recommended. \
Monitor your glucose levels regularly. Adopt healthy eating habits and exercise at least \
3 times a week.";

pub const RECOMMENDATION_MAINTAIN: &str = "Your current risk is low. Keep healthy habits \
such as a balanced diet and regular exercise. See a doctor once a year for preventive \
check-ups.";
