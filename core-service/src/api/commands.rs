//! App Commands - API cho presentation layer
//!
//! Form fields in, render-ready view out. Model được truyền vào tường minh,
//! không có global state.

use serde::{Deserialize, Serialize};

use crate::logic::error::RiskResult;
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_VERSION, layout_hash};
use crate::logic::model::{InferenceService, ModelInfo, RiskModel};
use crate::logic::risk::{display_tier, interpret, recommendation, DisplayTier, RiskCategory};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Everything the result screen shows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionView {
    /// Class-1 probability × 100
    pub risk_percent: f64,
    pub category: RiskCategory,
    pub label: String,
    pub headline: String,
    pub recommendation: String,
    pub tier: DisplayTier,
    pub color: String,
}

impl PredictionView {
    pub fn from_probability(probability: f64) -> Self {
        let risk_percent = probability * 100.0;
        let category = interpret(risk_percent);
        let tier = display_tier(risk_percent);
        Self {
            risk_percent,
            category,
            label: category.as_str().to_string(),
            headline: category.headline().to_string(),
            recommendation: recommendation(risk_percent).to_string(),
            tier,
            color: tier.color().to_string(),
        }
    }

    /// "63.2%"
    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.risk_percent)
    }
}

/// Engine status for the header / about screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,
    pub model: ModelInfo,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Validate the 8 form fields, predict, interpret
pub fn predict_form<M, S>(model: &M, fields: &[S]) -> RiskResult<PredictionView>
where
    M: RiskModel + ?Sized,
    S: AsRef<str>,
{
    let features = FeatureVector::parse_fields(fields)?;
    log::debug!("Prediction input: {}", features.to_log_entry());

    let view = PredictionView::from_probability(model.predict_proba(&features));
    log::info!("Prediction: {} ({})", view.percent_text(), view.label);
    Ok(view)
}

pub fn get_engine_status(service: &InferenceService) -> EngineStatus {
    EngineStatus {
        feature_version: FEATURE_VERSION,
        layout_hash: layout_hash(),
        feature_count: FEATURE_COUNT,
        model: service.info(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed probability
    struct FixedModel(f64);

    impl RiskModel for FixedModel {
        fn predict_proba(&self, _features: &FeatureVector) -> f64 {
            self.0
        }
    }

    const FIELDS: [&str; FEATURE_COUNT] = ["6", "148", "72", "35", "0", "33.6", "0.627", "50"];

    #[test]
    fn test_predict_form_high_risk() {
        let view = predict_form(&FixedModel(0.853), &FIELDS).unwrap();
        assert_eq!(view.category, RiskCategory::High);
        assert_eq!(view.label, "High risk");
        assert_eq!(view.percent_text(), "85.3%");
        assert_eq!(view.tier, DisplayTier::Red);
    }

    #[test]
    fn test_mid_probability_is_moderate() {
        let view = predict_form(&FixedModel(0.55), &FIELDS).unwrap();
        assert_eq!(view.category, RiskCategory::Moderate);
        assert_eq!(view.tier, DisplayTier::Amber);
    }

    #[test]
    fn test_cutoff_probability_falls_to_lower_bracket() {
        assert_eq!(PredictionView::from_probability(0.7).category, RiskCategory::Moderate);
        assert_eq!(PredictionView::from_probability(0.4).category, RiskCategory::Low);
        assert_eq!(PredictionView::from_probability(0.2).category, RiskCategory::VeryLow);
    }

    #[test]
    fn test_low_and_very_low_share_recommendation() {
        let low = PredictionView::from_probability(0.3);
        let very_low = PredictionView::from_probability(0.1);
        assert_eq!(low.category, RiskCategory::Low);
        assert_eq!(very_low.category, RiskCategory::VeryLow);
        assert_eq!(low.recommendation, very_low.recommendation);
        assert_eq!(low.tier, DisplayTier::Green);
    }

    #[test]
    fn test_invalid_field_is_validation_error() {
        let mut fields = FIELDS.map(String::from);
        fields[5] = "thirty".to_string();
        let err = predict_form(&FixedModel(0.5), &fields).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("BMI"));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let err = predict_form(&FixedModel(0.5), &FIELDS[..7]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_dyn_model() {
        let model: Box<dyn RiskModel> = Box::new(FixedModel(0.45));
        let view = predict_form(model.as_ref(), &FIELDS).unwrap();
        assert_eq!(view.category, RiskCategory::Moderate);
    }
}
