//! Risk Types
//!
//! KHÔNG chứa logic - chỉ data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// RISK CATEGORY
// ============================================================================

/// Four ordered risk brackets, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    VeryLow,
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "Very low risk",
            RiskCategory::Low => "Low risk",
            RiskCategory::Moderate => "Moderate risk",
            RiskCategory::High => "High risk",
        }
    }

    /// Short follow-up hint shown under the label
    pub fn headline(&self) -> &'static str {
        match self {
            RiskCategory::VeryLow => "Situation under control",
            RiskCategory::Low => "Preventive maintenance",
            RiskCategory::Moderate => "Attention needed",
            RiskCategory::High => "Action recommended",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DISPLAY TIER
// ============================================================================

/// Accent tier for the result screen (three levels, not four)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayTier {
    Green,
    Amber,
    Red,
}

impl DisplayTier {
    pub fn color(&self) -> &'static str {
        match self {
            DisplayTier::Green => "#2e7d32",
            DisplayTier::Amber => "#f57f17",
            DisplayTier::Red => "#c62828",
        }
    }

    /// ANSI foreground escape for terminals
    pub fn ansi(&self) -> &'static str {
        match self {
            DisplayTier::Green => "\x1b[32m",
            DisplayTier::Amber => "\x1b[33m",
            DisplayTier::Red => "\x1b[31m",
        }
    }
}
