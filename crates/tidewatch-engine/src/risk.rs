//! Composite risk scoring implementing the [`RiskModel`] trait.
//!
//! ```text
//! score = intensity * 10
//!       + verified_reports * 20
//!       + (reports / max(radius_km, 1)) * 15
//!       + social_mentions * 2
//! score *= hazard multiplier
//! ```
//!
//! Tiers, first match wins: `>= 200` critical, `>= 100` high, `>= 50`
//! medium, otherwise low.

use tidewatch_core::constants::{
    CRITICAL_SCORE, HIGH_SCORE, MEDIUM_SCORE, SCORE_DENSITY_WEIGHT, SCORE_INTENSITY_WEIGHT,
    SCORE_MIN_DENSITY_RADIUS_KM, SCORE_SOCIAL_WEIGHT, SCORE_VERIFIED_WEIGHT,
};
use tidewatch_core::traits::RiskModel;
use tidewatch_core::types::{Hotspot, RiskLevel};

/// The production risk model.
#[derive(Debug, Clone, Default)]
pub struct CompositeRiskScorer;

impl CompositeRiskScorer {
    pub fn new() -> Self {
        Self
    }
}

/// Tier for a composite score. NaN maps to `Low`.
pub fn tier_for_score(score: f64) -> RiskLevel {
    if score >= CRITICAL_SCORE {
        RiskLevel::Critical
    } else if score >= HIGH_SCORE {
        RiskLevel::High
    } else if score >= MEDIUM_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

impl RiskModel for CompositeRiskScorer {
    fn score(&self, hotspot: &Hotspot) -> f64 {
        let density =
            hotspot.report_count as f64 / hotspot.radius_km.max(SCORE_MIN_DENSITY_RADIUS_KM);
        let base = hotspot.intensity * SCORE_INTENSITY_WEIGHT
            + hotspot.verified_report_count as f64 * SCORE_VERIFIED_WEIGHT
            + density * SCORE_DENSITY_WEIGHT
            + hotspot.social_media_mentions as f64 * SCORE_SOCIAL_WEIGHT;
        base * hotspot.hazard_type.risk_multiplier()
    }

    fn tier(&self, score: f64) -> RiskLevel {
        tier_for_score(score)
    }
}
