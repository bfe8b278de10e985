//! Trait interfaces shared between crates:
//! - [`Observation`]: common view over reports and social signals, consumed
//!   by the clusterer
//! - [`RiskModel`]: score and tier computation (tidewatch-engine implements)

use chrono::{DateTime, Utc};

use crate::types::{GeoPoint, HazardType, Hotspot, Report, RiskLevel, SocialSignal};

/// A discrete, located hazard sighting.
pub trait Observation {
    fn id(&self) -> &str;

    fn hazard_type(&self) -> HazardType;

    /// `None` for observations that could not be geolocated. Those never
    /// join a cluster.
    fn location(&self) -> Option<GeoPoint>;

    fn timestamp(&self) -> DateTime<Utc>;
}

impl Observation for Report {
    fn id(&self) -> &str {
        &self.id
    }

    fn hazard_type(&self) -> HazardType {
        self.hazard_type
    }

    fn location(&self) -> Option<GeoPoint> {
        Some(self.location)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Observation for SocialSignal {
    fn id(&self) -> &str {
        &self.id
    }

    fn hazard_type(&self) -> HazardType {
        self.hazard_type
    }

    fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Composite risk scoring of a hotspot.
pub trait RiskModel: Send + Sync {
    /// Weighted composite score. Higher means more dangerous.
    fn score(&self, hotspot: &Hotspot) -> f64;

    /// Tier for a score. Must be monotonic: a higher score never maps to a
    /// lower tier.
    fn tier(&self, score: f64) -> RiskLevel;

    /// Score, classify and update `hotspot` in place.
    ///
    /// Returns `true` if this call raised the early warning for the first time.
    /// An already raised warning is never cleared.
    fn assess(&self, hotspot: &mut Hotspot) -> bool {
        let score = self.score(hotspot);
        let tier = self.tier(score);
        hotspot.risk_score = score;
        hotspot.risk_level = tier;
        if tier == RiskLevel::Critical && !hotspot.early_warning_issued {
            hotspot.early_warning_issued = true;
            return true;
        }
        false
    }
}
