//! Engine tuning parameters.
//!
//! [`EngineConfig`] is an immutable value: the engine reads one snapshot per
//! cycle and a runtime update swaps in a new value built with
//! [`EngineConfig::merged`]. Range checks live in [`EngineConfig::validate`]
//! and are the caller's responsibility; the engine accepts whatever it is given.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DECAY_FACTOR, DEFAULT_MAX_RADIUS_KM, DEFAULT_MIN_REPORTS_FOR_HOTSPOT,
    DEFAULT_SOCIAL_MEDIA_WEIGHT, DEFAULT_VERIFICATION_BONUS,
};
use crate::error::ConfigError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Reports needed before a cluster becomes a hotspot.
    pub min_reports_for_hotspot: usize,
    /// Clustering distance and upper bound on hotspot radius.
    pub max_radius_km: f64,
    /// Intensity lost per elapsed hour.
    pub decay_factor: f64,
    /// Contribution of each social mention to intensity, in `[0, 1]`.
    pub social_media_weight: f64,
    /// Multiplier applied to verified reports when computing intensity.
    pub verification_bonus: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_reports_for_hotspot: DEFAULT_MIN_REPORTS_FOR_HOTSPOT,
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
            decay_factor: DEFAULT_DECAY_FACTOR,
            social_media_weight: DEFAULT_SOCIAL_MEDIA_WEIGHT,
            verification_bonus: DEFAULT_VERIFICATION_BONUS,
        }
    }
}

impl EngineConfig {
    /// A copy of `self` with every field present in `update` replaced.
    pub fn merged(&self, update: &ConfigUpdate) -> Self {
        Self {
            min_reports_for_hotspot: update
                .min_reports_for_hotspot
                .unwrap_or(self.min_reports_for_hotspot),
            max_radius_km: update.max_radius_km.unwrap_or(self.max_radius_km),
            decay_factor: update.decay_factor.unwrap_or(self.decay_factor),
            social_media_weight: update.social_media_weight.unwrap_or(self.social_media_weight),
            verification_bonus: update.verification_bonus.unwrap_or(self.verification_bonus),
        }
    }

    /// Range checks for values coming from operators or API clients.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_reports_for_hotspot < 1 {
            return Err(ConfigError::MinReportsTooLow);
        }
        if !self.max_radius_km.is_finite() || self.max_radius_km <= 0.0 {
            return Err(ConfigError::InvalidMaxRadius(self.max_radius_km));
        }
        if !self.decay_factor.is_finite() || self.decay_factor < 0.0 {
            return Err(ConfigError::InvalidDecayFactor(self.decay_factor));
        }
        if !(0.0..=1.0).contains(&self.social_media_weight) {
            return Err(ConfigError::InvalidSocialMediaWeight(self.social_media_weight));
        }
        if !self.verification_bonus.is_finite() || self.verification_bonus < 1.0 {
            return Err(ConfigError::InvalidVerificationBonus(self.verification_bonus));
        }
        Ok(())
    }
}

/// Partial configuration. Absent fields keep their current value.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ConfigUpdate {
    pub min_reports_for_hotspot: Option<usize>,
    pub max_radius_km: Option<f64>,
    pub decay_factor: Option<f64>,
    pub social_media_weight: Option<f64>,
    pub verification_bonus: Option<f64>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
