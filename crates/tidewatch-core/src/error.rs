//! Error types for Tidewatch.
//!
//! The hotspot cycle itself never fails. These errors are produced by the
//! validation helpers that callers run before handing inputs to the engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObservationError {
    #[error("latitude out of range: {0}")] InvalidLatitude(f64),
    #[error("longitude out of range: {0}")] InvalidLongitude(f64),
    #[error("non-finite coordinate in observation {0}")] NonFiniteCoordinate(String),
    #[error("confidence out of range [0, 1]: {0}")] InvalidConfidence(f64),
    #[error("unknown hazard type: {0}")] UnknownHazardType(String),
    #[error("unknown urgency: {0}")] UnknownUrgency(String),
    #[error("unknown risk level: {0}")] UnknownRiskLevel(String),
    #[error("empty observation id")] EmptyId,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("min_reports_for_hotspot must be >= 1")] MinReportsTooLow,
    #[error("max_radius_km must be finite and > 0, got {0}")] InvalidMaxRadius(f64),
    #[error("decay_factor must be finite and >= 0, got {0}")] InvalidDecayFactor(f64),
    #[error("social_media_weight must be in [0, 1], got {0}")] InvalidSocialMediaWeight(f64),
    #[error("verification_bonus must be finite and >= 1, got {0}")] InvalidVerificationBonus(f64),
}

#[derive(Error, Debug)]
pub enum TidewatchError {
    #[error(transparent)] Observation(#[from] ObservationError),
    #[error(transparent)] Config(#[from] ConfigError),
}
