//! Input contract checks.
//!
//! The engine assumes well-formed observations. Callers (API handlers, the
//! CLI) run these before a cycle so that malformed coordinates or
//! confidences never reach the clustering math.

use crate::error::{ObservationError, TidewatchError};
use crate::types::{GeoPoint, Report, SocialSignal};
use crate::EngineConfig;

pub fn validate_point(id: &str, point: &GeoPoint) -> Result<(), ObservationError> {
    if !point.is_finite() {
        return Err(ObservationError::NonFiniteCoordinate(id.to_string()));
    }
    if !(-90.0..=90.0).contains(&point.lat) {
        return Err(ObservationError::InvalidLatitude(point.lat));
    }
    if !(-180.0..=180.0).contains(&point.lng) {
        return Err(ObservationError::InvalidLongitude(point.lng));
    }
    Ok(())
}

pub fn validate_report(report: &Report) -> Result<(), ObservationError> {
    if report.id.trim().is_empty() {
        return Err(ObservationError::EmptyId);
    }
    validate_point(&report.id, &report.location)
}

/// Signals without a location are valid; they are simply not clustered.
pub fn validate_signal(signal: &SocialSignal) -> Result<(), ObservationError> {
    if signal.id.trim().is_empty() {
        return Err(ObservationError::EmptyId);
    }
    if !(0.0..=1.0).contains(&signal.confidence) {
        return Err(ObservationError::InvalidConfidence(signal.confidence));
    }
    if let Some(point) = &signal.location {
        validate_point(&signal.id, point)?;
    }
    Ok(())
}

/// Validate a whole cycle's worth of input plus the configuration it will run with.
pub fn validate_cycle_inputs(
    reports: &[Report],
    signals: &[SocialSignal],
    config: &EngineConfig,
) -> Result<(), TidewatchError> {
    config.validate()?;
    for report in reports {
        validate_report(report)?;
    }
    for signal in signals {
        validate_signal(signal)?;
    }
    Ok(())
}
