//! Shared builders and invariant checks for scenario tests.

use chrono::{DateTime, Duration, Utc};
use tidewatch_core::constants::{MAX_INTENSITY, MIN_HOTSPOT_RADIUS_KM};
use tidewatch_core::geo::distance_km;
use tidewatch_core::types::{GeoPoint, HazardType, Hotspot, Report, SocialSignal, Urgency};
use tidewatch_core::EngineConfig;

/// Fixed reference instant so scenarios are reproducible.
pub fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T06:00:00Z")
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

pub fn hours(h: i64) -> Duration {
    Duration::hours(h)
}

/// A report filed `age_minutes` before `at`.
pub fn report(
    id: &str,
    hazard_type: HazardType,
    lat: f64,
    lng: f64,
    verified: bool,
    at: DateTime<Utc>,
    age_minutes: i64,
) -> Report {
    Report {
        id: id.to_string(),
        hazard_type,
        location: GeoPoint::new(lat, lng),
        timestamp: at - Duration::minutes(age_minutes),
        verified,
    }
}

/// A located, hazard-related signal.
pub fn signal(
    id: &str,
    hazard_type: HazardType,
    lat: f64,
    lng: f64,
    confidence: f64,
    urgency: Urgency,
    at: DateTime<Utc>,
) -> SocialSignal {
    SocialSignal {
        id: id.to_string(),
        is_hazard_related: true,
        hazard_type,
        confidence,
        urgency,
        location: Some(GeoPoint::new(lat, lng)),
        timestamp: at,
    }
}

/// Three Tsunami reports around Chennai's Marina beach, one verified.
pub fn marina_tsunami_reports(at: DateTime<Utc>) -> Vec<Report> {
    vec![
        report("marina-1", HazardType::Tsunami, 13.05, 80.28, true, at, 10),
        report("marina-2", HazardType::Tsunami, 13.06, 80.29, false, at, 20),
        report("marina-3", HazardType::Tsunami, 13.04, 80.27, false, at, 30),
    ]
}

/// Config used by the reference scenario.
pub fn scenario_config() -> EngineConfig {
    EngineConfig {
        min_reports_for_hotspot: 2,
        max_radius_km: 50.0,
        ..EngineConfig::default()
    }
}

/// Bounds that must hold for every registered hotspot after any cycle.
pub fn assert_hotspot_bounds(hotspot: &Hotspot, config: &EngineConfig) {
    assert!(
        (0.0..=MAX_INTENSITY).contains(&hotspot.intensity),
        "intensity {} out of range for {}",
        hotspot.intensity,
        hotspot.id
    );
    let min_radius = MIN_HOTSPOT_RADIUS_KM.min(config.max_radius_km);
    assert!(
        hotspot.radius_km >= min_radius && hotspot.radius_km <= config.max_radius_km,
        "radius {} out of range for {}",
        hotspot.radius_km,
        hotspot.id
    );
    assert!(hotspot.verified_report_count <= hotspot.report_count);
    assert_eq!(hotspot.report_ids.len(), hotspot.report_count);
    assert!(hotspot.risk_score.is_finite());
}

/// Every report listed on `hotspot` shares its hazard type and lies within
/// `max_radius_km` of its center.
pub fn assert_membership(hotspot: &Hotspot, reports: &[Report], max_radius_km: f64) {
    for id in &hotspot.report_ids {
        let Some(member) = reports.iter().find(|r| &r.id == id) else {
            panic!("hotspot {} lists unknown report {id}", hotspot.id);
        };
        assert_eq!(member.hazard_type, hotspot.hazard_type);
        let d = distance_km(member.location, hotspot.center);
        assert!(
            d <= max_radius_km + 1e-9,
            "report {id} is {d} km from center of {}",
            hotspot.id
        );
    }
}
