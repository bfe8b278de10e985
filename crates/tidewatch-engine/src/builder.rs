//! Hotspot construction from qualifying clusters.
//!
//! Report hotspots weigh volume, verification and recency:
//! `intensity = clamp((size + verified * bonus + recent * 0.5) / 2, 1, 10)`,
//! rounded to one decimal. Social-only hotspots weigh volume, confidence and
//! urgency and use a fixed coarse radius.

use chrono::{DateTime, Duration, Utc};
use tidewatch_core::constants::{
    CRITICAL_URGENCY_WEIGHT, HIGH_CONFIDENCE_WEIGHT, MAX_INTENSITY, MIN_BUILD_INTENSITY,
    RECENT_REPORT_WEIGHT, RECENT_WINDOW_HOURS, REPORT_INTENSITY_DIVISOR, SOCIAL_HOTSPOT_RADIUS_KM,
};
use tidewatch_core::geo::enclosing_radius_km;
use tidewatch_core::types::{
    Hotspot, HotspotId, HotspotSource, Report, RiskLevel, SocialSignal, Urgency,
};
use tidewatch_core::EngineConfig;

use crate::cluster::Cluster;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Raw report intensity before halving and clamping.
pub fn report_intensity_raw(
    size: usize,
    verified: usize,
    recent: usize,
    verification_bonus: f64,
) -> f64 {
    size as f64 + verified as f64 * verification_bonus + recent as f64 * RECENT_REPORT_WEIGHT
}

/// Raw social intensity before clamping.
pub fn social_intensity_raw(
    size: usize,
    high_confidence: usize,
    critical_urgency: usize,
    social_media_weight: f64,
) -> f64 {
    size as f64 * social_media_weight
        + high_confidence as f64 * HIGH_CONFIDENCE_WEIGHT
        + critical_urgency as f64 * CRITICAL_URGENCY_WEIGHT
}

/// Build a hotspot from a report cluster.
///
/// Risk fields are placeholders (`Medium`, score 0) until the scorer runs.
pub fn build_report_hotspot(
    cluster: &Cluster<'_, Report>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Hotspot {
    let recent_window = Duration::hours(RECENT_WINDOW_HOURS);
    let size = cluster.len();
    let verified = cluster.members.iter().filter(|r| r.verified).count();
    let recent = cluster
        .members
        .iter()
        .filter(|r| now.signed_duration_since(r.timestamp) <= recent_window)
        .count();

    let raw = report_intensity_raw(size, verified, recent, config.verification_bonus);
    let intensity = round_to_tenth(
        (raw / REPORT_INTENSITY_DIVISOR).clamp(MIN_BUILD_INTENSITY, MAX_INTENSITY),
    );
    let radius_km = enclosing_radius_km(cluster.points()).min(config.max_radius_km);

    let member_ids = cluster.member_ids();
    Hotspot {
        id: HotspotId::derive(HotspotSource::Reports, cluster.hazard_type, &member_ids),
        hazard_type: cluster.hazard_type,
        center: cluster.centroid,
        radius_km,
        intensity,
        report_count: size,
        verified_report_count: verified,
        social_media_mentions: 0,
        risk_level: RiskLevel::Medium,
        risk_score: 0.0,
        early_warning_issued: false,
        report_ids: member_ids.into_iter().map(str::to_string).collect(),
        signal_ids: Vec::new(),
        created_at: now,
        last_updated: now,
        decayed_through: now,
    }
}

/// Build a social-only hotspot from a signal cluster that matched no
/// report hotspot.
pub fn build_social_hotspot(
    cluster: &Cluster<'_, SocialSignal>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Hotspot {
    let size = cluster.len();
    let high_confidence = cluster
        .members
        .iter()
        .filter(|s| s.is_high_confidence())
        .count();
    let critical = cluster
        .members
        .iter()
        .filter(|s| s.urgency == Urgency::Critical)
        .count();

    let raw = social_intensity_raw(size, high_confidence, critical, config.social_media_weight);
    let intensity = raw.clamp(MIN_BUILD_INTENSITY, MAX_INTENSITY);

    let member_ids = cluster.member_ids();
    Hotspot {
        id: HotspotId::derive(HotspotSource::SocialSignals, cluster.hazard_type, &member_ids),
        hazard_type: cluster.hazard_type,
        center: cluster.centroid,
        radius_km: SOCIAL_HOTSPOT_RADIUS_KM.min(config.max_radius_km),
        intensity,
        report_count: 0,
        verified_report_count: 0,
        social_media_mentions: size,
        risk_level: RiskLevel::Medium,
        risk_score: 0.0,
        early_warning_issued: false,
        report_ids: Vec::new(),
        signal_ids: member_ids.into_iter().map(str::to_string).collect(),
        created_at: now,
        last_updated: now,
        decayed_through: now,
    }
}
