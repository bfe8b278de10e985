//! Fusion of social signal clusters with report hotspots.
//!
//! A social cluster reinforces the first report hotspot built in the same
//! cycle that has the same hazard type and whose radius covers the social
//! centroid. Hotspots from earlier cycles are not candidates. Unmatched
//! clusters become social-only hotspots.

use chrono::{DateTime, Utc};
use tidewatch_core::constants::MAX_INTENSITY;
use tidewatch_core::geo::distance_km;
use tidewatch_core::types::{Hotspot, SocialSignal};
use tidewatch_core::EngineConfig;
use tracing::debug;

use crate::builder::build_social_hotspot;
use crate::cluster::Cluster;

#[derive(Debug, Clone, Default)]
pub struct FusionOutcome {
    /// Social clusters folded into an existing report hotspot.
    pub merged: usize,
    /// Social-only hotspots created for unmatched clusters.
    pub created: Vec<Hotspot>,
}

/// Index of the first hotspot that covers `cluster`'s centroid.
fn find_coincident(hotspots: &[Hotspot], cluster: &Cluster<'_, SocialSignal>) -> Option<usize> {
    hotspots.iter().position(|h| {
        h.hazard_type == cluster.hazard_type
            && distance_km(h.center, cluster.centroid) <= h.radius_km
    })
}

/// Attach a social cluster to `hotspot`.
pub fn merge_into(
    hotspot: &mut Hotspot,
    cluster: &Cluster<'_, SocialSignal>,
    social_media_weight: f64,
    now: DateTime<Utc>,
) {
    let size = cluster.len();
    hotspot.social_media_mentions += size;
    hotspot
        .signal_ids
        .extend(cluster.member_ids().into_iter().map(str::to_string));
    hotspot.intensity = (hotspot.intensity + size as f64 * social_media_weight).min(MAX_INTENSITY);
    hotspot.last_updated = now;
}

/// Merge each social cluster into `report_hotspots` or build a social-only
/// hotspot for it.
pub fn fuse_social_clusters(
    report_hotspots: &mut [Hotspot],
    social_clusters: &[Cluster<'_, SocialSignal>],
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> FusionOutcome {
    let mut outcome = FusionOutcome::default();

    for cluster in social_clusters {
        match find_coincident(report_hotspots, cluster) {
            Some(idx) => {
                let hotspot = &mut report_hotspots[idx];
                merge_into(hotspot, cluster, config.social_media_weight, now);
                debug!(
                    hotspot = %hotspot.id.short(),
                    signals = cluster.len(),
                    intensity = hotspot.intensity,
                    "fusion: social cluster merged"
                );
                outcome.merged += 1;
            }
            None => {
                let hotspot = build_social_hotspot(cluster, config, now);
                debug!(
                    hotspot = %hotspot.id.short(),
                    hazard = %hotspot.hazard_type,
                    signals = cluster.len(),
                    "fusion: social-only hotspot created"
                );
                outcome.created.push(hotspot);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_report_hotspot;
    use crate::cluster::cluster_observations;
    use chrono::Duration;
    use tidewatch_core::constants::{MIN_SOCIAL_CLUSTER_SIZE, SOCIAL_HOTSPOT_RADIUS_KM};
    use tidewatch_core::types::{GeoPoint, HazardType, Report, Urgency};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn report(id: &str, hazard: HazardType, lat: f64, lng: f64) -> Report {
        Report {
            id: id.to_string(),
            hazard_type: hazard,
            location: GeoPoint::new(lat, lng),
            timestamp: now() - Duration::hours(1),
            verified: false,
        }
    }

    fn signal(id: &str, hazard: HazardType, lat: f64, lng: f64) -> SocialSignal {
        SocialSignal {
            id: id.to_string(),
            is_hazard_related: true,
            hazard_type: hazard,
            confidence: 0.6,
            urgency: Urgency::Medium,
            location: Some(GeoPoint::new(lat, lng)),
            timestamp: now(),
        }
    }

    fn built(reports: &[Report], cfg: &EngineConfig) -> Vec<Hotspot> {
        cluster_observations(reports, cfg.max_radius_km, cfg.min_reports_for_hotspot)
            .iter()
            .map(|c| build_report_hotspot(c, cfg, now()))
            .collect()
    }

    fn cfg() -> EngineConfig {
        EngineConfig {
            min_reports_for_hotspot: 2,
            social_media_weight: 0.5,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn coincident_social_cluster_merges() {
        let cfg = cfg();
        let reports = vec![
            report("r1", HazardType::Flooding, 13.05, 80.28),
            report("r2", HazardType::Flooding, 13.06, 80.29),
        ];
        let mut hotspots = built(&reports, &cfg);
        let before = hotspots[0].intensity;

        let signals = vec![
            signal("s1", HazardType::Flooding, 13.05, 80.28),
            signal("s2", HazardType::Flooding, 13.055, 80.285),
            signal("s3", HazardType::Flooding, 13.06, 80.28),
        ];
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        let outcome = fuse_social_clusters(&mut hotspots, &social, &cfg, now());

        assert_eq!(outcome.merged, 1);
        assert!(outcome.created.is_empty());
        let h = &hotspots[0];
        assert_eq!(h.social_media_mentions, 3);
        assert_eq!(h.signal_ids, vec!["s1", "s2", "s3"]);
        assert!((h.intensity - (before + 1.5)).abs() < 1e-9);
        assert_eq!(h.last_updated, now());
    }

    #[test]
    fn merge_boost_capped_at_ten() {
        let cfg = cfg();
        let reports = vec![
            report("r1", HazardType::Flooding, 13.05, 80.28),
            report("r2", HazardType::Flooding, 13.06, 80.29),
        ];
        let mut hotspots = built(&reports, &cfg);
        hotspots[0].intensity = 9.5;

        let signals: Vec<SocialSignal> = (0..10)
            .map(|i| signal(&format!("s{i}"), HazardType::Flooding, 13.05, 80.28))
            .collect();
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        fuse_social_clusters(&mut hotspots, &social, &cfg, now());
        assert_eq!(hotspots[0].intensity, MAX_INTENSITY);
    }

    #[test]
    fn distant_social_cluster_creates_social_only_hotspot() {
        let cfg = cfg();
        let reports = vec![
            report("r1", HazardType::Flooding, 13.05, 80.28),
            report("r2", HazardType::Flooding, 13.06, 80.29),
        ];
        let mut hotspots = built(&reports, &cfg);

        let signals = vec![
            signal("s1", HazardType::Flooding, 15.0, 81.0),
            signal("s2", HazardType::Flooding, 15.01, 81.01),
        ];
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        let outcome = fuse_social_clusters(&mut hotspots, &social, &cfg, now());

        assert_eq!(outcome.merged, 0);
        assert_eq!(outcome.created.len(), 1);
        let created = &outcome.created[0];
        assert!(created.is_social_only());
        assert_eq!(created.radius_km, SOCIAL_HOTSPOT_RADIUS_KM);
        assert_eq!(hotspots[0].social_media_mentions, 0);
    }

    #[test]
    fn different_hazard_does_not_merge() {
        let cfg = cfg();
        let reports = vec![
            report("r1", HazardType::Flooding, 13.05, 80.28),
            report("r2", HazardType::Flooding, 13.06, 80.29),
        ];
        let mut hotspots = built(&reports, &cfg);

        let signals = vec![
            signal("s1", HazardType::Cyclone, 13.05, 80.28),
            signal("s2", HazardType::Cyclone, 13.05, 80.28),
        ];
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        let outcome = fuse_social_clusters(&mut hotspots, &social, &cfg, now());

        assert_eq!(outcome.merged, 0);
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].hazard_type, HazardType::Cyclone);
    }

    #[test]
    fn first_covering_hotspot_wins() {
        let cfg = cfg();
        let mut hotspots = built(
            &[
                report("a1", HazardType::Flooding, 13.05, 80.28),
                report("a2", HazardType::Flooding, 13.05, 80.28),
            ],
            &cfg,
        );
        hotspots.extend(built(
            &[
                report("b1", HazardType::Flooding, 13.06, 80.28),
                report("b2", HazardType::Flooding, 13.06, 80.28),
            ],
            &cfg,
        ));
        assert_eq!(hotspots.len(), 2);

        let signals = vec![
            signal("s1", HazardType::Flooding, 13.055, 80.28),
            signal("s2", HazardType::Flooding, 13.055, 80.28),
        ];
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        fuse_social_clusters(&mut hotspots, &social, &cfg, now());

        assert_eq!(hotspots[0].social_media_mentions, 2);
        assert_eq!(hotspots[1].social_media_mentions, 0);
    }

    #[test]
    fn no_report_hotspots_means_all_social_only() {
        let cfg = cfg();
        let mut hotspots: Vec<Hotspot> = Vec::new();
        let signals = vec![
            signal("s1", HazardType::Tsunami, 13.05, 80.28),
            signal("s2", HazardType::Tsunami, 13.05, 80.28),
            signal("s3", HazardType::Cyclone, 13.05, 80.28),
            signal("s4", HazardType::Cyclone, 13.05, 80.28),
        ];
        let social = cluster_observations(&signals, cfg.max_radius_km, MIN_SOCIAL_CLUSTER_SIZE);
        let outcome = fuse_social_clusters(&mut hotspots, &social, &cfg, now());
        assert_eq!(outcome.created.len(), 2);
    }
}
