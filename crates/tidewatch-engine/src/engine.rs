//! Cycle orchestration.
//!
//! [`HotspotEngine`] owns the [`HotspotRegistry`] behind a mutex and the live
//! [`EngineConfig`] behind a `RwLock<Arc<_>>`. A cycle takes one config
//! snapshot, then holds the registry lock from decay through scoring, so
//! concurrent callers observe whole cycles only. Config updates swap the
//! `Arc` and take effect from the next cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use tidewatch_core::constants::MIN_SOCIAL_CLUSTER_SIZE;
use tidewatch_core::traits::RiskModel;
use tidewatch_core::types::{Hotspot, Report, RiskLevel, SocialSignal};
use tidewatch_core::{ConfigUpdate, EngineConfig};

use crate::builder::build_report_hotspot;
use crate::cluster::cluster_observations;
use crate::decay::apply_decay;
use crate::fusion::fuse_social_clusters;
use crate::registry::HotspotRegistry;
use crate::risk::CompositeRiskScorer;

/// Counts describing what one cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Hotspots that had elapsed time charged against them.
    pub decayed: usize,
    /// Hotspots evicted after decay.
    pub evicted: usize,
    /// Report hotspots built this cycle, one per cluster that met the
    /// minimum size.
    pub built: usize,
    /// Social clusters merged into a report hotspot.
    pub merged: usize,
    /// Social-only hotspots created.
    pub social_created: usize,
    /// Early warnings raised for the first time.
    pub early_warnings: usize,
    /// Registry size after the cycle.
    pub active: usize,
}

pub struct HotspotEngine<R = CompositeRiskScorer> {
    config: RwLock<Arc<EngineConfig>>,
    registry: Mutex<HotspotRegistry>,
    risk_model: R,
}

impl HotspotEngine<CompositeRiskScorer> {
    /// Engine with the composite risk model.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_risk_model(config, CompositeRiskScorer::new())
    }
}

impl Default for HotspotEngine<CompositeRiskScorer> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<R: RiskModel> HotspotEngine<R> {
    pub fn with_risk_model(config: EngineConfig, risk_model: R) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            registry: Mutex::new(HotspotRegistry::new()),
            risk_model,
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<EngineConfig> {
        self.config.read().clone()
    }

    /// Merge `update` into the live configuration and return the new value.
    ///
    /// No range checks happen here; see [`EngineConfig::validate`].
    pub fn update_config(&self, update: &ConfigUpdate) -> Arc<EngineConfig> {
        let mut guard = self.config.write();
        let next = Arc::new(guard.merged(update));
        *guard = Arc::clone(&next);
        info!(
            min_reports = next.min_reports_for_hotspot,
            max_radius_km = next.max_radius_km,
            decay_factor = next.decay_factor,
            social_media_weight = next.social_media_weight,
            verification_bonus = next.verification_bonus,
            "engine config updated"
        );
        next
    }

    /// Run one cycle at the current wall-clock time and return every
    /// registered hotspot, most severe first.
    pub fn generate_hotspots(&self, reports: &[Report], signals: &[SocialSignal]) -> Vec<Hotspot> {
        self.generate_hotspots_at(reports, signals, Utc::now())
    }

    pub fn generate_hotspots_at(
        &self,
        reports: &[Report],
        signals: &[SocialSignal],
        now: DateTime<Utc>,
    ) -> Vec<Hotspot> {
        self.run_cycle_at(reports, signals, now).0
    }

    /// Run one full cycle at `now`.
    ///
    /// Order: decay and evict, cluster and build report hotspots, cluster
    /// and fuse social signals, upsert, then rescore the whole registry.
    pub fn run_cycle_at(
        &self,
        reports: &[Report],
        signals: &[SocialSignal],
        now: DateTime<Utc>,
    ) -> (Vec<Hotspot>, CycleSummary) {
        let config = self.config();
        let mut registry = self.registry.lock();
        let mut summary = CycleSummary::default();

        debug!(
            reports = reports.len(),
            signals = signals.len(),
            active = registry.len(),
            "cycle started"
        );

        let decay = apply_decay(&mut registry, config.decay_factor, now);
        summary.decayed = decay.decayed;
        summary.evicted = decay.evicted.len();

        let report_clusters =
            cluster_observations(reports, config.max_radius_km, config.min_reports_for_hotspot);
        let mut built: Vec<Hotspot> = report_clusters
            .iter()
            .map(|cluster| build_report_hotspot(cluster, &config, now))
            .collect();
        summary.built = built.len();

        let social_clusters = cluster_observations(
            signals.iter().filter(|s| s.is_clusterable()),
            config.max_radius_km,
            MIN_SOCIAL_CLUSTER_SIZE,
        );
        let fusion = fuse_social_clusters(&mut built, &social_clusters, &config, now);
        summary.merged = fusion.merged;
        summary.social_created = fusion.created.len();

        for hotspot in built.into_iter().chain(fusion.created) {
            registry.upsert(hotspot);
        }

        for hotspot in registry.iter_mut() {
            if self.risk_model.assess(hotspot) {
                summary.early_warnings += 1;
                warn!(
                    hotspot = %hotspot.id.short(),
                    hazard = %hotspot.hazard_type,
                    lat = hotspot.center.lat,
                    lng = hotspot.center.lng,
                    score = hotspot.risk_score,
                    "early warning issued"
                );
            }
        }

        summary.active = registry.len();
        info!(
            decayed = summary.decayed,
            evicted = summary.evicted,
            built = summary.built,
            merged = summary.merged,
            social_created = summary.social_created,
            early_warnings = summary.early_warnings,
            active = summary.active,
            "cycle complete"
        );

        (registry.list_all(), summary)
    }

    /// Hotspots currently in the critical tier.
    pub fn critical_hotspots(&self) -> Vec<Hotspot> {
        self.registry.lock().critical()
    }

    pub fn hotspots_by_risk_level(&self, level: RiskLevel) -> Vec<Hotspot> {
        self.registry.lock().list_by_risk_level(level)
    }

    /// Every registered hotspot, most severe first.
    pub fn hotspots(&self) -> Vec<Hotspot> {
        self.registry.lock().list_all()
    }

    pub fn top_hotspots(&self, n: usize) -> Vec<Hotspot> {
        self.registry.lock().top_by_score(n)
    }

    pub fn len(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }
}
