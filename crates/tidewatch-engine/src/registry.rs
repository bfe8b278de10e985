//! In-memory store of active hotspots.
//!
//! Keyed by [`HotspotId`]. Listings are ordered most severe first (tier,
//! then score, then id) so snapshots are deterministic.
//!
//! An id covers the exact seed member set. Resubmitting the same reports
//! refreshes the existing entry, but a later cycle that resubmits a superset
//! (old reports plus new ones) registers a second hotspot next to the old
//! one, which keeps decaying until it is evicted.
//!
//! Not thread-safe. [`HotspotEngine`](crate::engine::HotspotEngine) owns the
//! registry behind a mutex and holds it for a whole cycle.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use tidewatch_core::types::{Hotspot, HotspotId, RiskLevel};

#[derive(Debug, Clone, Default)]
pub struct HotspotRegistry {
    hotspots: HashMap<HotspotId, Hotspot>,
}

fn severity_order(a: &Hotspot, b: &Hotspot) -> std::cmp::Ordering {
    b.risk_level
        .cmp(&a.risk_level)
        .then_with(|| OrderedFloat(b.risk_score).cmp(&OrderedFloat(a.risk_score)))
        .then_with(|| a.id.cmp(&b.id))
}

impl HotspotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    pub fn get(&self, id: &HotspotId) -> Option<&Hotspot> {
        self.hotspots.get(id)
    }

    pub fn contains(&self, id: &HotspotId) -> bool {
        self.hotspots.contains_key(id)
    }

    /// Insert or replace a hotspot by id. Returns the replaced entry.
    ///
    /// Replacing keeps the lifetime facts of the existing entry: its
    /// creation time and a raised early warning carry over.
    pub fn upsert(&mut self, mut hotspot: Hotspot) -> Option<Hotspot> {
        if let Some(existing) = self.hotspots.get(&hotspot.id) {
            hotspot.early_warning_issued |= existing.early_warning_issued;
            hotspot.created_at = hotspot.created_at.min(existing.created_at);
        }
        self.hotspots.insert(hotspot.id, hotspot)
    }

    pub fn remove(&mut self, id: &HotspotId) -> Option<Hotspot> {
        self.hotspots.remove(id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Hotspot> {
        self.hotspots.values_mut()
    }

    /// Every hotspot, most severe first.
    pub fn list_all(&self) -> Vec<Hotspot> {
        let mut all: Vec<Hotspot> = self.hotspots.values().cloned().collect();
        all.sort_by(severity_order);
        all
    }

    /// Hotspots currently at `level`, highest score first.
    pub fn list_by_risk_level(&self, level: RiskLevel) -> Vec<Hotspot> {
        let mut matching: Vec<Hotspot> = self
            .hotspots
            .values()
            .filter(|h| h.risk_level == level)
            .cloned()
            .collect();
        matching.sort_by(severity_order);
        matching
    }

    pub fn critical(&self) -> Vec<Hotspot> {
        self.list_by_risk_level(RiskLevel::Critical)
    }

    /// The `n` highest-scoring hotspots regardless of tier.
    pub fn top_by_score(&self, n: usize) -> Vec<Hotspot> {
        let mut all: Vec<&Hotspot> = self.hotspots.values().collect();
        all.sort_by(|a, b| {
            OrderedFloat(b.risk_score)
                .cmp(&OrderedFloat(a.risk_score))
                .then_with(|| a.id.cmp(&b.id))
        });
        all.into_iter().take(n).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tidewatch_core::types::{GeoPoint, HazardType};

    fn hotspot(seed: u8, level: RiskLevel, score: f64) -> Hotspot {
        let now = Utc::now();
        Hotspot {
            id: HotspotId([seed; 32]),
            hazard_type: HazardType::Flooding,
            center: GeoPoint::new(13.0, 80.0),
            radius_km: 5.0,
            intensity: 3.0,
            report_count: 3,
            verified_report_count: 0,
            social_media_mentions: 0,
            risk_level: level,
            risk_score: score,
            early_warning_issued: level == RiskLevel::Critical,
            report_ids: Vec::new(),
            signal_ids: Vec::new(),
            created_at: now,
            last_updated: now,
            decayed_through: now,
        }
    }

    #[test]
    fn upsert_inserts_and_replaces() {
        let mut reg = HotspotRegistry::new();
        assert!(reg.upsert(hotspot(1, RiskLevel::Low, 10.0)).is_none());
        assert_eq!(reg.len(), 1);

        let mut updated = hotspot(1, RiskLevel::Medium, 60.0);
        updated.intensity = 5.0;
        let previous = reg.upsert(updated).unwrap();
        assert_eq!(previous.risk_level, RiskLevel::Low);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&HotspotId([1; 32])).unwrap().intensity, 5.0);
    }

    #[test]
    fn upsert_preserves_early_warning_and_creation_time() {
        let mut reg = HotspotRegistry::new();
        let first = hotspot(7, RiskLevel::Critical, 250.0);
        let created = first.created_at;
        reg.upsert(first);

        let mut rebuilt = hotspot(7, RiskLevel::Medium, 60.0);
        rebuilt.early_warning_issued = false;
        rebuilt.created_at = created + Duration::hours(3);
        reg.upsert(rebuilt);

        let stored = reg.get(&HotspotId([7; 32])).unwrap();
        assert!(stored.early_warning_issued);
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn remove_by_id() {
        let mut reg = HotspotRegistry::new();
        reg.upsert(hotspot(1, RiskLevel::Low, 10.0));
        assert!(reg.remove(&HotspotId([1; 32])).is_some());
        assert!(reg.remove(&HotspotId([1; 32])).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn list_all_is_most_severe_first() {
        let mut reg = HotspotRegistry::new();
        reg.upsert(hotspot(1, RiskLevel::Low, 10.0));
        reg.upsert(hotspot(2, RiskLevel::Critical, 300.0));
        reg.upsert(hotspot(3, RiskLevel::High, 150.0));
        reg.upsert(hotspot(4, RiskLevel::Critical, 220.0));

        let levels: Vec<u8> = reg.list_all().iter().map(|h| h.id.0[0]).collect();
        assert_eq!(levels, vec![2, 4, 3, 1]);
    }

    #[test]
    fn list_by_risk_level_filters() {
        let mut reg = HotspotRegistry::new();
        reg.upsert(hotspot(1, RiskLevel::Low, 10.0));
        reg.upsert(hotspot(2, RiskLevel::High, 150.0));
        reg.upsert(hotspot(3, RiskLevel::High, 120.0));

        let high = reg.list_by_risk_level(RiskLevel::High);
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|h| h.risk_level == RiskLevel::High));
        assert!(reg.list_by_risk_level(RiskLevel::Medium).is_empty());
        assert!(reg.critical().is_empty());
    }

    #[test]
    fn critical_query() {
        let mut reg = HotspotRegistry::new();
        reg.upsert(hotspot(1, RiskLevel::Critical, 210.0));
        reg.upsert(hotspot(2, RiskLevel::High, 150.0));
        let critical = reg.critical();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, HotspotId([1; 32]));
    }

    #[test]
    fn top_by_score_limits_and_orders() {
        let mut reg = HotspotRegistry::new();
        reg.upsert(hotspot(1, RiskLevel::Low, 10.0));
        reg.upsert(hotspot(2, RiskLevel::High, 150.0));
        reg.upsert(hotspot(3, RiskLevel::Medium, 75.0));

        let top = reg.top_by_score(2);
        let scores: Vec<f64> = top.iter().map(|h| h.risk_score).collect();
        assert_eq!(scores, vec![150.0, 75.0]);
        assert_eq!(reg.top_by_score(10).len(), 3);
    }
}
