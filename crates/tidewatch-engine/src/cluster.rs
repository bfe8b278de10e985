//! Greedy proximity clustering of observations.
//!
//! Single ordered pass: each unassigned observation seeds a cluster and
//! claims later unassigned observations of the same hazard type that lie
//! within `max_radius_km` of the running centroid. The centroid is recomputed
//! after every addition, so the result depends on input order. This is
//! best-effort proximity grouping, not an exact spatial partition.
//!
//! Rules:
//! 1. Members of a cluster share the seed's hazard type.
//! 2. A candidate joins only if every member, the candidate included, stays
//!    within `max_radius_km` of the updated centroid.
//! 3. Observations claimed by an undersized cluster stay assigned and are
//!    not offered to later seeds.
//! 4. Observations without a finite location never join a cluster.
//!
//! Clustering sees only the current cycle's input. Hotspot ids are derived
//! from the member set, so a cluster that grows across cycles is registered
//! as a new hotspot rather than updating the earlier one in place.

use tidewatch_core::geo::{centroid, distance_km};
use tidewatch_core::traits::Observation;
use tidewatch_core::types::{GeoPoint, HazardType};

/// A group of same-hazard observations around a centroid.
#[derive(Debug, Clone)]
pub struct Cluster<'a, T> {
    pub hazard_type: HazardType,
    pub members: Vec<&'a T>,
    pub centroid: GeoPoint,
    points: Vec<GeoPoint>,
}

impl<'a, T: Observation> Cluster<'a, T> {
    fn seed(observation: &'a T, point: GeoPoint) -> Self {
        Self {
            hazard_type: observation.hazard_type(),
            members: vec![observation],
            centroid: point,
            points: vec![point],
        }
    }

    /// Add `candidate` if the cluster stays within `max_radius_km` of its
    /// new centroid. Returns whether it was added.
    fn try_claim(&mut self, candidate: &'a T, point: GeoPoint, max_radius_km: f64) -> bool {
        if distance_km(self.centroid, point) > max_radius_km {
            return false;
        }

        self.points.push(point);
        let next = centroid(&self.points).unwrap_or(self.centroid);
        if self
            .points
            .iter()
            .any(|p| distance_km(next, *p) > max_radius_km)
        {
            self.points.pop();
            return false;
        }

        self.centroid = next;
        self.members.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member locations, in member order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn member_ids(&self) -> Vec<&'a str> {
        self.members.iter().map(|m| Observation::id(*m)).collect()
    }
}

fn finite_location<T: Observation>(observation: &T) -> Option<GeoPoint> {
    observation.location().filter(GeoPoint::is_finite)
}

/// Cluster `observations` in input order, keeping clusters of at least
/// `min_size` members (a `min_size` of 0 is treated as 1).
pub fn cluster_observations<'a, T, I>(
    observations: I,
    max_radius_km: f64,
    min_size: usize,
) -> Vec<Cluster<'a, T>>
where
    T: Observation + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let located: Vec<(&'a T, GeoPoint)> = observations
        .into_iter()
        .filter_map(|o| finite_location(o).map(|p| (o, p)))
        .collect();
    let min_size = min_size.max(1);

    let mut assigned = vec![false; located.len()];
    let mut clusters = Vec::new();

    for (i, &(seed, seed_point)) in located.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut cluster = Cluster::seed(seed, seed_point);

        for (j, &(candidate, point)) in located.iter().enumerate().skip(i + 1) {
            if assigned[j] || candidate.hazard_type() != cluster.hazard_type {
                continue;
            }
            if cluster.try_claim(candidate, point, max_radius_km) {
                assigned[j] = true;
            }
        }

        if cluster.len() >= min_size {
            clusters.push(cluster);
        }
    }

    clusters
}
