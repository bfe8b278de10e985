//! Linear intensity decay and eviction of spent hotspots.
//!
//! Each hotspot tracks `decayed_through`, the instant up to which decay has
//! already been charged. A pass charges only the time since then, so the
//! total loss over any sequence of passes spanning `T` hours is
//! `decay_factor * T` (for a constant factor), independent of how many passes
//! ran. Eviction below [`EVICTION_INTENSITY`] is the only way a hotspot leaves
//! the registry.

use chrono::{DateTime, Utc};
use tidewatch_core::constants::{EVICTION_INTENSITY, MAX_INTENSITY};
use tidewatch_core::types::HotspotId;
use tracing::debug;

use crate::registry::HotspotRegistry;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Result of one decay pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecayOutcome {
    /// Hotspots that had time charged against them.
    pub decayed: usize,
    /// Hotspots removed for falling below the eviction threshold.
    pub evicted: Vec<HotspotId>,
}

/// Hours between `from` and `to` as a fraction; negative spans count as zero.
pub fn elapsed_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = to.signed_duration_since(from).num_milliseconds();
    (millis as f64 / MILLIS_PER_HOUR).max(0.0)
}

/// `max(intensity - elapsed_hours * decay_factor, 0)`, also capped at the
/// intensity ceiling.
pub fn decayed_intensity(intensity: f64, elapsed_hours: f64, decay_factor: f64) -> f64 {
    (intensity - elapsed_hours.max(0.0) * decay_factor).clamp(0.0, MAX_INTENSITY)
}

/// Charge elapsed time to every hotspot in `registry` and evict spent ones.
pub fn apply_decay(
    registry: &mut HotspotRegistry,
    decay_factor: f64,
    now: DateTime<Utc>,
) -> DecayOutcome {
    let mut outcome = DecayOutcome::default();

    for hotspot in registry.iter_mut() {
        if now > hotspot.decayed_through {
            let hours = elapsed_hours(hotspot.decayed_through, now);
            hotspot.intensity = decayed_intensity(hotspot.intensity, hours, decay_factor);
            hotspot.decayed_through = now;
            outcome.decayed += 1;
        }
        if hotspot.intensity < EVICTION_INTENSITY {
            outcome.evicted.push(hotspot.id);
        }
    }

    for id in &outcome.evicted {
        if let Some(spent) = registry.remove(id) {
            debug!(
                hotspot = %id.short(),
                hazard = %spent.hazard_type,
                intensity = spent.intensity,
                "decay: hotspot evicted"
            );
        }
    }

    outcome
}
