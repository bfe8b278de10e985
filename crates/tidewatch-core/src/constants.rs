//! Engine constants. Distances are in kilometres, durations in hours,
//! intensities on the 0–10 hotspot scale.

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Smallest radius a hotspot can report, also used for single-point clusters.
pub const MIN_HOTSPOT_RADIUS_KM: f64 = 5.0;

/// Buffer applied to the farthest member distance when sizing a hotspot.
pub const RADIUS_BUFFER: f64 = 1.2;

/// Fixed radius of hotspots built only from social signals.
///
/// Social posts are geolocated at city or district granularity, so the
/// enclosing radius of their coordinates is not meaningful.
pub const SOCIAL_HOTSPOT_RADIUS_KM: f64 = 20.0;

/// Minimum number of social signals needed to form a cluster.
pub const MIN_SOCIAL_CLUSTER_SIZE: usize = 2;

/// Window within which a report counts as recent for intensity.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Intensity contribution of each recent report.
pub const RECENT_REPORT_WEIGHT: f64 = 0.5;

/// Divisor applied to the raw report intensity before clamping.
pub const REPORT_INTENSITY_DIVISOR: f64 = 2.0;

/// Confidence at or above which a social signal counts as high-confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Intensity contribution of each high-confidence social signal.
pub const HIGH_CONFIDENCE_WEIGHT: f64 = 0.5;

/// Intensity contribution of each critical-urgency social signal.
pub const CRITICAL_URGENCY_WEIGHT: f64 = 1.0;

/// Lower clamp for freshly built hotspots.
pub const MIN_BUILD_INTENSITY: f64 = 1.0;

/// Upper bound on intensity everywhere.
pub const MAX_INTENSITY: f64 = 10.0;

/// Hotspots whose decayed intensity falls below this are evicted.
pub const EVICTION_INTENSITY: f64 = 1.0;

// --- Risk scoring ---

/// Score per intensity point.
pub const SCORE_INTENSITY_WEIGHT: f64 = 10.0;
/// Score per verified report.
pub const SCORE_VERIFIED_WEIGHT: f64 = 20.0;
/// Score per report per kilometre of radius.
pub const SCORE_DENSITY_WEIGHT: f64 = 15.0;
/// Score per social media mention.
pub const SCORE_SOCIAL_WEIGHT: f64 = 2.0;
/// Radius floor used by the density term to avoid blowing up tiny hotspots.
pub const SCORE_MIN_DENSITY_RADIUS_KM: f64 = 1.0;

/// Score at or above which a hotspot is critical and raises an early warning.
pub const CRITICAL_SCORE: f64 = 200.0;
/// Score at or above which a hotspot is high risk.
pub const HIGH_SCORE: f64 = 100.0;
/// Score at or above which a hotspot is medium risk.
pub const MEDIUM_SCORE: f64 = 50.0;

// --- Configuration defaults ---

pub const DEFAULT_MIN_REPORTS_FOR_HOTSPOT: usize = 3;
pub const DEFAULT_MAX_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_DECAY_FACTOR: f64 = 0.1;
pub const DEFAULT_SOCIAL_MEDIA_WEIGHT: f64 = 0.3;
pub const DEFAULT_VERIFICATION_BONUS: f64 = 3.5;
