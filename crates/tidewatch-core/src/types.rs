//! Core domain types: observations, hotspots and their classifications.
//!
//! Coordinates are WGS84 degrees. Timestamps are UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ObservationError;

/// A latitude/longitude pair in degrees.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

/// Coastal hazard categories reported by the field and by the classifier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Tsunami,
    Earthquake,
    Cyclone,
    StormSurge,
    Flooding,
    CoastalErosion,
    HighWaves,
    RipCurrent,
    Other,
}

impl HazardType {
    pub const ALL: [HazardType; 9] = [
        HazardType::Tsunami,
        HazardType::Earthquake,
        HazardType::Cyclone,
        HazardType::StormSurge,
        HazardType::Flooding,
        HazardType::CoastalErosion,
        HazardType::HighWaves,
        HazardType::RipCurrent,
        HazardType::Other,
    ];

    /// Multiplier applied to the composite risk score for this hazard.
    pub fn risk_multiplier(&self) -> f64 {
        match self {
            Self::Tsunami => 3.0,
            Self::Earthquake => 2.8,
            Self::Cyclone => 2.5,
            Self::StormSurge => 2.0,
            Self::Flooding => 1.5,
            Self::CoastalErosion => 1.0,
            Self::HighWaves | Self::RipCurrent | Self::Other => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tsunami => "tsunami",
            Self::Earthquake => "earthquake",
            Self::Cyclone => "cyclone",
            Self::StormSurge => "storm_surge",
            Self::Flooding => "flooding",
            Self::CoastalErosion => "coastal_erosion",
            Self::HighWaves => "high_waves",
            Self::RipCurrent => "rip_current",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardType {
    type Err = ObservationError;

    /// Accepts snake_case, kebab-case, spaced or run-together spellings,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "tsunami" => Ok(Self::Tsunami),
            "earthquake" => Ok(Self::Earthquake),
            "cyclone" => Ok(Self::Cyclone),
            "stormsurge" => Ok(Self::StormSurge),
            "flooding" | "flood" => Ok(Self::Flooding),
            "coastalerosion" => Ok(Self::CoastalErosion),
            "highwaves" => Ok(Self::HighWaves),
            "ripcurrent" => Ok(Self::RipCurrent),
            "other" => Ok(Self::Other),
            _ => Err(ObservationError::UnknownHazardType(s.to_string())),
        }
    }
}

/// Urgency tier assigned to a social post by the classifier.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl FromStr for Urgency {
    type Err = ObservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ObservationError::UnknownUrgency(s.to_string())),
        }
    }
}

/// Risk tier of a hotspot. Ordered from least to most severe.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ObservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ObservationError::UnknownRiskLevel(s.to_string())),
        }
    }
}

/// A hazard report submitted by a citizen or an official observer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Report {
    pub id: String,
    pub hazard_type: HazardType,
    pub location: GeoPoint,
    pub timestamp: DateTime<Utc>,
    /// Confirmed by an official reviewer.
    #[serde(default)]
    pub verified: bool,
}

/// Classifier output for one social media post.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SocialSignal {
    pub id: String,
    /// Whether the classifier considered the post hazard-related at all.
    pub is_hazard_related: bool,
    pub hazard_type: HazardType,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    #[serde(default)]
    pub urgency: Urgency,
    /// Resolved location, if the post could be geolocated.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub timestamp: DateTime<Utc>,
}

impl SocialSignal {
    /// Signals that can take part in clustering: hazard-related, located,
    /// and carrying a usable confidence.
    pub fn is_clusterable(&self) -> bool {
        self.is_hazard_related
            && self.confidence.is_finite()
            && self.location.is_some_and(|p| p.is_finite())
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= crate::constants::HIGH_CONFIDENCE_THRESHOLD
    }
}

/// Which kind of observation a hotspot was seeded from.
///
/// Report ids and post ids come from different systems and may collide, so
/// the source is part of the identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HotspotSource {
    Reports,
    SocialSignals,
}

impl HotspotSource {
    fn domain_tag(&self) -> &'static [u8] {
        match self {
            Self::Reports => b"report",
            Self::SocialSignals => b"social",
        }
    }
}

/// Stable 32-byte hotspot identifier, serialized as lowercase hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HotspotId(pub [u8; 32]);

impl HotspotId {
    /// Derive an identifier from the seed source, the hazard type and the
    /// seed member ids.
    ///
    /// Member order does not matter, so the same set of observations always
    /// maps to the same hotspot.
    pub fn derive<S: AsRef<str>>(
        source: HotspotSource,
        hazard_type: HazardType,
        member_ids: &[S],
    ) -> Self {
        let mut sorted: Vec<&str> = member_ids.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut hasher = blake3::Hasher::new();
        hasher.update(source.domain_tag());
        hasher.update(hazard_type.as_str().as_bytes());
        for id in sorted {
            hasher.update(&(id.len() as u64).to_le_bytes());
            hasher.update(id.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// First eight hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for HotspotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for HotspotId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for HotspotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HotspotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A geographic cluster of same-hazard observations with its risk assessment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub id: HotspotId,
    pub hazard_type: HazardType,
    pub center: GeoPoint,
    pub radius_km: f64,
    /// Always within `[0, 10]`.
    pub intensity: f64,
    pub report_count: usize,
    pub verified_report_count: usize,
    pub social_media_mentions: usize,
    pub risk_level: RiskLevel,
    /// Composite score behind `risk_level`, as of the last scoring pass.
    pub risk_score: f64,
    /// Set once the hotspot reaches the critical tier; never cleared.
    pub early_warning_issued: bool,
    pub report_ids: Vec<String>,
    pub signal_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Last time new observations were attached.
    pub last_updated: DateTime<Utc>,
    /// Point in time up to which decay has been applied.
    pub decayed_through: DateTime<Utc>,
}

impl Hotspot {
    /// Built from social signals alone, with no field reports behind it.
    pub fn is_social_only(&self) -> bool {
        self.report_count == 0
    }

    pub fn is_critical(&self) -> bool {
        self.risk_level == RiskLevel::Critical
    }
}
