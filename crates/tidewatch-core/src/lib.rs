//! # tidewatch-core
//! Foundation types, geo math and configuration for the Tidewatch
//! hazard hotspot engine.

pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod traits;
pub mod types;
pub mod validation;

pub use config::{ConfigUpdate, EngineConfig};
pub use types::{GeoPoint, HazardType, Hotspot, HotspotId, HotspotSource, Report, RiskLevel, SocialSignal, Urgency};
