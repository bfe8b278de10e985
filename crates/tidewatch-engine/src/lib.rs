//! # tidewatch-engine: hazard hotspot detection engine.
//!
//! Turns field reports and classified social signals into geographic
//! hotspots with a risk tier. One cycle runs, in order:
//! - **Decay**: registered hotspots lose `decay_factor` intensity per elapsed
//!   hour and are evicted below 1.0.
//! - **Clustering**: greedy, order-sensitive grouping of same-hazard
//!   observations around a running centroid.
//! - **Building**: qualifying report clusters become hotspots whose
//!   intensity reflects volume, verification and recency.
//! - **Fusion**: social clusters boost a coincident report hotspot built in
//!   the same cycle, or become social-only hotspots.
//! - **Scoring**: composite score, risk tier and the write-once early warning.

pub mod builder;
pub mod cluster;
pub mod decay;
pub mod engine;
pub mod fusion;
pub mod registry;
pub mod risk;

pub use cluster::{cluster_observations, Cluster};
pub use engine::{CycleSummary, HotspotEngine};
pub use registry::HotspotRegistry;
pub use risk::CompositeRiskScorer;
