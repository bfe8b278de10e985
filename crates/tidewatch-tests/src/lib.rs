//! End-to-end test suite for Tidewatch.
//!
//! Integration tests drive [`tidewatch_engine::HotspotEngine`] through
//! multi-cycle scenarios and check the hotspot invariants that hold after
//! every cycle: intensity and radius bounds, decay monotonicity, eviction,
//! clustering membership and the write-once early warning.

pub mod helpers;
