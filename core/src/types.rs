//! Shared primitive types used across the dashboard engine.

/// A live-update tick. One tick = one refresh period of the dashboard.
pub type Tick = u64;

/// Stable numeric identifier for seeded records (sponsors, tasks, ...).
pub type RecordId = u32;

/// The canonical run identifier.
pub type RunId = String;
