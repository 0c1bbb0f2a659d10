//! Engine events — every mutation of live data is announced here.
//!
//! RULE: Updaters communicate ONLY through events.
//! An updater may never call another updater's functions directly.

use crate::types::{RecordId, RunId, Tick};
use serde::{Deserialize, Serialize};

/// Every event emitted by the engine.
/// Variants may be appended — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    RunInitialized {
        run_id: RunId,
        seed: u64,
        heatmap_samples: usize,
    },

    // ── Sponsor noise ──────────────────────────────
    SponsorFulfillmentUpdated {
        tick: Tick,
        sponsor_id: RecordId,
        old_value: f64,
        new_value: f64,
    },
    SponsorImpressionsUpdated {
        tick: Tick,
        sponsor_id: RecordId,
        old_value: u64,
        new_value: u64,
    },

    // ── Metrics noise ──────────────────────────────
    MetricsUpdated {
        tick: Tick,
        total_revenue: f64,
        facility_utilization: f64,
    },
}

impl DashEvent {
    /// Stable string name for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TickStarted { .. }               => "tick_started",
            Self::TickCompleted { .. }             => "tick_completed",
            Self::RunInitialized { .. }            => "run_initialized",
            Self::SponsorFulfillmentUpdated { .. } => "sponsor_fulfillment_updated",
            Self::SponsorImpressionsUpdated { .. } => "sponsor_impressions_updated",
            Self::MetricsUpdated { .. }            => "metrics_updated",
        }
    }
}

/// One row of the in-memory event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub run_id: RunId,
    pub tick: Tick,
    pub source: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized DashEvent
}
