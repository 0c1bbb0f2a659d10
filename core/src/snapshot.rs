//! Snapshot serialization — full dashboard state to/from JSON.
//!
//! The engine keeps one every `snapshot_interval` ticks in memory and
//! can produce one on demand for the runner's IPC `snapshot` command.

use crate::{
    clock::LiveClock,
    heatmap::UsageSample,
    seed::SeedData,
    types::{RunId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashSnapshot {
    pub run_id:  RunId,
    pub seed:    u64,
    pub tick:    Tick,
    pub clock:   LiveClock,
    pub data:    SeedData,
    pub heatmap: Vec<UsageSample>,
}
