//! In-memory state store.
//!
//! RULE: Only the engine mutates the store, and only inside a tick.
//! Nothing here outlives the process; the event log and snapshots
//! exist for replay checks and tooling, not persistence. Both are
//! bounded by the run's RetentionConfig and evict oldest-first.

use std::collections::VecDeque;

use crate::{
    config::RetentionConfig,
    event::EventLogEntry,
    seed::SeedData,
    types::Tick,
};

pub struct DashStore {
    pub data:      SeedData,
    retention:     RetentionConfig,
    event_log:     VecDeque<EventLogEntry>,
    next_event_id: i64,
    snapshots:     VecDeque<(Tick, String)>,
}

impl DashStore {
    pub fn new(data: SeedData, retention: RetentionConfig) -> Self {
        Self {
            data,
            retention,
            event_log: VecDeque::new(),
            next_event_id: 1,
            snapshots: VecDeque::new(),
        }
    }

    // ── Event log ──────────────────────────────────────────────

    /// Ids keep counting across evictions.
    pub fn append_event(&mut self, mut entry: EventLogEntry) {
        entry.id = Some(self.next_event_id);
        self.next_event_id += 1;
        self.event_log.push_back(entry);
    }

    pub fn events_for_tick(&self, run_id: &str, tick: Tick) -> Vec<EventLogEntry> {
        self.event_log
            .iter()
            .filter(|e| e.run_id == run_id && e.tick == tick)
            .cloned()
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.event_log.len()
    }

    /// Drop events older than `event_ticks` behind `current_tick`.
    pub fn prune_events(&mut self, current_tick: Tick) {
        let keep = self.retention.event_ticks;
        if keep == 0 {
            return;
        }
        let oldest_kept = current_tick.saturating_sub(keep - 1);
        let before = self.event_log.len();
        while self.event_log.front().is_some_and(|e| e.tick < oldest_kept) {
            self.event_log.pop_front();
        }
        let dropped = before - self.event_log.len();
        if dropped > 0 {
            log::trace!("pruned {dropped} events older than tick {oldest_kept}");
        }
    }

    // ── Snapshots ──────────────────────────────────────────────

    pub fn save_snapshot(&mut self, tick: Tick, json: String) {
        self.snapshots.push_back((tick, json));
        let max = self.retention.max_snapshots;
        while max > 0 && self.snapshots.len() > max {
            self.snapshots.pop_front();
        }
    }

    pub fn latest_snapshot(&self) -> Option<(Tick, &str)> {
        self.snapshots.back().map(|(t, s)| (*t, s.as_str()))
    }

    pub fn snapshot_ticks(&self) -> Vec<Tick> {
        self.snapshots.iter().map(|(t, _)| *t).collect()
    }
}
