//! Live updater trait.
//!
//! RULE: Every source of "live" motion implements LiveUpdater.
//! The engine calls update() on each registered updater
//! in registration order, every tick.

use crate::{
    error::DashResult,
    event::DashEvent,
    rng::StreamRng,
    seed::SeedData,
    types::Tick,
};
use std::any::Any;

/// The contract every updater must fulfill.
pub trait LiveUpdater: Send {
    /// Unique stable name for this updater.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `tick`:      the current tick number
    /// - `events_in`: events emitted by earlier updaters this tick
    /// - `data`:      the live data set, mutated in place
    /// - `rng`:       this updater's deterministic stream for this tick
    ///
    /// Returns one event per field it changed.
    fn update(
        &mut self,
        tick: Tick,
        events_in: &[DashEvent],
        data: &mut SeedData,
        rng: &mut StreamRng,
    ) -> DashResult<Vec<DashEvent>>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
