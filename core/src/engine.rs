//! The dashboard engine — seed data, live updates, and the event log.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Sponsor noise updater
//!   2. Metrics noise updater
//!
//! RULES:
//!   - Updaters execute in registration order, every tick.
//!   - All randomness flows through the RngBank.
//!   - Every mutation is recorded in the event log, which keeps a
//!     trailing window of ticks (RetentionConfig).
//!   - The heatmap grid is generated once in build() and never mutated.

use crate::{
    alerts::{self, Alert},
    clock::LiveClock,
    config::DashboardConfig,
    error::{DashError, DashResult},
    event::{DashEvent, EventLogEntry},
    heatmap::{self, UsageSample},
    metrics_noise_updater::MetricsNoiseUpdater,
    rng::{RngBank, StreamSlot},
    seed::SeedData,
    snapshot::DashSnapshot,
    sponsor_noise_updater::SponsorNoiseUpdater,
    store::DashStore,
    types::{RunId, Tick},
    updater::LiveUpdater,
    view::{self, View, ViewKind},
};

pub struct DashboardEngine {
    pub run_id:   RunId,
    pub clock:    LiveClock,
    pub rng_bank: RngBank,
    pub config:   DashboardConfig,
    pub store:    DashStore,
    heatmap:      Vec<UsageSample>,
    updaters:     Vec<(StreamSlot, Box<dyn LiveUpdater>)>,
}

impl DashboardEngine {
    /// Bare engine with no updaters registered and no heatmap.
    pub fn new(run_id: RunId, seed: u64, config: DashboardConfig, data: SeedData) -> Self {
        Self {
            clock:    LiveClock::new(run_id.clone(), config.start_time, config.period_secs),
            rng_bank: RngBank::new(seed),
            store:    DashStore::new(data, config.retention),
            config,
            heatmap:  Vec::new(),
            updaters: Vec::new(),
            run_id,
        }
    }

    /// Build a fully wired engine: heatmap generated, updaters registered,
    /// RunInitialized logged at tick 0.
    pub fn build(
        run_id: RunId,
        seed: u64,
        config: DashboardConfig,
        data: SeedData,
    ) -> DashResult<Self> {
        config
            .validate()
            .map_err(|e| DashError::InvalidConfig { reason: e.to_string() })?;
        let mut engine = DashboardEngine::new(run_id, seed, config, data);

        let mut heatmap_rng = engine.rng_bank.for_slot(StreamSlot::Heatmap, 0);
        engine.heatmap = heatmap::generate(&engine.config.heatmap, &mut heatmap_rng);

        // EXECUTION ORDER — fixed, documented, never reordered.
        engine.register(
            StreamSlot::SponsorNoise,
            Box::new(SponsorNoiseUpdater::new(engine.config.sponsor_noise.clone())),
        );
        engine.register(
            StreamSlot::MetricsNoise,
            Box::new(MetricsNoiseUpdater::new(engine.config.metrics_noise.clone())),
        );

        let init = DashEvent::RunInitialized {
            run_id: engine.run_id.clone(),
            seed,
            heatmap_samples: engine.heatmap.len(),
        };
        engine.log_event(0, "engine", &init)?;

        log::info!(
            "engine built: run={} seed={seed} sponsors={} heatmap_samples={}",
            engine.run_id,
            engine.store.data.sponsors.len(),
            engine.heatmap.len()
        );
        Ok(engine)
    }

    /// Built-in seed data and default config. Used by tests.
    pub fn build_test(run_id: RunId, seed: u64) -> DashResult<Self> {
        Self::build(run_id, seed, DashboardConfig::default_test(), SeedData::builtin())
    }

    /// Register an updater. Call in the documented execution order.
    pub fn register(&mut self, slot: StreamSlot, updater: Box<dyn LiveUpdater>) {
        self.updaters.push((slot, updater));
    }

    /// Advance one tick. This is the core live-update step.
    pub fn tick(&mut self) -> DashResult<Vec<DashEvent>> {
        assert!(!self.clock.paused, "tick() called on paused engine");

        let current_tick = self.clock.advance();
        let mut tick_events = vec![DashEvent::TickStarted { tick: current_tick }];

        // Each updater sees all events emitted so far this tick.
        for (slot, updater) in &mut self.updaters {
            let mut rng = self.rng_bank.for_slot(*slot, current_tick);
            log::trace!(
                "tick={current_tick} running {} on stream {}",
                updater.name(),
                rng.name()
            );
            let new_events =
                updater.update(current_tick, &tick_events, &mut self.store.data, &mut rng)?;

            for event in &new_events {
                let entry = EventLogEntry {
                    id:         None,
                    run_id:     self.run_id.clone(),
                    tick:       current_tick,
                    source:     updater.name().to_string(),
                    event_type: event.type_name().to_string(),
                    payload:    serde_json::to_string(event)?,
                };
                self.store.append_event(entry);
            }

            tick_events.extend(new_events);
        }

        tick_events.push(DashEvent::TickCompleted { tick: current_tick });
        self.store.prune_events(current_tick);

        if self.config.snapshot_interval > 0
            && current_tick.is_multiple_of(self.config.snapshot_interval)
        {
            let json = serde_json::to_string(&self.snapshot())?;
            self.store.save_snapshot(current_tick, json);
            log::debug!("Snapshot saved at tick {current_tick}");
        }

        Ok(tick_events)
    }

    /// Run n ticks in a loop. Used for testing and the runner.
    pub fn run_ticks(&mut self, n: u64) -> DashResult<()> {
        self.clock.resume();
        for _ in 0..n {
            self.tick()?;
        }
        self.clock.pause();
        Ok(())
    }

    pub fn data(&self) -> &SeedData {
        &self.store.data
    }

    pub fn heatmap(&self) -> &[UsageSample] {
        &self.heatmap
    }

    pub fn events_for_tick(&self, tick: Tick) -> Vec<EventLogEntry> {
        self.store.events_for_tick(&self.run_id, tick)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        alerts::collect(
            &self.store.data.sponsors,
            &self.heatmap,
            self.clock.now,
            &self.config.alerts,
        )
    }

    pub fn snapshot(&self) -> DashSnapshot {
        DashSnapshot {
            run_id:  self.run_id.clone(),
            seed:    self.rng_bank.master_seed(),
            tick:    self.clock.current_tick,
            clock:   self.clock.clone(),
            data:    self.store.data.clone(),
            heatmap: self.heatmap.clone(),
        }
    }

    pub fn render(&self, kind: ViewKind) -> View {
        view::render(kind, self)
    }

    /// Render a view by its name ("dashboard", "sponsors", ...).
    pub fn render_named(&self, name: &str) -> DashResult<View> {
        self.render_search(name, None)
    }

    /// Render a view by name with an optional sponsor search applied.
    pub fn render_search(&self, name: &str, query: Option<&str>) -> DashResult<View> {
        let kind: ViewKind = name
            .parse()
            .map_err(|_| DashError::UnknownView { name: name.to_string() })?;
        Ok(view::render_with_query(kind, self, query))
    }

    fn log_event(&mut self, tick: Tick, source: &str, event: &DashEvent) -> DashResult<()> {
        let entry = EventLogEntry {
            id:         None,
            run_id:     self.run_id.clone(),
            tick,
            source:     source.to_string(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(entry);
        Ok(())
    }
}
