//! Sponsorship & facility dashboard engine.
//!
//! Seed data feeds the derived metrics, which feed the view renderer;
//! each engine tick jitters a few live figures through deterministic
//! RNG streams and re-renders from the same pipeline.

pub mod alerts;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod heatmap;
pub mod metrics;
pub mod metrics_noise_updater;
pub mod rng;
pub mod seed;
pub mod snapshot;
pub mod sponsor_noise_updater;
pub mod store;
pub mod types;
pub mod updater;
pub mod view;
