//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed the engine was built with.
//!
//! Each consumer (updater or generator) owns one stream, seeded from
//! (master_seed XOR slot_index * golden-ratio constant). This means:
//!   - Adding a new updater never changes existing streams.
//!   - Each stream is fully reproducible in isolation.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream.
pub struct StreamRng {
    name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Zero-centred noise: (u - 0.5) * span, so in [-span/2, span/2).
    pub fn centered(&mut self, span: f64) -> f64 {
        (self.next_f64() - 0.5) * span
    }
}

/// Hands out streams for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// A fresh stream for `slot`. Streams are per-tick: the tick number
    /// is folded in so that replaying tick N never depends on how many
    /// draws earlier ticks made.
    pub fn for_slot(&self, slot: StreamSlot, tick: u64) -> StreamRng {
        let seed = self.master_seed ^ tick.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        StreamRng::new(seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    SponsorNoise = 0,
    MetricsNoise = 1,
    Heatmap = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SponsorNoise => "sponsor_noise",
            Self::MetricsNoise => "metrics_noise",
            Self::Heatmap => "heatmap",
        }
    }
}
