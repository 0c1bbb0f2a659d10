//! Facility usage generator — the synthetic per-day, per-hour,
//! per-facility usage grid behind the heatmap view.
//!
//! Generation happens once at engine build time from the Heatmap RNG
//! stream; samples are never mutated afterwards, only re-aggregated.

use crate::{config::HeatmapConfig, rng::StreamRng};
use serde::{Deserialize, Serialize};

pub const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageSample {
    pub day:           String,
    pub day_index:     usize,
    pub hour:          u32,
    pub facility:      String,
    /// Percent, rounded; always within the configured usage bounds.
    pub usage:         f64,
    pub revenue:       f64,
    pub is_primetime:  bool,
    pub is_weekend:    bool,
}

fn in_range(hour: u32, (from, to): (u32, u32)) -> bool {
    (from..=to).contains(&hour)
}

/// Base usage before noise for one (day, hour, facility) cell.
pub fn base_usage(config: &HeatmapConfig, day_index: usize, hour: u32, facility: &str) -> f64 {
    let mut base = config.base_usage;
    if is_primetime(config, hour) {
        base += config.primetime_bonus;
    }
    if day_index >= config.weekend_from_day {
        base += config.weekend_bonus;
    }
    if let Some(kb) = config
        .keyword_bonuses
        .iter()
        .find(|kb| facility.contains(kb.keyword.as_str()))
    {
        if in_range(hour, (kb.hour_from, kb.hour_to)) {
            base += kb.bonus;
        }
    }
    base
}

pub fn is_primetime(config: &HeatmapConfig, hour: u32) -> bool {
    config.primetime_hours.iter().any(|&r| in_range(hour, r))
}

/// Generate the full grid in day → hour → facility order.
pub fn generate(config: &HeatmapConfig, rng: &mut StreamRng) -> Vec<UsageSample> {
    let hours = config.first_hour..config.first_hour.saturating_add(config.hour_count).min(24);
    let mut samples = Vec::with_capacity(DAYS.len() * hours.len() * config.facilities.len());

    for (day_index, day) in DAYS.iter().enumerate() {
        for hour in hours.clone() {
            for facility in &config.facilities {
                let base = base_usage(config, day_index, hour, facility);
                let usage = (base + rng.centered(config.noise_span))
                    .clamp(config.usage_min, config.usage_max);
                let rate = rng.uniform(config.revenue_rate_min, config.revenue_rate_max);
                samples.push(UsageSample {
                    day: (*day).to_string(),
                    day_index,
                    hour,
                    facility: facility.clone(),
                    usage: usage.round(),
                    revenue: (usage * rate).round(),
                    is_primetime: is_primetime(config, hour),
                    is_weekend: day_index >= config.weekend_from_day,
                });
            }
        }
    }

    log::debug!("heatmap: generated {} samples", samples.len());
    samples
}

// ── Aggregations ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UsageBand {
    High,
    Medium,
    Low,
}

pub fn usage_band(usage: f64) -> UsageBand {
    if usage >= 80.0 {
        UsageBand::High
    } else if usage >= 60.0 {
        UsageBand::Medium
    } else {
        UsageBand::Low
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageAverage<K> {
    pub key:         K,
    pub avg_usage:   f64,
    pub avg_revenue: f64,
    pub samples:     usize,
}

/// Group by a key, keeping first-seen key order.
fn average_by<K, F>(samples: &[UsageSample], key_of: F) -> Vec<UsageAverage<K>>
where
    K: PartialEq + Clone,
    F: Fn(&UsageSample) -> K,
{
    let mut groups: Vec<(K, f64, f64, usize)> = Vec::new();
    for s in samples {
        let key = key_of(s);
        match groups.iter_mut().find(|(k, ..)| *k == key) {
            Some((_, usage, revenue, n)) => {
                *usage += s.usage;
                *revenue += s.revenue;
                *n += 1;
            }
            None => groups.push((key, s.usage, s.revenue, 1)),
        }
    }
    groups
        .into_iter()
        .map(|(key, usage, revenue, n)| UsageAverage {
            key,
            avg_usage: usage / n as f64,
            avg_revenue: revenue / n as f64,
            samples: n,
        })
        .collect()
}

pub fn by_facility(samples: &[UsageSample]) -> Vec<UsageAverage<String>> {
    average_by(samples, |s| s.facility.clone())
}

pub fn by_hour(samples: &[UsageSample]) -> Vec<UsageAverage<u32>> {
    average_by(samples, |s| s.hour)
}

pub fn by_day(samples: &[UsageSample]) -> Vec<UsageAverage<String>> {
    average_by(samples, |s| s.day.clone())
}

/// 0 for an empty grid.
pub fn average_usage(samples: &[UsageSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.usage).sum::<f64>() / samples.len() as f64
}

/// 0 for an empty grid.
pub fn peak_usage(samples: &[UsageSample]) -> f64 {
    samples.iter().map(|s| s.usage).fold(0.0, f64::max)
}

pub fn total_revenue(samples: &[UsageSample]) -> f64 {
    samples.iter().map(|s| s.revenue).sum()
}

pub fn facility_count(samples: &[UsageSample]) -> usize {
    let mut names: Vec<&str> = samples.iter().map(|s| s.facility.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn basketball_weekend_primetime_stacks_every_bonus() {
        let config = DashboardConfig::default_test().heatmap;
        // Saturday 19:00: 30 + 40 + 20 + 30
        assert_eq!(base_usage(&config, 5, 19, "Basketball Court 2"), 120.0);
        // Tuesday 16:00 on a field: 30 + 25
        assert_eq!(base_usage(&config, 1, 16, "Outdoor Field B"), 55.0);
        // Wednesday 13:00 in the dome: base only
        assert_eq!(base_usage(&config, 2, 13, "Main Dome"), 30.0);
    }

    #[test]
    fn usage_bands() {
        assert_eq!(usage_band(80.0), UsageBand::High);
        assert_eq!(usage_band(60.0), UsageBand::Medium);
        assert_eq!(usage_band(59.9), UsageBand::Low);
    }

    #[test]
    fn empty_grid_aggregates_to_zero() {
        assert_eq!(average_usage(&[]), 0.0);
        assert_eq!(peak_usage(&[]), 0.0);
        assert_eq!(facility_count(&[]), 0);
        assert!(by_facility(&[]).is_empty());
    }
}
