use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{MAX_PERIOD_SECS, MIN_PERIOD_SECS};
use crate::types::Tick;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SponsorNoiseConfig {
    /// Span of the shared variance draw, (u - 0.5) * span.
    pub variance_span: f64,
    /// Multiplier applied to the variance for fulfillment moves.
    pub fulfillment_scale: f64,
    /// Multiplier applied to the variance for impression moves.
    pub impressions_scale: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsNoiseConfig {
    /// Upper bound of the per-tick revenue increment, uniform(0, k).
    pub revenue_increment_max: f64,
    /// Span of the utilization walk, (u - 0.5) * span.
    pub utilization_span: f64,
    pub utilization_min: f64,
    pub utilization_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeywordBonus {
    /// Substring matched against the facility name.
    pub keyword: String,
    pub hour_from: u32,
    pub hour_to: u32,
    pub bonus: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapConfig {
    pub facilities: Vec<String>,
    pub first_hour: u32,
    pub hour_count: u32,
    pub base_usage: f64,
    /// Inclusive hour ranges that count as primetime.
    pub primetime_hours: Vec<(u32, u32)>,
    pub primetime_bonus: f64,
    /// Day indices (0 = Monday) from which the weekend bonus applies.
    pub weekend_from_day: usize,
    pub weekend_bonus: f64,
    /// First matching keyword wins.
    pub keyword_bonuses: Vec<KeywordBonus>,
    pub noise_span: f64,
    pub usage_min: f64,
    pub usage_max: f64,
    pub revenue_rate_min: f64,
    pub revenue_rate_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertConfig {
    pub renewal_window_days: i64,
    pub expansion_usage: f64,
    pub monitor_usage: f64,
    pub low_usage: f64,
}

/// How much history the in-memory store keeps. Zero disables a bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Ticks of event log kept behind the current tick.
    pub event_ticks: Tick,
    /// Most recent snapshots kept.
    pub max_snapshots: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            event_ticks: 240, // two simulated hours at 30 s ticks
            max_snapshots: 24,
        }
    }
}

/// All engine parameters. Loaded once; never mutated during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    pub period_secs: u32,
    pub start_time: DateTime<Utc>,
    pub snapshot_interval: Tick,
    pub sponsor_noise: SponsorNoiseConfig,
    pub metrics_noise: MetricsNoiseConfig,
    pub heatmap: HeatmapConfig,
    pub alerts: AlertConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

impl DashboardConfig {
    /// Load from `<data_dir>/dashboard.json`.
    /// In tests, use DashboardConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Like load(), but falls back to the defaults when the file is absent.
    pub fn load_or_default(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/dashboard.json");
        if std::path::Path::new(&path).exists() {
            Self::load(data_dir)
        } else {
            log::info!("No {path}; using built-in dashboard config");
            Ok(Self::default_test())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_PERIOD_SECS..=MAX_PERIOD_SECS).contains(&self.period_secs) {
            anyhow::bail!(
                "period_secs must be within {MIN_PERIOD_SECS}..={MAX_PERIOD_SECS}, got {}",
                self.period_secs
            );
        }
        if self.heatmap.usage_min > self.heatmap.usage_max {
            anyhow::bail!("heatmap usage_min exceeds usage_max");
        }
        if self.heatmap.revenue_rate_min > self.heatmap.revenue_rate_max {
            anyhow::bail!("heatmap revenue_rate_min exceeds revenue_rate_max");
        }
        if self.metrics_noise.utilization_min > self.metrics_noise.utilization_max {
            anyhow::bail!("utilization_min exceeds utilization_max");
        }
        self.validate_heatmap()
    }

    fn validate_heatmap(&self) -> anyhow::Result<()> {
        let h = &self.heatmap;
        match h.first_hour.checked_add(h.hour_count) {
            Some(end) if end <= 24 => {}
            _ => anyhow::bail!(
                "heatmap hours {}+{} run past midnight",
                h.first_hour,
                h.hour_count
            ),
        }
        if h.weekend_from_day > 7 {
            anyhow::bail!("weekend_from_day must be 0..=7, got {}", h.weekend_from_day);
        }
        if let Some((from, to)) = h.primetime_hours.iter().find(|(from, to)| from > to) {
            anyhow::bail!("primetime range {from}..={to} is reversed");
        }
        if let Some(kb) = h.keyword_bonuses.iter().find(|kb| kb.hour_from > kb.hour_to) {
            anyhow::bail!(
                "keyword bonus '{}' range {}..={} is reversed",
                kb.keyword,
                kb.hour_from,
                kb.hour_to
            );
        }
        Ok(())
    }

    /// Defaults matching the built-in dashboards.
    pub fn default_test() -> Self {
        let facilities = [
            "Main Dome",
            "Basketball Court 1",
            "Basketball Court 2",
            "Basketball Court 3",
            "Basketball Court 4",
            "Outdoor Field A",
            "Outdoor Field B",
            "Outdoor Field C",
            "Outdoor Field D",
            "Walking Track",
            "Wellness Center",
            "Esports Arena",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            period_secs: 30,
            start_time: Utc
                .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
                .single()
                .unwrap_or_default(),
            snapshot_interval: 120, // hourly at 30 s ticks
            sponsor_noise: SponsorNoiseConfig {
                variance_span: 0.1,
                fulfillment_scale: 5.0,
                impressions_scale: 0.2,
            },
            metrics_noise: MetricsNoiseConfig {
                revenue_increment_max: 2000.0,
                utilization_span: 2.0,
                utilization_min: 65.0,
                utilization_max: 95.0,
            },
            heatmap: HeatmapConfig {
                facilities,
                first_hour: 6,
                hour_count: 16,
                base_usage: 30.0,
                primetime_hours: vec![(17, 21), (7, 9)],
                primetime_bonus: 40.0,
                weekend_from_day: 5,
                weekend_bonus: 20.0,
                keyword_bonuses: vec![
                    KeywordBonus {
                        keyword: "Basketball".into(),
                        hour_from: 18,
                        hour_to: 21,
                        bonus: 30.0,
                    },
                    KeywordBonus {
                        keyword: "Field".into(),
                        hour_from: 16,
                        hour_to: 20,
                        bonus: 25.0,
                    },
                ],
                noise_span: 30.0,
                usage_min: 10.0,
                usage_max: 100.0,
                revenue_rate_min: 25.0,
                revenue_rate_max: 75.0,
            },
            alerts: AlertConfig {
                renewal_window_days: 90,
                expansion_usage: 85.0,
                monitor_usage: 75.0,
                low_usage: 40.0,
            },
            retention: RetentionConfig::default(),
        }
    }
}
