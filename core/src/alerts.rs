//! Dashboard alerts derived from renewal dates and facility usage.

use crate::{
    config::AlertConfig,
    heatmap::{self, UsageSample},
    metrics::{days_until_renewal, format_percent},
    seed::Sponsor,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RenewalDue,
    RenewalLapsed,
    CapacityExpansion,
    CapacityMonitor,
    LowUtilization,
    AllClear,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub kind:     AlertKind,
    pub priority: AlertPriority,
    pub title:    String,
    pub message:  String,
}

pub fn renewal_alerts(sponsors: &[Sponsor], now: DateTime<Utc>, window_days: i64) -> Vec<Alert> {
    sponsors
        .iter()
        .filter_map(|s| {
            let days = days_until_renewal(s.renewal, now);
            if days < 0 {
                Some(Alert {
                    kind: AlertKind::RenewalLapsed,
                    priority: AlertPriority::Medium,
                    title: "Contract Lapsed".into(),
                    message: format!("{} contract expired {} days ago", s.name, -days),
                })
            } else if days <= window_days {
                Some(Alert {
                    kind: AlertKind::RenewalDue,
                    priority: AlertPriority::High,
                    title: "Contract Renewal Alert".into(),
                    message: format!(
                        "{} contract expires in {days} days - schedule renewal meeting",
                        s.name
                    ),
                })
            } else {
                None
            }
        })
        .collect()
}

pub fn capacity_alerts(samples: &[UsageSample], config: &AlertConfig) -> Vec<Alert> {
    heatmap::by_facility(samples)
        .into_iter()
        .filter_map(|f| {
            let usage = format_percent(f.avg_usage, 1);
            if f.avg_usage > config.expansion_usage {
                Some(Alert {
                    kind: AlertKind::CapacityExpansion,
                    priority: AlertPriority::High,
                    title: "Capacity Planning".into(),
                    message: format!("{}: {usage} - Consider expansion or schedule optimization", f.key),
                })
            } else if f.avg_usage > config.monitor_usage {
                Some(Alert {
                    kind: AlertKind::CapacityMonitor,
                    priority: AlertPriority::Medium,
                    title: "Capacity Planning".into(),
                    message: format!("{}: {usage} - Monitor for peak time conflicts", f.key),
                })
            } else if f.avg_usage < config.low_usage {
                Some(Alert {
                    kind: AlertKind::LowUtilization,
                    priority: AlertPriority::Low,
                    title: "Low Utilization Alert".into(),
                    message: format!("{} showing low utilization ({usage})", f.key),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Every alert, highest priority first. Never empty: when nothing
/// fires a single all-clear notice is returned.
pub fn collect(
    sponsors: &[Sponsor],
    samples: &[UsageSample],
    now: DateTime<Utc>,
    config: &AlertConfig,
) -> Vec<Alert> {
    let mut alerts = renewal_alerts(sponsors, now, config.renewal_window_days);
    alerts.extend(capacity_alerts(samples, config));
    alerts.sort_by_key(|a| a.priority);

    if alerts.is_empty() {
        alerts.push(Alert {
            kind: AlertKind::AllClear,
            priority: AlertPriority::Info,
            title: "All Systems Optimal".into(),
            message: "No critical alerts - facilities operating within normal parameters".into(),
        });
    }
    alerts
}
