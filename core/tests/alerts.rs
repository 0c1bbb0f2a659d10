use chrono::{NaiveDate, TimeZone, Utc};
use sponsorship_core::{
    alerts::{self, AlertKind, AlertPriority},
    config::DashboardConfig,
    heatmap::UsageSample,
    seed::SeedData,
};

fn sample(facility: &str, usage: f64) -> UsageSample {
    UsageSample {
        day: "Monday".into(),
        day_index: 0,
        hour: 12,
        facility: facility.into(),
        usage,
        revenue: usage * 50.0,
        is_primetime: false,
        is_weekend: false,
    }
}

#[test]
fn renewal_window_and_lapsed_contracts() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let mut sponsors = SeedData::builtin().sponsors;
    sponsors[0].renewal = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(); // 45 days
    sponsors[1].renewal = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(); // lapsed

    let found = alerts::renewal_alerts(&sponsors, now, 90);
    let due: Vec<_> = found.iter().filter(|a| a.kind == AlertKind::RenewalDue).collect();
    let lapsed: Vec<_> = found.iter().filter(|a| a.kind == AlertKind::RenewalLapsed).collect();

    // Wells (45 d) and Nebraska Medicine (31 Mar) are inside the window
    assert_eq!(due.len(), 2);
    assert!(due[0].message.contains("expires in 45 days"));
    assert_eq!(lapsed.len(), 1);
    assert!(lapsed[0].message.starts_with("HyVee"));
}

#[test]
fn capacity_thresholds() {
    let config = DashboardConfig::default_test().alerts;
    let samples = vec![
        sample("Main Dome", 90.0),
        sample("Walking Track", 80.0),
        sample("Esports Arena", 30.0),
        sample("Wellness Center", 60.0),
    ];
    let found = alerts::capacity_alerts(&samples, &config);
    let kinds: Vec<AlertKind> = found.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AlertKind::CapacityExpansion,
            AlertKind::CapacityMonitor,
            AlertKind::LowUtilization,
        ]
    );
    assert!(found[2].message.contains("(30.0%)"));
}

#[test]
fn quiet_state_yields_single_all_clear() {
    let config = DashboardConfig::default_test().alerts;
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let found = alerts::collect(&[], &[sample("Main Dome", 60.0)], now, &config);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, AlertKind::AllClear);
    assert_eq!(found[0].priority, AlertPriority::Info);
}

#[test]
fn collected_alerts_are_priority_ordered() {
    let config = DashboardConfig::default_test().alerts;
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let sponsors = SeedData::builtin().sponsors;
    let found = alerts::collect(&sponsors, &[sample("Esports Arena", 20.0)], now, &config);
    assert!(found.windows(2).all(|w| w[0].priority <= w[1].priority));
    assert_eq!(found.last().unwrap().kind, AlertKind::LowUtilization);
}
