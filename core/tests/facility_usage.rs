use sponsorship_core::{
    config::DashboardConfig,
    heatmap::{self, DAYS},
    rng::StreamRng,
};

#[test]
fn grid_covers_every_day_hour_and_facility() {
    let config = DashboardConfig::default_test().heatmap;
    let mut rng = StreamRng::new(1, 2);
    let samples = heatmap::generate(&config, &mut rng);

    assert_eq!(samples.len(), 7 * 16 * 12);
    assert_eq!(heatmap::facility_count(&samples), 12);
    assert_eq!(samples.first().unwrap().hour, 6);
    assert_eq!(samples.last().unwrap().hour, 21);
    assert_eq!(samples.last().unwrap().day, DAYS[6]);
}

#[test]
fn usage_is_always_clamped_regardless_of_seed() {
    let config = DashboardConfig::default_test().heatmap;
    for seed in 0..50u64 {
        let mut rng = StreamRng::new(seed, 2);
        for s in heatmap::generate(&config, &mut rng) {
            assert!(
                (10.0..=100.0).contains(&s.usage),
                "seed {seed}: usage {} out of range at {} {}:00 {}",
                s.usage, s.day, s.hour, s.facility
            );
            // revenue rate is in [25, 75) per usage point, before rounding
            assert!(s.revenue >= (s.usage - 0.5) * 25.0 - 0.5);
            assert!(s.revenue <= (s.usage + 0.5) * 75.0 + 0.5);
        }
    }
}

#[test]
fn primetime_and_weekend_flags() {
    let config = DashboardConfig::default_test().heatmap;
    let mut rng = StreamRng::new(3, 2);
    let samples = heatmap::generate(&config, &mut rng);

    for s in &samples {
        let expect_prime = (17..=21).contains(&s.hour) || (7..=9).contains(&s.hour);
        assert_eq!(s.is_primetime, expect_prime);
        assert_eq!(s.is_weekend, s.day_index >= 5);
    }
}

#[test]
fn saturated_cells_pin_to_upper_bound() {
    // Saturday 19:00 on a basketball court has a base of 120, so even the
    // most negative noise (-15) stays above 100.
    let config = DashboardConfig::default_test().heatmap;
    let mut rng = StreamRng::new(11, 2);
    let samples = heatmap::generate(&config, &mut rng);
    let hot: Vec<_> = samples
        .iter()
        .filter(|s| s.day_index == 5 && s.hour == 19 && s.facility.contains("Basketball"))
        .collect();
    assert_eq!(hot.len(), 4);
    assert!(hot.iter().all(|s| s.usage == 100.0));
}

#[test]
fn aggregations_keep_input_order() {
    let config = DashboardConfig::default_test().heatmap;
    let mut rng = StreamRng::new(5, 2);
    let samples = heatmap::generate(&config, &mut rng);

    let facilities = heatmap::by_facility(&samples);
    assert_eq!(facilities.len(), 12);
    assert_eq!(facilities[0].key, "Main Dome");
    assert!(facilities.iter().all(|f| f.samples == 7 * 16));

    let hours = heatmap::by_hour(&samples);
    assert_eq!(hours.len(), 16);
    assert_eq!(hours[0].key, 6);

    let days = heatmap::by_day(&samples);
    assert_eq!(days.len(), 7);
    assert_eq!(days[0].key, "Monday");

    let avg = heatmap::average_usage(&samples);
    assert!(avg >= 10.0 && avg <= heatmap::peak_usage(&samples));
    assert!(heatmap::total_revenue(&samples) > 0.0);
}
