use chrono::{NaiveDate, TimeZone, Utc};
use sponsorship_core::{
    metrics::{self, FulfillmentBand},
    seed::{SeedData, Sponsor, Tier},
};

fn builtin_sponsors() -> Vec<Sponsor> {
    SeedData::builtin().sponsors
}

#[test]
fn roi_with_zero_contract_value_is_defined() {
    let roi = metrics::roi_percent(0.0, 420_000.0);
    assert!(roi.is_finite());
    assert_eq!(roi, 42_000_000.0);
    assert!(metrics::roi_percent(f64::NAN, 10.0).is_finite());
}

#[test]
fn roi_for_builtin_diamond_sponsor() {
    let sponsors = builtin_sponsors();
    let wells = sponsors.iter().find(|s| s.tier == Tier::Diamond).unwrap();
    // 3.2M exposure on a 1.75M contract
    assert_eq!(metrics::format_percent(metrics::sponsor_roi(wells), 0), "183%");
}

#[test]
fn past_renewal_yields_negative_days() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let renewal = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let days = metrics::days_until_renewal(renewal, now);
    assert!(days < 0);
    assert_eq!(days, -60);
}

#[test]
fn averages_over_empty_list_are_zero() {
    assert_eq!(metrics::average_fulfillment(&[]), 0.0);
    assert_eq!(metrics::average_satisfaction(&[]), 0.0);
    assert_eq!(metrics::total_contract_value(&[]), 0.0);
    assert_eq!(metrics::active_sponsor_count(&[]), 0);
}

#[test]
fn averages_over_builtin_sponsors() {
    let sponsors = builtin_sponsors();
    // (95 + 88 + 92 + 85 + 78) / 5
    assert!((metrics::average_fulfillment(&sponsors) - 87.6).abs() < 1e-9);
    assert_eq!(metrics::total_contract_value(&sponsors), 2_895_000.0);
    assert_eq!(metrics::active_sponsor_count(&sponsors), 4);
}

#[test]
fn currency_formatting_matches_display_convention() {
    assert_eq!(metrics::format_millions(1_750_000.0), "$1.75M");
    assert_eq!(metrics::format_millions(0.0), "$0.00M");
    assert_eq!(metrics::format_thousands(180_000.0), "$180K");
}

#[test]
fn fulfillment_bands_for_builtin_sponsors() {
    let bands: Vec<FulfillmentBand> = builtin_sponsors()
        .iter()
        .map(|s| metrics::fulfillment_band(s.overall_fulfillment()))
        .collect();
    assert_eq!(
        bands,
        vec![
            FulfillmentBand::Excellent,
            FulfillmentBand::Good,
            FulfillmentBand::Excellent,
            FulfillmentBand::Good,
            FulfillmentBand::NeedsAttention,
        ]
    );
}

#[test]
fn weighted_pipeline_and_campaign_ratios() {
    let seed = SeedData::builtin();
    // 180k * 75% + 270k * 50%
    assert_eq!(metrics::weighted_pipeline_value(&seed.proposals), 270_000.0);
    assert_eq!(metrics::campaign_budget_utilization(&seed.campaigns[0]), 60.0);

    let mut unbudgeted = seed.campaigns[0].clone();
    unbudgeted.budget = 0.0;
    assert_eq!(metrics::campaign_budget_utilization(&unbudgeted), 0.0);
}

#[test]
fn revenue_variance_and_growth() {
    let seed = SeedData::builtin();
    let jan = &seed.revenue[0];
    assert_eq!(metrics::revenue_variance(jan), 15_000.0);
    let growth = metrics::year_over_year_growth(jan);
    assert!((growth - 16.666_666).abs() < 1e-3);

    let mut fresh = jan.clone();
    fresh.last_year = 0.0;
    assert_eq!(metrics::year_over_year_growth(&fresh), 0.0);
}

#[test]
fn open_tasks_excludes_completed() {
    let seed = SeedData::builtin();
    let open = metrics::open_tasks(&seed.tasks);
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|t| t.sponsor_name != "HyVee"));
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let sponsors = builtin_sponsors();
    assert_eq!(metrics::search_sponsors(&sponsors, "").len(), 5);
    assert_eq!(metrics::search_sponsors(&sponsors, "WELLS")[0].id, 1);
    assert_eq!(metrics::search_sponsors(&sponsors, "gold")[0].name, "TD Ameritrade");
    assert_eq!(metrics::search_sponsors(&sponsors, "pending")[0].name, "Nebraska Medicine");
    assert_eq!(metrics::search_sponsors(&sponsors, "mike chen")[0].name, "HyVee");
    assert!(metrics::search_sponsors(&sponsors, "nobody").is_empty());
}

#[test]
fn tier_sort_and_breakdown() {
    let mut sponsors = builtin_sponsors();
    sponsors.reverse();
    let sorted: Vec<Tier> = metrics::sponsors_by_tier(&sponsors).iter().map(|s| s.tier).collect();
    assert_eq!(sorted, Tier::ALL.to_vec());

    let breakdown = metrics::tier_breakdown(&sponsors[..2]);
    assert_eq!(breakdown.len(), 5);
    assert_eq!(breakdown[0].count, 0);
    assert_eq!(breakdown[4].value, 50_000.0);
}

#[test]
fn upcoming_renewals_are_capped_and_date_ordered() {
    let sponsors = SeedData::builtin().sponsors;
    let soonest = metrics::upcoming_renewals(&sponsors, 2);
    let names: Vec<&str> = soonest.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["TD Ameritrade", "Runza Restaurants"]);
    assert!(metrics::upcoming_renewals(&[], 5).is_empty());
}

#[test]
fn exposure_and_leads_totals() {
    let sponsors = SeedData::builtin().sponsors;
    assert_eq!(metrics::total_exposure_value(&sponsors), 6_550_000.0);
    assert_eq!(metrics::total_lead_generation(&sponsors), 720);
    assert_eq!(metrics::total_lead_generation(&[]), 0);
}

#[test]
fn budget_utilization_at_a_half_percent_rounds_up() {
    let mut campaign = SeedData::builtin().campaigns[0].clone();
    campaign.budget = 80_000.0;
    campaign.spent = 50_000.0;
    assert_eq!(
        metrics::format_percent(metrics::campaign_budget_utilization(&campaign), 0),
        "63%"
    );
}
