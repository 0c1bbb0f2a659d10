//! Derived metrics — pure aggregates and display formatting.
//!
//! Nothing in this module returns an error. Missing nested fields are
//! read as zero, divisions by zero fall back to a neutral divisor or
//! yield 0, and dates in the past produce negative countdowns.

use crate::seed::{
    Campaign, FulfillmentTask, Proposal, RevenuePoint, Sponsor, SponsorStatus, TaskStatus, Tier,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Exposure value as a percentage of contract value.
///
/// A zero or non-finite contract value is replaced by a divisor of 1, so
/// the result is defined (if meaningless) for unpriced sponsors.
pub fn roi_percent(contract_value: f64, exposure_value: f64) -> f64 {
    let divisor = if contract_value == 0.0 || !contract_value.is_finite() {
        1.0
    } else {
        contract_value
    };
    exposure_value / divisor * 100.0
}

pub fn sponsor_roi(sponsor: &Sponsor) -> f64 {
    roi_percent(sponsor.value, sponsor.exposure_value())
}

/// Whole days until `renewal` (midnight UTC), rounded up. Negative once
/// the date has passed.
pub fn days_until_renewal(renewal: NaiveDate, now: DateTime<Utc>) -> i64 {
    let renewal_at = renewal.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    let diff_ms = (renewal_at - now).num_milliseconds() as f64;
    (diff_ms / MS_PER_DAY).ceil() as i64
}

pub fn total_contract_value(sponsors: &[Sponsor]) -> f64 {
    sponsors.iter().map(|s| s.value).sum()
}

pub fn active_sponsor_count(sponsors: &[Sponsor]) -> usize {
    sponsors
        .iter()
        .filter(|s| s.status == SponsorStatus::Active)
        .count()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Mean overall fulfillment; 0 for an empty list.
pub fn average_fulfillment(sponsors: &[Sponsor]) -> f64 {
    mean(sponsors.iter().map(Sponsor::overall_fulfillment))
}

/// Mean satisfaction score; 0 for an empty list.
pub fn average_satisfaction(sponsors: &[Sponsor]) -> f64 {
    mean(sponsors.iter().map(Sponsor::satisfaction_score))
}

pub fn total_exposure_value(sponsors: &[Sponsor]) -> f64 {
    sponsors.iter().map(Sponsor::exposure_value).sum()
}

pub fn total_lead_generation(sponsors: &[Sponsor]) -> u64 {
    sponsors.iter().map(|s| u64::from(s.lead_generation())).sum()
}

// ── Formatting ─────────────────────────────────────────────

const TIE_GUARD_DIGITS: usize = 25;

/// Fixed-point text with `decimals` fraction digits. An exact tie rounds
/// away from zero (`2.5` → `3`); `{:.N}` alone would round it to even.
/// Non-ties follow the exact binary value, so `2.695` stays `2.69`.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value:.decimals$}");
    }
    let expanded = format!("{:.*}", decimals + TIE_GUARD_DIGITS, value.abs());
    let tail = &expanded[expanded.len() - TIE_GUARD_DIGITS..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.decimals$}");
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.decimals$}")
}

/// `$1.75M`
pub fn format_millions(amount: f64) -> String {
    format!("${}M", to_fixed(amount / 1_000_000.0, 2))
}

/// `$1.8M`
pub fn format_millions_short(amount: f64) -> String {
    format!("${}M", to_fixed(amount / 1_000_000.0, 1))
}

/// `$450K`
pub fn format_thousands(amount: f64) -> String {
    format!("${}K", to_fixed(amount / 1_000.0, 0))
}

/// `91.7%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", to_fixed(value, decimals))
}

/// Full dollar amount with thousands separators and at most two
/// fraction digits, trailing zeros trimmed: `$1,750,000`, `$12.5`.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && cents > 0 {
        out.push('-');
    }
    out.push('$');
    out.push_str(&grouped);
    if frac > 0 {
        let frac = format!("{frac:02}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

// ── Styling bands ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentBand {
    Excellent,
    Good,
    NeedsAttention,
}

pub fn fulfillment_band(pct: f64) -> FulfillmentBand {
    if pct >= 90.0 {
        FulfillmentBand::Excellent
    } else if pct >= 80.0 {
        FulfillmentBand::Good
    } else {
        FulfillmentBand::NeedsAttention
    }
}

// ── Pipeline, campaigns, revenue ───────────────────────────

/// Σ proposed value × win probability.
pub fn weighted_pipeline_value(proposals: &[Proposal]) -> f64 {
    proposals
        .iter()
        .map(|p| p.proposed_value * p.probability / 100.0)
        .sum()
}

pub fn campaign_budget_utilization(campaign: &Campaign) -> f64 {
    if campaign.budget == 0.0 {
        return 0.0;
    }
    campaign.spent / campaign.budget * 100.0
}

pub fn click_through_rate(campaign: &Campaign) -> f64 {
    if campaign.impressions == 0 {
        return 0.0;
    }
    campaign.clicks as f64 / campaign.impressions as f64 * 100.0
}

/// Actual minus projected.
pub fn revenue_variance(point: &RevenuePoint) -> f64 {
    point.actual - point.projected
}

/// Year-over-year growth in percent; 0 when there is no prior year.
pub fn year_over_year_growth(point: &RevenuePoint) -> f64 {
    if point.last_year == 0.0 {
        return 0.0;
    }
    (point.actual - point.last_year) / point.last_year * 100.0
}

// ── Selection helpers ──────────────────────────────────────

pub fn open_tasks(tasks: &[FulfillmentTask]) -> Vec<&FulfillmentTask> {
    tasks
        .iter()
        .filter(|t| t.status != TaskStatus::Completed)
        .collect()
}

/// Case-insensitive match on name, tier, status, or primary contact.
pub fn search_sponsors<'a>(sponsors: &'a [Sponsor], query: &str) -> Vec<&'a Sponsor> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return sponsors.iter().collect();
    }
    sponsors
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.tier.label().to_lowercase().contains(&needle)
                || s.status.label().to_lowercase().contains(&needle)
                || s.contact.primary.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Diamond first; ties broken by descending contract value.
pub fn sponsors_by_tier(sponsors: &[Sponsor]) -> Vec<&Sponsor> {
    sort_by_tier(sponsors.iter().collect())
}

pub fn sort_by_tier(mut sponsors: Vec<&Sponsor>) -> Vec<&Sponsor> {
    sponsors.sort_by(|a, b| {
        a.tier
            .cmp(&b.tier)
            .then_with(|| b.value.total_cmp(&a.value))
    });
    sponsors
}

/// Active sponsors in renewal-date order, soonest first, at most `limit`.
pub fn upcoming_renewals(sponsors: &[Sponsor], limit: usize) -> Vec<&Sponsor> {
    let mut active: Vec<&Sponsor> = sponsors
        .iter()
        .filter(|s| s.status == SponsorStatus::Active)
        .collect();
    active.sort_by_key(|s| s.renewal);
    active.truncate(limit);
    active
}

// ── Risk ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenewalRisk {
    High,
    Medium,
    Low,
}

impl RenewalRisk {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// High inside 60 days of renewal, otherwise Medium below 80% fulfillment.
pub fn renewal_risk(days_to_renewal: i64, fulfillment: f64) -> RenewalRisk {
    if days_to_renewal < 60 {
        RenewalRisk::High
    } else if fulfillment < 80.0 {
        RenewalRisk::Medium
    } else {
        RenewalRisk::Low
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenewalUrgency {
    Urgent,
    Soon,
    Comfortable,
}

/// Colour band for the renewal pipeline: under 30 days, under 60, later.
pub fn renewal_urgency(days_to_renewal: i64) -> RenewalUrgency {
    if days_to_renewal < 30 {
        RenewalUrgency::Urgent
    } else if days_to_renewal < 60 {
        RenewalUrgency::Soon
    } else {
        RenewalUrgency::Comfortable
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierSummary {
    pub tier:  Tier,
    pub count: usize,
    pub value: f64,
}

/// Count and contract value per tier, every tier listed even when empty.
pub fn tier_breakdown(sponsors: &[Sponsor]) -> Vec<TierSummary> {
    Tier::ALL
        .iter()
        .map(|&tier| {
            let members = sponsors.iter().filter(|s| s.tier == tier);
            let (count, value) = members.fold((0, 0.0), |(c, v), s| (c + 1, v + s.value));
            TierSummary { tier, count, value }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn usd_grouping_and_fraction_trim() {
        assert_eq!(format_usd(1_750_000.0), "$1,750,000");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1_000.0), "$1,000");
        assert_eq!(format_usd(12.5), "$12.5");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(-2_500.25), "-$2,500.25");
    }

    #[test]
    fn short_formats() {
        assert_eq!(format_millions_short(1_750_000.0), "$1.8M");
        assert_eq!(format_thousands(450_000.0), "$450K");
        assert_eq!(format_percent(91.66, 1), "91.7%");
        assert_eq!(format_percent(95.0, 0), "95%");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_thousands(2_500.0), "$3K");
        assert_eq!(format_percent(62.5, 0), "63%");
        assert_eq!(format_millions(1_125_000.0), "$1.13M");
        assert_eq!(format_millions_short(1_250_000.0), "$1.3M");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 2.695 is stored as 2.69499999…, 2.895 as 2.89500000…02
        assert_eq!(format_millions(2_695_000.0), "$2.69M");
        assert_eq!(format_millions(2_895_000.0), "$2.90M");
        assert_eq!(to_fixed(f64::NAN, 1), "NaN");
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(renewal_risk(59, 95.0), RenewalRisk::High);
        assert_eq!(renewal_risk(60, 95.0), RenewalRisk::Low);
        assert_eq!(renewal_risk(60, 79.9), RenewalRisk::Medium);
        assert_eq!(renewal_risk(60, 80.0), RenewalRisk::Low);
        assert_eq!(renewal_risk(-10, 50.0), RenewalRisk::High);
    }

    #[test]
    fn urgency_bands() {
        assert_eq!(renewal_urgency(29), RenewalUrgency::Urgent);
        assert_eq!(renewal_urgency(30), RenewalUrgency::Soon);
        assert_eq!(renewal_urgency(59), RenewalUrgency::Soon);
        assert_eq!(renewal_urgency(60), RenewalUrgency::Comfortable);
    }

    #[test]
    fn renewal_countdown_rounds_up_partial_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let renewal = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        // 1 day 15 hours away
        assert_eq!(days_until_renewal(renewal, now), 2);
    }

    #[test]
    fn bands_split_at_eighty_and_ninety() {
        assert_eq!(fulfillment_band(90.0), FulfillmentBand::Excellent);
        assert_eq!(fulfillment_band(89.9), FulfillmentBand::Good);
        assert_eq!(fulfillment_band(80.0), FulfillmentBand::Good);
        assert_eq!(fulfillment_band(79.9), FulfillmentBand::NeedsAttention);
    }
}
