//! View renderer — maps (selected module, engine state) to a
//! serializable view model. Formatting and styling bands only; every
//! number comes from `metrics` or `heatmap`.

use crate::{
    alerts::Alert,
    engine::DashboardEngine,
    heatmap::{self, UsageBand},
    metrics::{self, FulfillmentBand, RenewalRisk, RenewalUrgency, TierSummary},
    seed::{FulfillmentCategory, Priority},
    types::{RecordId, Tick},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Dashboard,
    Sponsors,
    Analytics,
    Heatmap,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Dashboard,
        ViewKind::Sponsors,
        ViewKind::Analytics,
        ViewKind::Heatmap,
    ];
}

impl FromStr for ViewKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "sponsors" | "sponsor_list" => Ok(Self::Sponsors),
            "analytics" => Ok(Self::Analytics),
            "heatmap" => Ok(Self::Heatmap),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KpiCard {
    pub label:  String,
    pub value:  String,
    pub detail: String,
}

fn card(label: &str, value: String, detail: String) -> KpiCard {
    KpiCard {
        label: label.to_string(),
        value,
        detail,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRow {
    pub id:       RecordId,
    pub sponsor:  String,
    pub task:     String,
    pub assignee: String,
    pub due:      String,
    pub priority: Priority,
    pub progress: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub tick:         Tick,
    pub updated_at:   String,
    pub header:       Vec<KpiCard>,
    pub kpis:         Vec<KpiCard>,
    pub open_tasks:   Vec<TaskRow>,
    pub alerts:       Vec<Alert>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SponsorRow {
    pub id:               RecordId,
    pub name:             String,
    pub tier:             String,
    pub tier_style:       String,
    pub value:            String,
    pub status:           String,
    pub days_to_renewal:  i64,
    pub roi:              String,
    pub exposure:         String,
    pub impressions:      String,
    pub fulfillment:      String,
    pub fulfillment_band: FulfillmentBand,
    pub leads:            u32,
    pub risk:             RenewalRisk,
    pub contact:          String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenewalRow {
    pub id:      RecordId,
    pub name:    String,
    pub renewal: String,
    pub days:    i64,
    pub urgency: RenewalUrgency,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SponsorsView {
    /// Search text the rows were filtered by, if any.
    pub query:    Option<String>,
    pub summary:  Vec<KpiCard>,
    pub rows:     Vec<SponsorRow>,
    pub renewals: Vec<RenewalRow>,
}

/// Rows shown in the renewal pipeline panel.
pub const RENEWAL_PIPELINE_LEN: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueRow {
    pub month:     String,
    pub actual:    String,
    pub projected: String,
    pub variance:  String,
    pub yoy:       String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignRow {
    pub name:               String,
    pub sponsor:            String,
    pub budget:             String,
    pub budget_utilization: String,
    pub click_through:      String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsView {
    pub revenue:          Vec<RevenueRow>,
    pub categories:       Vec<FulfillmentCategory>,
    pub tiers:            Vec<TierSummary>,
    pub campaigns:        Vec<CampaignRow>,
    pub weighted_pipeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageRow {
    pub label:       String,
    pub avg_usage:   String,
    pub avg_revenue: String,
    pub band:        UsageBand,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapView {
    pub summary:    Vec<KpiCard>,
    pub facilities: Vec<UsageRow>,
    pub hours:      Vec<UsageRow>,
    pub days:       Vec<UsageRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Dashboard(DashboardView),
    Sponsors(SponsorsView),
    Analytics(AnalyticsView),
    Heatmap(HeatmapView),
}

pub fn render(kind: ViewKind, engine: &DashboardEngine) -> View {
    render_with_query(kind, engine, None)
}

/// Like `render`, with an optional search applied to list views. Only the
/// sponsor list is searchable; other views ignore the query.
pub fn render_with_query(kind: ViewKind, engine: &DashboardEngine, query: Option<&str>) -> View {
    match kind {
        ViewKind::Dashboard => View::Dashboard(render_dashboard(engine)),
        ViewKind::Sponsors  => View::Sponsors(render_sponsors(engine, query)),
        ViewKind::Analytics => View::Analytics(render_analytics(engine)),
        ViewKind::Heatmap   => View::Heatmap(render_heatmap(engine)),
    }
}

fn render_dashboard(engine: &DashboardEngine) -> DashboardView {
    let data = engine.data();
    let m = &data.metrics;

    let header = vec![
        card(
            "Total Revenue",
            metrics::format_millions(m.total_revenue),
            format!("+{} YoY Growth", metrics::format_percent(m.revenue_growth, 1)),
        ),
        card(
            "Facility Utilization",
            metrics::format_percent(m.facility_utilization, 1),
            "Live".into(),
        ),
    ];

    let kpis = vec![
        card(
            "Active Sponsors",
            metrics::active_sponsor_count(&data.sponsors).to_string(),
            format!("+{} new", m.new_sponsors_this_year),
        ),
        card(
            "Sponsor Retention",
            metrics::format_percent(m.sponsor_retention, 1),
            format!(
                "Avg fulfillment {}",
                metrics::format_percent(metrics::average_fulfillment(&data.sponsors), 1)
            ),
        ),
        card(
            "Satisfaction",
            metrics::to_fixed(m.customer_satisfaction, 1),
            format!(
                "Sponsor avg {}",
                metrics::to_fixed(metrics::average_satisfaction(&data.sponsors), 1)
            ),
        ),
        card(
            "Pipeline Value",
            metrics::format_thousands(m.pipeline_value),
            format!("{} proposals", data.proposals.len()),
        ),
    ];

    let open_tasks = metrics::open_tasks(&data.tasks)
        .into_iter()
        .map(|t| TaskRow {
            id: t.id,
            sponsor: t.sponsor_name.clone(),
            task: t.task.clone(),
            assignee: t.assignee.clone(),
            due: t.due_date.to_string(),
            priority: t.priority,
            progress: metrics::format_percent(t.progress, 0),
        })
        .collect();

    DashboardView {
        tick: engine.clock.current_tick,
        updated_at: engine.clock.now.format("%Y-%m-%d %H:%M:%S").to_string(),
        header,
        kpis,
        open_tasks,
        alerts: engine.alerts(),
    }
}

fn render_sponsors(engine: &DashboardEngine, query: Option<&str>) -> SponsorsView {
    let sponsors = &engine.data().sponsors;
    let now = engine.clock.now;
    let query = query.map(str::trim).filter(|q| !q.is_empty());

    let summary = vec![
        card(
            "Total Contract Value",
            metrics::format_millions(metrics::total_contract_value(sponsors)),
            format!("{} sponsors", sponsors.len()),
        ),
        card(
            "Active",
            metrics::active_sponsor_count(sponsors).to_string(),
            String::new(),
        ),
        card(
            "Avg Fulfillment",
            metrics::format_percent(metrics::average_fulfillment(sponsors), 1),
            String::new(),
        ),
        card(
            "Avg Satisfaction",
            metrics::to_fixed(metrics::average_satisfaction(sponsors), 1),
            String::new(),
        ),
        card(
            "Total Exposure",
            metrics::format_millions_short(metrics::total_exposure_value(sponsors)),
            format!("{} leads", metrics::total_lead_generation(sponsors)),
        ),
    ];

    let matched = match query {
        Some(q) => metrics::search_sponsors(sponsors, q),
        None => sponsors.iter().collect(),
    };

    let rows = metrics::sort_by_tier(matched)
        .into_iter()
        .map(|s| {
            let fulfillment = s.overall_fulfillment();
            let days_to_renewal = metrics::days_until_renewal(s.renewal, now);
            SponsorRow {
                id: s.id,
                name: s.name.clone(),
                tier: s.tier.label().to_string(),
                tier_style: s.tier.style().to_string(),
                value: metrics::format_usd(s.value),
                status: s.status.label().to_string(),
                days_to_renewal,
                roi: metrics::format_percent(metrics::sponsor_roi(s), 0),
                exposure: metrics::format_millions_short(s.exposure_value()),
                impressions: format!(
                    "{}M",
                    metrics::to_fixed(s.digital_impressions() as f64 / 1_000_000.0, 1)
                ),
                fulfillment: metrics::format_percent(fulfillment, 1),
                fulfillment_band: metrics::fulfillment_band(fulfillment),
                leads: s.lead_generation(),
                risk: metrics::renewal_risk(days_to_renewal, fulfillment),
                contact: s.contact.primary.clone(),
            }
        })
        .collect();

    let renewals = metrics::upcoming_renewals(sponsors, RENEWAL_PIPELINE_LEN)
        .into_iter()
        .map(|s| {
            let days = metrics::days_until_renewal(s.renewal, now);
            RenewalRow {
                id: s.id,
                name: s.name.clone(),
                renewal: s.renewal.to_string(),
                days,
                urgency: metrics::renewal_urgency(days),
            }
        })
        .collect();

    SponsorsView {
        query: query.map(String::from),
        summary,
        rows,
        renewals,
    }
}

fn render_analytics(engine: &DashboardEngine) -> AnalyticsView {
    let data = engine.data();

    let revenue = data
        .revenue
        .iter()
        .map(|p| RevenueRow {
            month: p.month.clone(),
            actual: metrics::format_usd(p.actual),
            projected: metrics::format_usd(p.projected),
            variance: metrics::format_usd(metrics::revenue_variance(p)),
            yoy: metrics::format_percent(metrics::year_over_year_growth(p), 1),
        })
        .collect();

    let campaigns = data
        .campaigns
        .iter()
        .map(|c| CampaignRow {
            name: c.name.clone(),
            sponsor: c.sponsor_name.clone(),
            budget: metrics::format_usd(c.budget),
            budget_utilization: metrics::format_percent(metrics::campaign_budget_utilization(c), 0),
            click_through: metrics::format_percent(metrics::click_through_rate(c), 2),
        })
        .collect();

    AnalyticsView {
        revenue,
        categories: data.categories.clone(),
        tiers: metrics::tier_breakdown(&data.sponsors),
        campaigns,
        weighted_pipeline: metrics::format_usd(metrics::weighted_pipeline_value(&data.proposals)),
    }
}

fn usage_rows<K>(groups: Vec<heatmap::UsageAverage<K>>, label: impl Fn(&K) -> String) -> Vec<UsageRow> {
    groups
        .into_iter()
        .map(|g| UsageRow {
            label: label(&g.key),
            avg_usage: metrics::format_percent(g.avg_usage, 1),
            avg_revenue: format!("${}", metrics::to_fixed(g.avg_revenue, 0)),
            band: heatmap::usage_band(g.avg_usage),
        })
        .collect()
}

fn render_heatmap(engine: &DashboardEngine) -> HeatmapView {
    let samples = engine.heatmap();

    let summary = vec![
        card(
            "Average Usage",
            metrics::format_percent(heatmap::average_usage(samples), 1),
            String::new(),
        ),
        card(
            "Peak Usage",
            metrics::format_percent(heatmap::peak_usage(samples), 0),
            String::new(),
        ),
        card(
            "Weekly Revenue",
            metrics::format_thousands(heatmap::total_revenue(samples)),
            String::new(),
        ),
        card(
            "Facilities",
            heatmap::facility_count(samples).to_string(),
            String::new(),
        ),
    ];

    HeatmapView {
        summary,
        facilities: usage_rows(heatmap::by_facility(samples), |f| f.clone()),
        hours: usage_rows(heatmap::by_hour(samples), |h| format!("{h}:00")),
        days: usage_rows(heatmap::by_day(samples), |d| d.clone()),
    }
}
