//! Seed data model and the built-in sample data set.
//!
//! Nested sections (fulfillment, performance, financials, satisfaction)
//! are optional: a seed file may omit any of them and every consumer
//! falls back to zero.

use crate::{
    error::{DashError, DashResult},
    types::RecordId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Diamond,
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Diamond,
        Tier::Platinum,
        Tier::Gold,
        Tier::Silver,
        Tier::Bronze,
    ];

    /// 0 is the top tier.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Diamond  => "Diamond",
            Self::Platinum => "Platinum",
            Self::Gold     => "Gold",
            Self::Silver   => "Silver",
            Self::Bronze   => "Bronze",
        }
    }

    /// Styling key for the renderer.
    pub fn style(&self) -> &'static str {
        match self {
            Self::Diamond  => "tier-diamond",
            Self::Platinum => "tier-platinum",
            Self::Gold     => "tier-gold",
            Self::Silver   => "tier-silver",
            Self::Bronze   => "tier-bronze",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SponsorStatus {
    Active,
    #[serde(rename = "Pending Renewal", alias = "Pending")]
    PendingRenewal,
    Expired,
}

impl SponsorStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active         => "Active",
            Self::PendingRenewal => "Pending Renewal",
            Self::Expired        => "Expired",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub primary: String,
    #[serde(default)]
    pub email:   String,
    #[serde(default)]
    pub phone:   String,
    #[serde(default)]
    pub title:   String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fulfillment {
    pub overall:     Option<f64>,
    pub signage:     Option<f64>,
    pub digital:     Option<f64>,
    pub events:      Option<f64>,
    pub hospitality: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Performance {
    pub exposure_value:      Option<f64>,
    pub digital_impressions: Option<u64>,
    pub lead_generation:     Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Financials {
    pub total_paid:   f64,
    pub remaining:    f64,
    pub next_payment: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Satisfaction {
    pub score:    f64,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sponsor {
    pub id:       RecordId,
    pub name:     String,
    pub tier:     Tier,
    /// Contract value in USD.
    pub value:    f64,
    pub status:   SponsorStatus,
    pub renewal:  NaiveDate,
    #[serde(default)]
    pub contact:  Contact,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub fulfillment:  Option<Fulfillment>,
    #[serde(default)]
    pub performance:  Option<Performance>,
    #[serde(default)]
    pub financials:   Option<Financials>,
    #[serde(default)]
    pub satisfaction: Option<Satisfaction>,
    #[serde(default)]
    pub signage_locations: u32,
}

impl Sponsor {
    pub fn overall_fulfillment(&self) -> f64 {
        self.fulfillment.as_ref().and_then(|f| f.overall).unwrap_or(0.0)
    }

    pub fn exposure_value(&self) -> f64 {
        self.performance.as_ref().and_then(|p| p.exposure_value).unwrap_or(0.0)
    }

    pub fn digital_impressions(&self) -> u64 {
        self.performance.as_ref().and_then(|p| p.digital_impressions).unwrap_or(0)
    }

    pub fn lead_generation(&self) -> u32 {
        self.performance.as_ref().and_then(|p| p.lead_generation).unwrap_or(0)
    }

    pub fn satisfaction_score(&self) -> f64 {
        self.satisfaction.as_ref().map(|s| s.score).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentTask {
    pub id:           RecordId,
    /// Free text; not checked against the sponsor list.
    pub sponsor_name: String,
    pub task:         String,
    pub category:     String,
    pub status:       TaskStatus,
    pub assignee:     String,
    pub due_date:     NaiveDate,
    pub priority:     Priority,
    pub progress:     f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id:            RecordId,
    pub name:          String,
    pub sponsor_name:  String,
    pub campaign_type: String,
    pub status:        String,
    pub budget:        f64,
    pub spent:         f64,
    pub impressions:   u64,
    pub clicks:        u64,
    pub conversions:   u64,
    pub engagement:    f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Proposal {
    pub id:             RecordId,
    pub prospect_name:  String,
    pub proposed_tier:  Tier,
    pub proposed_value: f64,
    pub status:         String,
    /// Win probability in percent.
    pub probability:    f64,
    #[serde(default)]
    pub contact_name:   String,
    #[serde(default)]
    pub contact_email:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacilityEvent {
    pub id:                  RecordId,
    pub title:               String,
    pub date:                NaiveDate,
    pub time:                String,
    pub location:            String,
    pub expected_attendance: u32,
    pub status:              String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenuePoint {
    pub month:     String,
    pub actual:    f64,
    pub projected: f64,
    pub last_year: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FulfillmentCategory {
    pub category:   String,
    pub completed:  u32,
    pub total:      u32,
    pub percentage: f64,
}

/// Flat set of named aggregate figures shown in the dashboard header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerformanceMetrics {
    pub total_revenue:          f64,
    pub revenue_growth:         f64,
    pub sponsor_retention:      f64,
    pub average_fulfillment:    f64,
    pub customer_satisfaction:  f64,
    pub facility_utilization:   f64,
    pub new_sponsors_this_year: u32,
    pub pipeline_value:         f64,
}

/// Everything created once at initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedData {
    pub sponsors:       Vec<Sponsor>,
    pub tasks:          Vec<FulfillmentTask>,
    pub campaigns:      Vec<Campaign>,
    pub proposals:      Vec<Proposal>,
    pub events:         Vec<FacilityEvent>,
    pub revenue:        Vec<RevenuePoint>,
    pub categories:     Vec<FulfillmentCategory>,
    pub metrics:        PerformanceMetrics,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates below are all valid calendar days.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl SeedData {
    /// Parse a seed file's contents.
    pub fn from_json(content: &str) -> DashResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load `<data_dir>/seed.json` if present, else the built-in set.
    pub fn load_or_builtin(data_dir: &str) -> DashResult<Self> {
        let path = format!("{data_dir}/seed.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::info!("Loading seed data from {path}");
                Self::from_json(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::builtin()),
            Err(e) => Err(DashError::Io(e)),
        }
    }

    /// The built-in sample data set.
    pub fn builtin() -> Self {
        Self {
            sponsors:   builtin_sponsors(),
            tasks:      builtin_tasks(),
            campaigns:  builtin_campaigns(),
            proposals:  builtin_proposals(),
            events:     builtin_events(),
            revenue:    builtin_revenue(),
            categories: builtin_categories(),
            metrics: PerformanceMetrics {
                total_revenue:          2_695_000.0,
                revenue_growth:         15.3,
                sponsor_retention:      96.8,
                average_fulfillment:    91.7,
                customer_satisfaction:  8.93,
                facility_utilization:   78.4,
                new_sponsors_this_year: 3,
                pipeline_value:         450_000.0,
            },
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn sponsor(
    id: RecordId,
    name: &str,
    tier: Tier,
    value: f64,
    status: SponsorStatus,
    renewal: NaiveDate,
    contact: (&str, &str, &str, &str),
    benefits: &str,
    fulfillment: [f64; 5],
    performance: (f64, u64, u32),
    satisfaction: (f64, &str),
    signage_locations: u32,
) -> Sponsor {
    let (primary, email, phone, title) = contact;
    let [overall, signage, digital, events, hospitality] = fulfillment;
    let (exposure, impressions, leads) = performance;
    Sponsor {
        id,
        name: name.into(),
        tier,
        value,
        status,
        renewal,
        contact: Contact {
            primary: primary.into(),
            email:   email.into(),
            phone:   phone.into(),
            title:   title.into(),
        },
        benefits: benefits.into(),
        fulfillment: Some(Fulfillment {
            overall:     Some(overall),
            signage:     Some(signage),
            digital:     Some(digital),
            events:      Some(events),
            hospitality: Some(hospitality),
        }),
        performance: Some(Performance {
            exposure_value:      Some(exposure),
            digital_impressions: Some(impressions),
            lead_generation:     Some(leads),
        }),
        financials: Some(Financials {
            total_paid:   value * 0.75,
            remaining:    value * 0.25,
            next_payment: Some(date(2024, 4, 1)),
        }),
        satisfaction: Some(Satisfaction {
            score:    satisfaction.0,
            feedback: satisfaction.1.into(),
        }),
        signage_locations,
    }
}

fn builtin_sponsors() -> Vec<Sponsor> {
    vec![
        sponsor(
            1, "Wells Fargo Bank", Tier::Diamond, 1_750_000.0, SponsorStatus::Active,
            date(2024, 12, 31),
            ("Sarah Johnson", "sarah.johnson@wellsfargo.com", "555-0123", "Marketing Director"),
            "Full complex naming rights, dome & exterior signage, digital media, VIP suites",
            [95.0, 98.0, 92.0, 97.0, 94.0],
            (3_200_000.0, 2_500_000, 340),
            (9.2, "Excellent partnership, exceeding expectations"),
            15,
        ),
        sponsor(
            2, "HyVee", Tier::Platinum, 625_000.0, SponsorStatus::Active,
            date(2024, 9, 30),
            ("Mike Chen", "mike.chen@hy-vee.com", "555-0456", "Community Relations Manager"),
            "Dome naming rights, premium interior/exterior signage, 4 corporate events/year",
            [88.0, 85.0, 90.0, 92.0, 86.0],
            (1_800_000.0, 1_200_000, 185),
            (8.7, "Strong community connection, good ROI"),
            8,
        ),
        sponsor(
            3, "TD Ameritrade", Tier::Gold, 320_000.0, SponsorStatus::Active,
            date(2024, 6, 30),
            ("Jennifer Liu", "j.liu@tdameritrade.com", "555-0789", "Sponsorship Manager"),
            "Outdoor field naming rights, light pole banners, scoreboard branding",
            [92.0, 95.0, 88.0, 94.0, 90.0],
            (950_000.0, 800_000, 95),
            (8.9, "Responsive team, great field visibility"),
            6,
        ),
        sponsor(
            4, "Nebraska Medicine", Tier::Silver, 150_000.0, SponsorStatus::PendingRenewal,
            date(2024, 3, 31),
            ("Dr. Robert Kim", "robert.kim@nebraskamed.com", "555-0321", "Community Health Director"),
            "Indoor turf/court naming rights, scoreboard & event signage",
            [85.0, 88.0, 80.0, 86.0, 84.0],
            (420_000.0, 350_000, 60),
            (8.1, "Wants more event activations before renewing"),
            4,
        ),
        sponsor(
            5, "Runza Restaurants", Tier::Bronze, 50_000.0, SponsorStatus::Active,
            date(2024, 8, 15),
            ("Lisa Martinez", "lisa@runza.com", "555-0654", "Marketing Coordinator"),
            "Banners, small digital package, local event sponsorship",
            [78.0, 82.0, 75.0, 76.0, 80.0],
            (180_000.0, 120_000, 40),
            (7.8, "Happy with local reach"),
            3,
        ),
    ]
}

fn builtin_tasks() -> Vec<FulfillmentTask> {
    vec![
        FulfillmentTask {
            id: 1,
            sponsor_name: "Wells Fargo Bank".into(),
            task: "Install new championship court signage".into(),
            category: "Signage".into(),
            status: TaskStatus::InProgress,
            assignee: "Mike Rodriguez".into(),
            due_date: date(2024, 3, 15),
            priority: Priority::High,
            progress: 75.0,
        },
        FulfillmentTask {
            id: 2,
            sponsor_name: "HyVee".into(),
            task: "Update dome exterior banner".into(),
            category: "Signage".into(),
            status: TaskStatus::Completed,
            assignee: "Sarah Kim".into(),
            due_date: date(2024, 2, 28),
            priority: Priority::Medium,
            progress: 100.0,
        },
        FulfillmentTask {
            id: 3,
            sponsor_name: "TD Ameritrade".into(),
            task: "Deliver Q1 digital impressions report".into(),
            category: "Digital".into(),
            status: TaskStatus::NotStarted,
            assignee: "Alex Thompson".into(),
            due_date: date(2024, 4, 5),
            priority: Priority::Low,
            progress: 0.0,
        },
    ]
}

fn builtin_campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            id: 1,
            name: "Spring Tournament Series".into(),
            sponsor_name: "Wells Fargo Bank".into(),
            campaign_type: "Event Activation".into(),
            status: "Active".into(),
            budget: 75_000.0,
            spent: 45_000.0,
            impressions: 1_250_000,
            clicks: 8_500,
            conversions: 340,
            engagement: 4.2,
        },
        Campaign {
            id: 2,
            name: "Healthy Families Month".into(),
            sponsor_name: "HyVee".into(),
            campaign_type: "Digital".into(),
            status: "Planning".into(),
            budget: 30_000.0,
            spent: 4_500.0,
            impressions: 210_000,
            clicks: 1_900,
            conversions: 75,
            engagement: 3.6,
        },
    ]
}

fn builtin_proposals() -> Vec<Proposal> {
    vec![
        Proposal {
            id: 1,
            prospect_name: "First National Bank".into(),
            proposed_tier: Tier::Silver,
            proposed_value: 180_000.0,
            status: "Under Review".into(),
            probability: 75.0,
            contact_name: "Robert Martinez".into(),
            contact_email: "rmartinez@fnb.com".into(),
        },
        Proposal {
            id: 2,
            prospect_name: "Mutual of Omaha".into(),
            proposed_tier: Tier::Gold,
            proposed_value: 270_000.0,
            status: "Negotiation".into(),
            probability: 50.0,
            contact_name: "Karen Wu".into(),
            contact_email: "karen.wu@mutualofomaha.com".into(),
        },
    ]
}

fn builtin_events() -> Vec<FacilityEvent> {
    vec![FacilityEvent {
        id: 1,
        title: "Wells Fargo Youth Basketball Tournament".into(),
        date: date(2024, 3, 23),
        time: "09:00".into(),
        location: "Championship Court".into(),
        expected_attendance: 500,
        status: "Confirmed".into(),
    }]
}

fn builtin_revenue() -> Vec<RevenuePoint> {
    [
        ("Jan", 245_000.0, 230_000.0, 210_000.0),
        ("Feb", 268_000.0, 250_000.0, 235_000.0),
        ("Mar", 295_000.0, 275_000.0, 258_000.0),
        ("Apr", 312_000.0, 290_000.0, 275_000.0),
        ("May", 328_000.0, 310_000.0, 290_000.0),
        ("Jun", 345_000.0, 325_000.0, 305_000.0),
    ]
    .into_iter()
    .map(|(month, actual, projected, last_year)| RevenuePoint {
        month: month.into(),
        actual,
        projected,
        last_year,
    })
    .collect()
}

fn builtin_categories() -> Vec<FulfillmentCategory> {
    [
        ("Signage Installation", 42, 45, 93.0),
        ("Digital Advertising", 38, 40, 95.0),
        ("Event Activations", 15, 20, 75.0),
        ("PR & Media", 28, 30, 93.0),
        ("Corporate Events", 8, 12, 67.0),
    ]
    .into_iter()
    .map(|(category, completed, total, percentage)| FulfillmentCategory {
        category: category.into(),
        completed,
        total,
        percentage,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_one_sponsor_per_tier() {
        let seed = SeedData::builtin();
        let mut tiers: Vec<Tier> = seed.sponsors.iter().map(|s| s.tier).collect();
        tiers.sort();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn sparse_sponsor_json_defaults_nested_fields() {
        let json = r#"{
            "sponsors": [{
                "id": 9, "name": "Bare Co", "tier": "Bronze", "value": 0.0,
                "status": "Pending Renewal", "renewal": "2024-01-01"
            }]
        }"#;
        let seed = SeedData::from_json(json).unwrap();
        let s = &seed.sponsors[0];
        assert_eq!(s.status, SponsorStatus::PendingRenewal);
        assert_eq!(s.overall_fulfillment(), 0.0);
        assert_eq!(s.exposure_value(), 0.0);
        assert_eq!(s.satisfaction_score(), 0.0);
        assert!(seed.tasks.is_empty());
    }

    #[test]
    fn tier_rank_orders_diamond_first() {
        assert!(Tier::Diamond.rank() < Tier::Bronze.rank());
        assert!(Tier::Diamond < Tier::Platinum);
    }
}
