// Dashboard statistics domain models
use serde::{Deserialize, Serialize};

/// One (label, count) pair of a breakdown series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: u64,
}

impl BreakdownEntry {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsTotals {
    pub tickets: u64,
    pub avg_priority: f64,
    pub vip_share: f64,
    pub in_routing: u64,
}

/// Aggregate routing statistics. Fetched once per dashboard load and held
/// read-only for the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: StatsTotals,
    pub by_city: Vec<BreakdownEntry>,
    pub by_type: Vec<BreakdownEntry>,
    pub by_office: Vec<BreakdownEntry>,
    pub by_sentiment: Vec<BreakdownEntry>,
    pub by_language: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: String,
    pub timestamp: String,
    pub tickets_total: u64,
    pub assigned_total: u64,
    pub unassigned_total: u64,
    pub high_priority_unassigned: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub severity: String,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub generated_at: String,
    pub items: Vec<Insight>,
}
