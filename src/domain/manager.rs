// Manager profile domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerStats {
    pub assigned_today: u32,
    pub in_progress: u32,
    pub sla_breaches: u32,
    pub avg_handle_time_min: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerProfile {
    pub id: String,
    pub full_name: String,
    pub role: String,
    pub office: String,
    pub department: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    pub shift: String,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub stats: ManagerStats,
}
