// CSV intake domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeDataset {
    Tickets,
    Offices,
    Managers,
}

impl IntakeDataset {
    /// Path segment on the intake service.
    pub fn endpoint(&self) -> &'static str {
        match self {
            IntakeDataset::Tickets => "tickets",
            IntakeDataset::Offices => "offices",
            IntakeDataset::Managers => "managers",
        }
    }
}

impl FromStr for IntakeDataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tickets" => Ok(IntakeDataset::Tickets),
            "offices" => Ok(IntakeDataset::Offices),
            "managers" => Ok(IntakeDataset::Managers),
            other => Err(format!("unknown intake dataset: {other}")),
        }
    }
}

impl fmt::Display for IntakeDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Per-row processing status reported by the intake pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowStatus {
    Assigned,
    Enriched,
    InQueue,
    Failed,
    Unassigned,
}

impl RowStatus {
    /// Rows still waiting for the assignment engine.
    pub fn is_pending(&self) -> bool {
        matches!(self, RowStatus::InQueue)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResult {
    pub client_guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ticket_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enriched_ticket_id: Option<i64>,
    pub status: RowStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_office_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_manager_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
}

/// Batch import response from the intake service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub processed_count: u32,
    #[serde(default)]
    pub failed_count: u32,
    #[serde(default)]
    pub results: Vec<RowResult>,
}

/// One entry of the persisted upload history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: Uuid,
    pub dataset: IntakeDataset,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub receipt: IntakeReceipt,
}

/// Queue buckets shown on the operations page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueCounters {
    pub assigned: usize,
    pub in_queue: usize,
    pub failed: usize,
}

/// Bounded preview of an uploaded CSV, for the import page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
    pub delimiter: char,
}
