// Gateway traits for the upstream routing services
use crate::domain::conversation::HistoryTurn;
use crate::domain::intake::{IntakeDataset, IntakeReceipt, RowResult};
use crate::domain::stats::{DashboardStats, InsightsReport, ServiceHealth};
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::domain::widget::WidgetSpec;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Evaluation/assignment service: statistics and ticket CRUD.
#[async_trait]
pub trait EvaluationGateway: Send + Sync {
    async fn dashboard_stats(&self) -> anyhow::Result<DashboardStats>;

    async fn service_health(&self) -> anyhow::Result<ServiceHealth>;

    async fn insights(&self) -> anyhow::Result<InsightsReport>;

    async fn list_tickets(&self) -> anyhow::Result<Vec<Ticket>>;

    async fn create_ticket(&self, draft: &TicketDraft) -> anyhow::Result<Ticket>;

    async fn update_ticket(&self, id: i64, draft: &TicketDraft) -> anyhow::Result<Ticket>;

    async fn delete_ticket(&self, id: i64) -> anyhow::Result<()>;

    /// Trigger manual assignment for one ticket.
    async fn assign_ticket(&self, id: i64) -> anyhow::Result<Ticket>;
}

/// Intake pipeline: batch CSV import and async row resolution.
#[async_trait]
pub trait IntakeGateway: Send + Sync {
    async fn upload_csv(
        &self,
        dataset: IntakeDataset,
        file_name: &str,
        payload: Bytes,
    ) -> anyhow::Result<IntakeReceipt>;

    async fn results_by_guids(&self, client_guids: &[String]) -> anyhow::Result<Vec<RowResult>>;

    async fn recent_results(&self, limit: usize) -> anyhow::Result<Vec<RowResult>>;
}

/// Reply of the remote widget planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePlan {
    pub reply: String,
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
}

/// AI assistant proxy: free-text query plus bounded history in,
/// reply plus widget specifications out.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    async fn plan_widgets(
        &self,
        query: &str,
        history: &[HistoryTurn],
    ) -> anyhow::Result<RemotePlan>;
}

/// Injected key-value store for the per-browser-equivalent persisted state.
/// Read once at startup, rewritten wholesale on every change.
pub trait KvStore: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
}
