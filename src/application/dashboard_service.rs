// Dashboard service - aggregate statistics with degradation to sample data
use crate::application::gateways::EvaluationGateway;
use crate::domain::stats::{DashboardStats, InsightsReport, ServiceHealth};
use crate::infrastructure::fallback;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn EvaluationGateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn EvaluationGateway>) -> Self {
        Self { gateway }
    }

    /// Statistics snapshot. An unreachable evaluation service degrades to
    /// the bundled sample snapshot so the dashboard stays interactive.
    pub async fn stats(&self) -> DashboardStats {
        match self.gateway.dashboard_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("evaluation stats unavailable, serving sample data: {e:#}");
                fallback::sample_stats()
            }
        }
    }

    pub async fn health(&self) -> anyhow::Result<ServiceHealth> {
        self.gateway.service_health().await
    }

    pub async fn insights(&self) -> anyhow::Result<InsightsReport> {
        self.gateway.insights().await
    }
}
