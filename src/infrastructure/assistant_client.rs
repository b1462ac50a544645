// AI assistant proxy client - remote widget planning
use crate::application::gateways::{AssistantGateway, RemotePlan};
use crate::domain::conversation::HistoryTurn;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AssistantClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PlanRequest<'a> {
    query: &'a str,
    history: &'a [HistoryTurn],
}

impl AssistantClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build assistant HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl AssistantGateway for AssistantClient {
    async fn plan_widgets(&self, query: &str, history: &[HistoryTurn]) -> Result<RemotePlan> {
        let response = self
            .client
            .post(format!("{}/api/assistant/dashboard", self.base_url))
            .json(&PlanRequest { query, history })
            .send()
            .await
            .context("Failed to reach assistant service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("assistant service returned {}: {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse assistant plan")
    }
}
