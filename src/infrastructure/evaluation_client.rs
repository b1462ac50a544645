// Evaluation service client - statistics, insights, and ticket CRUD
use crate::application::gateways::EvaluationGateway;
use crate::domain::stats::{
    BreakdownEntry, DashboardStats, InsightsReport, ServiceHealth, StatsTotals,
};
use crate::domain::ticket::{Ticket, TicketDraft};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EvaluationClient {
    base_url: String,
    client: reqwest::Client,
}

// The evaluation service keys each breakdown entry by its dimension name
// ("city", "type", ...); the domain model uses uniform (label, count).
#[derive(Debug, Deserialize)]
struct StatsDto {
    totals: StatsTotals,
    #[serde(rename = "byCity", default)]
    by_city: Vec<CityCount>,
    #[serde(rename = "byType", default)]
    by_type: Vec<TypeCount>,
    #[serde(rename = "byOffice", default)]
    by_office: Vec<OfficeCount>,
    #[serde(rename = "bySentiment", default)]
    by_sentiment: Vec<SentimentCount>,
    #[serde(rename = "byLanguage", default)]
    by_language: Vec<LanguageCount>,
}

#[derive(Debug, Deserialize)]
struct CityCount {
    city: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct TypeCount {
    #[serde(rename = "type")]
    ticket_type: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct OfficeCount {
    office: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SentimentCount {
    sentiment: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct LanguageCount {
    language: String,
    count: u64,
}

impl From<StatsDto> for DashboardStats {
    fn from(dto: StatsDto) -> Self {
        DashboardStats {
            totals: dto.totals,
            by_city: dto
                .by_city
                .into_iter()
                .map(|e| BreakdownEntry::new(e.city, e.count))
                .collect(),
            by_type: dto
                .by_type
                .into_iter()
                .map(|e| BreakdownEntry::new(e.ticket_type, e.count))
                .collect(),
            by_office: dto
                .by_office
                .into_iter()
                .map(|e| BreakdownEntry::new(e.office, e.count))
                .collect(),
            by_sentiment: dto
                .by_sentiment
                .into_iter()
                .map(|e| BreakdownEntry::new(e.sentiment, e.count))
                .collect(),
            by_language: dto
                .by_language
                .into_iter()
                .map(|e| BreakdownEntry::new(e.language, e.count))
                .collect(),
        }
    }
}

impl EvaluationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build evaluation HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/evaluation{}", self.base_url, path)
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("evaluation service returned {}: {}", status, body);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach evaluation service")?;

        Self::expect_success(response)
            .await?
            .json::<T>()
            .await
            .context("Failed to parse evaluation response")
    }
}

#[async_trait]
impl EvaluationGateway for EvaluationClient {
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(self.get_json::<StatsDto>("/stats").await?.into())
    }

    async fn service_health(&self) -> Result<ServiceHealth> {
        self.get_json("/health").await
    }

    async fn insights(&self) -> Result<InsightsReport> {
        self.get_json("/insights").await
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.get_json("/tickets").await
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket> {
        let response = self
            .client
            .post(self.url("/tickets"))
            .json(draft)
            .send()
            .await
            .context("Failed to reach evaluation service")?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse created ticket")
    }

    async fn update_ticket(&self, id: i64, draft: &TicketDraft) -> Result<Ticket> {
        let response = self
            .client
            .put(self.url(&format!("/tickets/{id}")))
            .json(draft)
            .send()
            .await
            .context("Failed to reach evaluation service")?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse updated ticket")
    }

    async fn delete_ticket(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/tickets/{id}")))
            .send()
            .await
            .context("Failed to reach evaluation service")?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn assign_ticket(&self, id: i64) -> Result<Ticket> {
        let response = self
            .client
            .post(self.url(&format!("/tickets/{id}/assign")))
            .send()
            .await
            .context("Failed to reach evaluation service")?;
        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse assignment response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_dto_maps_dimension_keys_to_labels() {
        let raw = r#"{
            "totals": {"tickets": 128, "avgPriority": 6.4, "vipShare": 0.23, "inRouting": 18},
            "byCity": [{"city": "Алматы", "count": 48}],
            "byType": [{"type": "Жалоба", "count": 18}],
            "byOffice": [{"office": "Алматы Центр", "count": 44}],
            "bySentiment": [{"sentiment": "Негативный", "count": 41}],
            "byLanguage": [{"language": "RU", "count": 90}]
        }"#;
        let stats: DashboardStats = serde_json::from_str::<StatsDto>(raw).unwrap().into();

        assert_eq!(stats.totals.tickets, 128);
        assert_eq!(stats.by_city[0], BreakdownEntry::new("Алматы", 48));
        assert_eq!(stats.by_type[0], BreakdownEntry::new("Жалоба", 18));
        assert_eq!(stats.by_language[0].label, "RU");
    }
}
