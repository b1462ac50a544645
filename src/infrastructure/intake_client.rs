// Intake service client - multipart CSV upload and result polling
use crate::application::gateways::IntakeGateway;
use crate::domain::intake::{IntakeDataset, IntakeReceipt, RowResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct IntakeClient {
    base_url: String,
    client: reqwest::Client,
}

impl IntakeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build intake HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/intake{}", self.base_url, path)
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("intake service returned {}: {}", status, body);
        }
        Ok(response)
    }
}

#[async_trait]
impl IntakeGateway for IntakeClient {
    async fn upload_csv(
        &self,
        dataset: IntakeDataset,
        file_name: &str,
        payload: Bytes,
    ) -> Result<IntakeReceipt> {
        let part = Part::bytes(payload.to_vec())
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .context("Failed to build CSV multipart body")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(&format!("/{}", dataset.endpoint())))
            .multipart(form)
            .send()
            .await
            .context("Failed to reach intake service")?;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse intake response")
    }

    async fn results_by_guids(&self, client_guids: &[String]) -> Result<Vec<RowResult>> {
        let response = self
            .client
            .get(self.url("/results"))
            .query(&[("clientGuids", client_guids.join(","))])
            .send()
            .await
            .context("Failed to reach intake service")?;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse intake results")
    }

    async fn recent_results(&self, limit: usize) -> Result<Vec<RowResult>> {
        let response = self
            .client
            .get(self.url("/results/recent"))
            .query(&[("limit", limit)])
            .send()
            .await
            .context("Failed to reach intake service")?;

        Self::expect_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse recent intake results")
    }
}
