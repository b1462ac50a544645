// Intake service - CSV preview, batch upload, and async row resolution
use crate::application::gateways::IntakeGateway;
use crate::application::upload_history::UploadHistory;
use crate::domain::intake::{
    CsvPreview, IntakeDataset, QueueCounters, RowResult, RowStatus, UploadRecord,
};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Rows shown in an import preview.
pub const PREVIEW_ROWS: usize = 5;

const POLL_INTERVAL: Duration = Duration::from_secs(4);
const POLL_ATTEMPTS: usize = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV file is empty")]
    Empty,
}

#[derive(Clone)]
pub struct IntakeService {
    gateway: Arc<dyn IntakeGateway>,
    history: UploadHistory,
}

impl IntakeService {
    pub fn new(gateway: Arc<dyn IntakeGateway>, history: UploadHistory) -> Self {
        Self { gateway, history }
    }

    /// Forward a CSV batch to the intake pipeline and log the outcome.
    /// Rows left IN_QUEUE are resolved by a bounded background poll.
    pub async fn upload(
        &self,
        dataset: IntakeDataset,
        file_name: &str,
        payload: Bytes,
    ) -> anyhow::Result<UploadRecord> {
        let started = Instant::now();
        let receipt = self.gateway.upload_csv(dataset, file_name, payload).await?;

        let record = UploadRecord {
            id: Uuid::new_v4(),
            dataset,
            file_name: file_name.to_string(),
            uploaded_at: Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
            receipt,
        };
        self.history.append(record.clone()).await;

        let pending: Vec<String> = record
            .receipt
            .results
            .iter()
            .filter(|r| r.status.is_pending())
            .map(|r| r.client_guid.clone())
            .collect();
        if !pending.is_empty() {
            let gateway = self.gateway.clone();
            let history = self.history.clone();
            let record_id = record.id;
            tokio::spawn(async move {
                poll_pending(gateway, history, record_id, pending, POLL_ATTEMPTS, POLL_INTERVAL)
                    .await;
            });
        }

        Ok(record)
    }

    pub async fn results(&self, client_guids: &[String]) -> anyhow::Result<Vec<RowResult>> {
        self.gateway.results_by_guids(client_guids).await
    }

    pub async fn recent(&self, limit: usize) -> anyhow::Result<Vec<RowResult>> {
        self.gateway.recent_results(limit).await
    }

    pub async fn history_records(&self) -> Vec<UploadRecord> {
        self.history.records().await
    }
}

/// Bounded-retry resolution of queued rows: each pass re-reads the intake
/// results, merges anything no longer IN_QUEUE into the stored record, and
/// stops once nothing is pending or the attempt budget runs out.
async fn poll_pending(
    gateway: Arc<dyn IntakeGateway>,
    history: UploadHistory,
    record_id: Uuid,
    mut pending: Vec<String>,
    max_attempts: usize,
    interval: Duration,
) {
    for _ in 0..max_attempts {
        tokio::time::sleep(interval).await;

        let results = match gateway.results_by_guids(&pending).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("intake results poll failed: {e:#}");
                continue;
            }
        };

        let resolved: Vec<RowResult> = results
            .into_iter()
            .filter(|r| !r.status.is_pending())
            .collect();
        if !resolved.is_empty() {
            history.update_results(record_id, &resolved).await;
            pending.retain(|guid| !resolved.iter().any(|r| &r.client_guid == guid));
        }
        if pending.is_empty() {
            return;
        }
    }
    tracing::warn!(
        "gave up polling intake results for record {record_id}: {} rows still queued",
        pending.len()
    );
}

/// Queue buckets as shown on the operations page.
pub fn queue_counters(rows: &[RowResult]) -> QueueCounters {
    let mut counters = QueueCounters::default();
    for row in rows {
        match row.status {
            RowStatus::Assigned | RowStatus::Enriched => counters.assigned += 1,
            RowStatus::InQueue => counters.in_queue += 1,
            RowStatus::Failed | RowStatus::Unassigned => counters.failed += 1,
        }
    }
    counters
}

/// Bounded client-side preview of a CSV payload. Detects `;` vs `,`
/// delimiters, tolerates a UTF-8 BOM, and handles quoted fields.
/// Quoted line breaks are not supported; this is a preview, not an import.
pub fn preview_csv(text: &str, limit: usize) -> Result<CsvPreview, CsvError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or(CsvError::Empty)?;
    let delimiter = detect_delimiter(header_line);
    let headers = split_row(header_line, delimiter);

    let data_lines: Vec<&str> = lines.collect();
    let total_rows = data_lines.len();
    let rows = data_lines
        .iter()
        .take(limit)
        .map(|l| split_row(l, delimiter))
        .collect();

    Ok(CsvPreview {
        headers,
        rows,
        total_rows,
        delimiter,
    })
}

fn detect_delimiter(header: &str) -> char {
    if header.matches(';').count() > header.matches(',').count() {
        ';'
    } else {
        ','
    }
}

fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Doubled quote is an escaped quote.
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(field.trim().to_string());
            field.clear();
        } else {
            field.push(c);
        }
    }
    fields.push(field.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_detects_semicolon_delimiter_and_strips_bom() {
        let csv = "\u{feff}GUID клиента;Пол клиента;Описание\n\
                   abc-1;Муж;Не работает приложение\n\
                   abc-2;Жен;Смена номера телефона\n";
        let preview = preview_csv(csv, PREVIEW_ROWS).unwrap();

        assert_eq!(preview.delimiter, ';');
        assert_eq!(
            preview.headers,
            vec!["GUID клиента", "Пол клиента", "Описание"]
        );
        assert_eq!(preview.total_rows, 2);
        assert_eq!(preview.rows[1][2], "Смена номера телефона");
    }

    #[test]
    fn test_preview_handles_quoted_fields() {
        let csv = "guid,description\nabc-1,\"ошибка 502, повторяется\"\n";
        let preview = preview_csv(csv, PREVIEW_ROWS).unwrap();
        assert_eq!(preview.delimiter, ',');
        assert_eq!(preview.rows[0][1], "ошибка 502, повторяется");
    }

    #[test]
    fn test_preview_handles_escaped_quotes() {
        let csv = "guid,description\nabc-1,\"сказал \"\"не работает\"\"\"\n";
        let preview = preview_csv(csv, PREVIEW_ROWS).unwrap();
        assert_eq!(preview.rows[0][1], "сказал \"не работает\"");
    }

    #[test]
    fn test_preview_is_row_bounded_but_counts_everything() {
        let mut csv = String::from("guid,description\n");
        for i in 0..12 {
            csv.push_str(&format!("guid-{i},row {i}\n"));
        }
        let preview = preview_csv(&csv, PREVIEW_ROWS).unwrap();
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.total_rows, 12);
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert_eq!(preview_csv("", PREVIEW_ROWS).unwrap_err(), CsvError::Empty);
        assert_eq!(
            preview_csv("\u{feff}\n  \n", PREVIEW_ROWS).unwrap_err(),
            CsvError::Empty
        );
    }

    #[test]
    fn test_queue_counters_bucket_by_status() {
        let row = |status: RowStatus| RowResult {
            client_guid: "g".to_string(),
            raw_ticket_id: None,
            enriched_ticket_id: None,
            status,
            message: String::new(),
            assigned_office_name: None,
            assigned_manager_name: None,
            priority: None,
            language: None,
            ticket_type: None,
        };
        let rows = vec![
            row(RowStatus::Assigned),
            row(RowStatus::Enriched),
            row(RowStatus::InQueue),
            row(RowStatus::Failed),
            row(RowStatus::Unassigned),
        ];

        assert_eq!(
            queue_counters(&rows),
            QueueCounters {
                assigned: 2,
                in_queue: 1,
                failed: 2,
            }
        );
    }
}
