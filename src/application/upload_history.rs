// Upload history - append-only log behind an injected key-value store
use crate::application::gateways::KvStore;
use crate::domain::intake::{RowResult, UploadRecord};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

const STORAGE_KEY: &str = "upload-history";
const MAX_RECORDS: usize = 20;

/// Cross-page upload log. Read from the store once at construction and
/// rewritten wholesale on every change, newest record first.
#[derive(Clone)]
pub struct UploadHistory {
    store: Arc<dyn KvStore>,
    records: Arc<RwLock<Vec<UploadRecord>>>,
}

impl UploadHistory {
    pub fn open(store: Arc<dyn KvStore>) -> Self {
        let records = match store.load(STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable upload history: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("upload history store unavailable: {e:#}");
                Vec::new()
            }
        };
        Self {
            store,
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn records(&self) -> Vec<UploadRecord> {
        self.records.read().await.clone()
    }

    pub async fn append(&self, record: UploadRecord) {
        let mut records = self.records.write().await;
        records.insert(0, record);
        records.truncate(MAX_RECORDS);
        self.persist(&records);
    }

    /// Merge late-arriving row resolutions into a stored record.
    pub async fn update_results(&self, id: Uuid, resolved: &[RowResult]) {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return;
        };
        for update in resolved {
            if let Some(row) = record
                .receipt
                .results
                .iter_mut()
                .find(|r| r.client_guid == update.client_guid)
            {
                *row = update.clone();
            }
        }
        self.persist(&records);
    }

    fn persist(&self, records: &[UploadRecord]) {
        match serde_json::to_string(records) {
            Ok(raw) => {
                if let Err(e) = self.store.save(STORAGE_KEY, &raw) {
                    tracing::warn!("failed to persist upload history: {e:#}");
                }
            }
            Err(e) => tracing::warn!("failed to serialize upload history: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{IntakeDataset, IntakeReceipt, RowStatus};
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl KvStore for MemoryStore {
        fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }
        fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn record(file_name: &str, status: RowStatus) -> UploadRecord {
        UploadRecord {
            id: Uuid::new_v4(),
            dataset: IntakeDataset::Tickets,
            file_name: file_name.to_string(),
            uploaded_at: Utc::now(),
            duration_ms: 120,
            receipt: IntakeReceipt {
                status: "SUCCESS".to_string(),
                message: "Parsing completed".to_string(),
                processed_count: 1,
                failed_count: 0,
                results: vec![RowResult {
                    client_guid: "guid-1".to_string(),
                    raw_ticket_id: Some(1),
                    enriched_ticket_id: None,
                    status,
                    message: String::new(),
                    assigned_office_name: None,
                    assigned_manager_name: None,
                    priority: None,
                    language: None,
                    ticket_type: None,
                }],
            },
        }
    }

    #[tokio::test]
    async fn test_append_persists_wholesale_and_survives_reload() {
        let store = Arc::new(MemoryStore::default());
        let history = UploadHistory::open(store.clone());
        history.append(record("a.csv", RowStatus::Assigned)).await;
        history.append(record("b.csv", RowStatus::InQueue)).await;

        let reloaded = UploadHistory::open(store);
        let records = reloaded.records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_name, "b.csv", "newest first");
    }

    #[tokio::test]
    async fn test_log_is_capped() {
        let history = UploadHistory::open(Arc::new(MemoryStore::default()));
        for i in 0..25 {
            history
                .append(record(&format!("{i}.csv"), RowStatus::Assigned))
                .await;
        }
        assert_eq!(history.records().await.len(), MAX_RECORDS);
    }

    #[tokio::test]
    async fn test_update_results_resolves_pending_row() {
        let history = UploadHistory::open(Arc::new(MemoryStore::default()));
        let rec = record("pending.csv", RowStatus::InQueue);
        let id = rec.id;
        history.append(rec).await;

        let mut resolved = record("ignored.csv", RowStatus::Assigned).receipt.results;
        resolved[0].assigned_manager_name = Some("Омаров Б.".to_string());
        history.update_results(id, &resolved).await;

        let records = history.records().await;
        assert_eq!(records[0].receipt.results[0].status, RowStatus::Assigned);
        assert_eq!(
            records[0].receipt.results[0].assigned_manager_name.as_deref(),
            Some("Омаров Б.")
        );
    }
}
