// Ticket domain models
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ticket_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub segment: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TicketDraftError {
    #[error("ticket type is required")]
    MissingType,
    #[error("summary is required")]
    MissingSummary,
    #[error("priority must be between 1 and 10, got {0}")]
    PriorityOutOfRange(u8),
}

/// Payload for create/update operations against the evaluation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_ticket_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_guid: Option<String>,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub priority: u8,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl TicketDraft {
    /// Trims free-text fields and checks required ones.
    pub fn validated(mut self) -> Result<Self, TicketDraftError> {
        self.ticket_type = self.ticket_type.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.client_guid = self
            .client_guid
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        if self.ticket_type.is_empty() {
            return Err(TicketDraftError::MissingType);
        }
        if self.summary.is_empty() {
            return Err(TicketDraftError::MissingSummary);
        }
        if !(1..=10).contains(&self.priority) {
            return Err(TicketDraftError::PriorityOutOfRange(self.priority));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TicketDraft {
        TicketDraft {
            raw_ticket_id: None,
            client_guid: Some("  abc-123  ".to_string()),
            ticket_type: " Жалоба ".to_string(),
            priority: 5,
            summary: " Не проходит платеж ".to_string(),
            language: Some("RU".to_string()),
            sentiment: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_validated_trims_fields() {
        let draft = draft().validated().unwrap();
        assert_eq!(draft.ticket_type, "Жалоба");
        assert_eq!(draft.summary, "Не проходит платеж");
        assert_eq!(draft.client_guid.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_validated_rejects_blank_type() {
        let mut d = draft();
        d.ticket_type = "   ".to_string();
        assert_eq!(d.validated().unwrap_err(), TicketDraftError::MissingType);
    }

    #[test]
    fn test_validated_rejects_priority_out_of_range() {
        let mut d = draft();
        d.priority = 11;
        assert_eq!(
            d.validated().unwrap_err(),
            TicketDraftError::PriorityOutOfRange(11)
        );
    }
}
