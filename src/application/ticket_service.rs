// Ticket service - CRUD and manual assignment against the evaluation service
use crate::application::gateways::EvaluationGateway;
use crate::domain::ticket::{Ticket, TicketDraft, TicketDraftError};
use crate::infrastructure::fallback;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error(transparent)]
    InvalidDraft(#[from] TicketDraftError),
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct TicketService {
    gateway: Arc<dyn EvaluationGateway>,
}

impl TicketService {
    pub fn new(gateway: Arc<dyn EvaluationGateway>) -> Self {
        Self { gateway }
    }

    /// Ticket list, degrading to the bundled sample set when the
    /// evaluation service is unreachable.
    pub async fn list(&self) -> Vec<Ticket> {
        match self.gateway.list_tickets().await {
            Ok(tickets) => tickets,
            Err(e) => {
                tracing::warn!("ticket list unavailable, serving sample data: {e:#}");
                fallback::sample_tickets()
            }
        }
    }

    pub async fn create(&self, draft: TicketDraft) -> Result<Ticket, TicketError> {
        let draft = draft.validated()?;
        Ok(self.gateway.create_ticket(&draft).await?)
    }

    pub async fn update(&self, id: i64, draft: TicketDraft) -> Result<Ticket, TicketError> {
        let draft = draft.validated()?;
        Ok(self.gateway.update_ticket(id, &draft).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TicketError> {
        Ok(self.gateway.delete_ticket(id).await?)
    }

    pub async fn assign(&self, id: i64) -> Result<Ticket, TicketError> {
        Ok(self.gateway.assign_ticket(id).await?)
    }
}
