// Assistant service - conversation log plus local or remote widget planning
use crate::application::dashboard_service::DashboardService;
use crate::application::gateways::AssistantGateway;
use crate::application::{planner, widget_resolver};
use crate::domain::conversation::{AssistantMessage, Conversation};
use crate::domain::widget::WidgetView;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Remote plans are size-bounded; the local rule engine is not.
const MAX_REMOTE_WIDGETS: usize = 4;

const WELCOME_REPLY: &str = "Я помогу построить виджеты по данным маршрутизации. \
Сформулируйте запрос, например: «Покажи распределение типов обращений по городам».";

const FALLBACK_REPLY: &str = "Сервис ассистента недоступен. \
Показал базовые виджеты по типам и географии обращений.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerMode {
    Local,
    Remote,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("query is empty")]
    EmptyQuery,
    #[error("a previous query is still in flight")]
    Busy,
}

/// What the operator gets back for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantExchange {
    pub reply: String,
    pub widgets: Vec<WidgetView>,
}

pub struct AssistantService {
    gateway: Arc<dyn AssistantGateway>,
    dashboard: DashboardService,
    mode: PlannerMode,
    conversation: Mutex<Conversation>,
    busy: AtomicBool,
}

/// Clears the busy flag once the in-flight query resolves or fails.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AssistantService {
    pub fn new(
        gateway: Arc<dyn AssistantGateway>,
        dashboard: DashboardService,
        mode: PlannerMode,
    ) -> Self {
        let mut conversation = Conversation::new();
        conversation.push(AssistantMessage::assistant(WELCOME_REPLY, Vec::new()));
        Self {
            gateway,
            dashboard,
            mode,
            conversation: Mutex::new(conversation),
            busy: AtomicBool::new(false),
        }
    }

    /// Plan widgets for one operator query, resolve them against the
    /// current stats snapshot, and append both turns to the log.
    ///
    /// Rejects empty queries and concurrent submissions; a remote planner
    /// failure degrades to the two default widgets and never surfaces.
    pub async fn submit(&self, query: &str) -> Result<AssistantExchange, AssistantError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AssistantError::EmptyQuery);
        }
        let _busy = BusyGuard::acquire(&self.busy).ok_or(AssistantError::Busy)?;

        let history = self.conversation.lock().await.history_tail();
        let (reply, specs) = match self.mode {
            PlannerMode::Local => {
                let outcome = planner::plan(trimmed);
                (outcome.reply, outcome.widgets)
            }
            PlannerMode::Remote => match self.gateway.plan_widgets(trimmed, &history).await {
                Ok(mut plan) => {
                    plan.widgets.truncate(MAX_REMOTE_WIDGETS);
                    (plan.reply, plan.widgets)
                }
                Err(e) => {
                    tracing::warn!("remote planner failed, using default widgets: {e:#}");
                    (FALLBACK_REPLY.to_string(), planner::default_widgets())
                }
            },
        };

        let stats = self.dashboard.stats().await;
        let widgets = widget_resolver::resolve_all(&specs, &stats);

        let mut conversation = self.conversation.lock().await;
        conversation.push(AssistantMessage::operator(trimmed));
        conversation.push(AssistantMessage::assistant(reply.clone(), widgets.clone()));

        Ok(AssistantExchange { reply, widgets })
    }

    pub async fn transcript(&self) -> Vec<AssistantMessage> {
        self.conversation.lock().await.messages().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gateways::{EvaluationGateway, RemotePlan};
    use crate::domain::conversation::{HistoryTurn, Role};
    use crate::domain::stats::{DashboardStats, InsightsReport, ServiceHealth};
    use crate::domain::ticket::{Ticket, TicketDraft};
    use crate::domain::widget::{StatSource, WidgetKind, WidgetSpec};
    use crate::infrastructure::fallback;
    use async_trait::async_trait;

    struct StubEvaluation;

    #[async_trait]
    impl EvaluationGateway for StubEvaluation {
        async fn dashboard_stats(&self) -> anyhow::Result<DashboardStats> {
            Ok(fallback::sample_stats())
        }
        async fn service_health(&self) -> anyhow::Result<ServiceHealth> {
            anyhow::bail!("not used")
        }
        async fn insights(&self) -> anyhow::Result<InsightsReport> {
            anyhow::bail!("not used")
        }
        async fn list_tickets(&self) -> anyhow::Result<Vec<Ticket>> {
            anyhow::bail!("not used")
        }
        async fn create_ticket(&self, _: &TicketDraft) -> anyhow::Result<Ticket> {
            anyhow::bail!("not used")
        }
        async fn update_ticket(&self, _: i64, _: &TicketDraft) -> anyhow::Result<Ticket> {
            anyhow::bail!("not used")
        }
        async fn delete_ticket(&self, _: i64) -> anyhow::Result<()> {
            anyhow::bail!("not used")
        }
        async fn assign_ticket(&self, _: i64) -> anyhow::Result<Ticket> {
            anyhow::bail!("not used")
        }
    }

    struct StubPlanner {
        plan: anyhow::Result<RemotePlan>,
    }

    #[async_trait]
    impl AssistantGateway for StubPlanner {
        async fn plan_widgets(
            &self,
            _query: &str,
            _history: &[HistoryTurn],
        ) -> anyhow::Result<RemotePlan> {
            match &self.plan {
                Ok(plan) => Ok(plan.clone()),
                Err(e) => anyhow::bail!("{e}"),
            }
        }
    }

    fn service(plan: anyhow::Result<RemotePlan>, mode: PlannerMode) -> AssistantService {
        let dashboard = DashboardService::new(Arc::new(StubEvaluation));
        AssistantService::new(Arc::new(StubPlanner { plan }), dashboard, mode)
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_logging() {
        let service = service(Err(anyhow::anyhow!("unused")), PlannerMode::Local);
        assert!(matches!(
            service.submit("   ").await,
            Err(AssistantError::EmptyQuery)
        ));
        // Only the welcome message remains.
        assert_eq!(service.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn test_local_mode_plans_and_appends_two_turns() {
        let service = service(Err(anyhow::anyhow!("unused")), PlannerMode::Local);
        let exchange = service.submit("Покажи тональность обращений").await.unwrap();

        assert_eq!(exchange.widgets.len(), 1);
        let transcript = service.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::Operator);
        assert_eq!(transcript[2].role, Role::Assistant);
        assert_eq!(transcript[2].widgets.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_default_widgets() {
        let service = service(Err(anyhow::anyhow!("connection refused")), PlannerMode::Remote);
        let exchange = service.submit("по городам").await.unwrap();

        assert_eq!(exchange.reply, FALLBACK_REPLY);
        let sources: Vec<StatSource> = exchange.widgets.iter().map(|w| w.source).collect();
        assert_eq!(sources, vec![StatSource::ByType, StatSource::ByCity]);
    }

    #[tokio::test]
    async fn test_remote_plan_is_truncated_to_four_widgets() {
        let specs: Vec<WidgetSpec> = vec![
            WidgetSpec::new(WidgetKind::Bar, StatSource::ByType, "Типы"),
            WidgetSpec::new(WidgetKind::Bar, StatSource::ByCity, "География"),
            WidgetSpec::new(WidgetKind::Donut, StatSource::BySentiment, "Тональность"),
            WidgetSpec::new(WidgetKind::List, StatSource::ByOffice, "Офисы"),
            WidgetSpec::new(WidgetKind::Bar, StatSource::ByLanguage, "Языки"),
            WidgetSpec::new(WidgetKind::Stat, StatSource::VipShare, "VIP"),
        ];
        let service = service(
            Ok(RemotePlan {
                reply: "Готово".to_string(),
                widgets: specs,
            }),
            PlannerMode::Remote,
        );

        let exchange = service.submit("всё сразу").await.unwrap();
        assert_eq!(exchange.widgets.len(), 4);
    }
}
