// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::assistant_service::AssistantService;
use crate::application::dashboard_service::DashboardService;
use crate::application::intake_service::IntakeService;
use crate::application::ticket_service::TicketService;
use crate::application::upload_history::UploadHistory;
use crate::infrastructure::assistant_client::AssistantClient;
use crate::infrastructure::config::load_console_config;
use crate::infrastructure::evaluation_client::EvaluationClient;
use crate::infrastructure::fallback;
use crate::infrastructure::file_store::JsonFileStore;
use crate::infrastructure::intake_client::IntakeClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    assign_ticket, assistant_query, create_ticket, delete_ticket, get_health, get_insights,
    get_profile, get_stats, health_check, intake_results, list_tickets, preview_upload,
    queue_summary, recent_results, update_ticket, upload_csv, upload_history_log,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_console_config()?;

    // Upstream clients (infrastructure layer)
    let evaluation_client = Arc::new(EvaluationClient::new(
        &config.evaluation.base_url,
        Duration::from_secs(config.evaluation.timeout_secs),
    )?);
    let intake_client = Arc::new(IntakeClient::new(
        &config.intake.base_url,
        Duration::from_secs(config.intake.timeout_secs),
    )?);
    let assistant_client = Arc::new(AssistantClient::new(
        &config.assistant.base_url,
        Duration::from_secs(config.assistant.timeout_secs),
    )?);

    let store = Arc::new(JsonFileStore::new(&config.storage.history_path));
    let history = UploadHistory::open(store);

    // Services (application layer)
    let dashboard_service = DashboardService::new(evaluation_client.clone());
    let ticket_service = TicketService::new(evaluation_client);
    let intake_service = IntakeService::new(intake_client, history);
    let assistant_service = AssistantService::new(
        assistant_client,
        dashboard_service.clone(),
        config.assistant.planner_mode()?,
    );

    let state = Arc::new(AppState {
        dashboard_service,
        ticket_service,
        intake_service,
        assistant_service,
        manager_profile: fallback::sample_manager(),
    });

    // Router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/stats", get(get_stats))
        .route("/health", get(get_health))
        .route("/insights", get(get_insights))
        .route("/profile", get(get_profile))
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route("/tickets/:id", put(update_ticket).delete(delete_ticket))
        .route("/tickets/:id/assign", post(assign_ticket))
        .route("/intake/preview", post(preview_upload))
        .route("/intake/results", get(intake_results))
        .route("/intake/results/recent", get(recent_results))
        .route("/intake/queue", get(queue_summary))
        .route("/intake/history", get(upload_history_log))
        .route("/intake/:dataset", post(upload_csv))
        .route("/assistant/dashboard", post(assistant_query))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind))?;
    tracing::info!("starting routing-console on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
