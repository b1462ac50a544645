// HTTP request handlers
use crate::application::assistant_service::{AssistantError, AssistantExchange};
use crate::application::intake_service::{self, CsvError, PREVIEW_ROWS};
use crate::application::ticket_service::TicketError;
use crate::domain::intake::{
    CsvPreview, IntakeDataset, QueueCounters, RowResult, UploadRecord,
};
use crate::domain::manager::ManagerProfile;
use crate::domain::stats::{DashboardStats, InsightsReport, ServiceHealth};
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::presentation::app_state::AppState;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_RECENT_LIMIT: usize = 50;
const MAX_RECENT_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("a previous assistant query is still in flight")]
    Busy,
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl From<TicketError> for ApiError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::InvalidDraft(e) => ApiError::BadRequest(e.to_string()),
            TicketError::Upstream(e) => ApiError::Upstream(e),
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::EmptyQuery => ApiError::BadRequest(err.to_string()),
            AssistantError::Busy => ApiError::Busy,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Busy => StatusCode::CONFLICT,
            ApiError::Upstream(e) => {
                tracing::warn!("upstream call failed: {e:#}");
                StatusCode::BAD_GATEWAY
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Liveness of the console itself, not of the upstream services.
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    Json(state.dashboard_service.stats().await)
}

pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceHealth>, ApiError> {
    Ok(Json(state.dashboard_service.health().await?))
}

pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsightsReport>, ApiError> {
    Ok(Json(state.dashboard_service.insights().await?))
}

pub async fn get_profile(State(state): State<Arc<AppState>>) -> Json<ManagerProfile> {
    Json(state.manager_profile.clone())
}

pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Json<Vec<Ticket>> {
    Json(state.ticket_service.list().await)
}

pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TicketDraft>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = state.ticket_service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(draft): Json<TicketDraft>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(state.ticket_service.update(id, draft).await?))
}

pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.ticket_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
    Ok(Json(state.ticket_service.assign(id).await?))
}

/// Multipart CSV upload, forwarded to the intake pipeline.
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadRecord>, ApiError> {
    let dataset: IntakeDataset = dataset.parse().map_err(ApiError::BadRequest)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.csv").to_string();
        let payload = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("could not read file field: {e}")))?;

        let record = state
            .intake_service
            .upload(dataset, &file_name, payload)
            .await?;
        return Ok(Json(record));
    }

    Err(ApiError::BadRequest(
        "multipart field 'file' is required".to_string(),
    ))
}

/// Bounded preview of a CSV payload before the operator commits an upload.
pub async fn preview_upload(body: String) -> Result<Json<CsvPreview>, ApiError> {
    match intake_service::preview_csv(&body, PREVIEW_ROWS) {
        Ok(preview) => Ok(Json(preview)),
        Err(CsvError::Empty) => Err(ApiError::BadRequest(CsvError::Empty.to_string())),
    }
}

#[derive(Deserialize)]
pub struct ResultsQuery {
    #[serde(rename = "clientGuids")]
    pub client_guids: String,
}

pub async fn intake_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<RowResult>>, ApiError> {
    let guids: Vec<String> = query
        .client_guids
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();
    if guids.is_empty() {
        return Err(ApiError::BadRequest(
            "clientGuids must contain at least one GUID".to_string(),
        ));
    }
    Ok(Json(state.intake_service.results(&guids).await?))
}

#[derive(Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub async fn recent_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<RowResult>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);
    Ok(Json(state.intake_service.recent(limit).await?))
}

/// Queue buckets over the most recent intake results.
pub async fn queue_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QueueCounters>, ApiError> {
    let rows = state.intake_service.recent(DEFAULT_RECENT_LIMIT).await?;
    Ok(Json(intake_service::queue_counters(&rows)))
}

pub async fn upload_history_log(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<UploadRecord>> {
    Json(state.intake_service.history_records().await)
}

#[derive(Deserialize)]
pub struct AssistantRequest {
    pub query: String,
}

pub async fn assistant_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantExchange>, ApiError> {
    let exchange = state.assistant_service.submit(&request.query).await?;
    Ok(Json(exchange))
}
