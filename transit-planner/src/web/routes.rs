//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::DomainError;
use crate::reduce::{assign_crew, network_capacity, train_plan, transfer_report};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/transfers", post(plan_transfers))
        .route("/crew", post(plan_crew))
        .route("/trains", post(plan_trains))
        .route("/capacity", post(plan_capacity))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Worst-case transfers between terminal stations.
async fn plan_transfers(Json(req): Json<TransfersRequest>) -> Json<TransfersResponse> {
    let report = transfer_report(&req.rows);
    info!(
        rows = req.rows.len(),
        max_transfers = report.max_transfers,
        "transfers planned"
    );
    Json(report.into())
}

/// Driver and guard roster for a set of slots.
async fn plan_crew(
    State(state): State<AppState>,
    Json(req): Json<CrewRequest>,
) -> Result<Json<CrewResponse>, AppError> {
    let crew = req.crew.len();
    let slots = req.timeslots.len();
    let config = state.roster_config.clone();

    // Matching can take a while on large rosters; keep it off the runtime.
    let outcome = tokio::task::spawn_blocking(move || {
        assign_crew(&req.crew, &req.timeslots, &config)
    })
    .await??;

    info!(crew, slots, feasible = outcome.is_feasible(), "crew planned");
    Ok(Json(outcome.into()))
}

/// Minimum trains for a timetable.
///
/// The colouring search is exponential in the worst case, so it runs on the
/// blocking pool.
async fn plan_trains(Json(req): Json<TrainsRequest>) -> Result<Json<TrainsResponse>, AppError> {
    let response = tokio::task::spawn_blocking(move || {
        let plan = train_plan(&req.timeslots);
        info!(slots = req.timeslots.len(), trains = plan.trains, "trains planned");
        TrainsResponse::from_plan(&plan, &req.timeslots)
    })
    .await?;

    Ok(Json(response))
}

/// Sustainable hourly throughput into a destination.
async fn plan_capacity(Json(req): Json<CapacityRequest>) -> Result<Json<CapacityResponse>, AppError> {
    let trains_per_hour = network_capacity(&req.segments, &req.block_times, req.destination)?;
    info!(
        segments = req.segments.len(),
        destination = %req.destination,
        trains_per_hour,
        "capacity planned"
    );
    Ok(Json(CapacityResponse { trains_per_hour }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("planning task failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
