//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use crate::{
    services::HistorySummary,
    state::{AppState, SessionError},
};
use super::responses::{
    ApiResponse, HealthResponse, HistoryResponse, NotificationsResponse, SessionStatus,
    StartRequest, StatusResponse,
};

/// Handle POST /session/start - Start a new focus session
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, SessionError> {
    let request = StartRequest::from_body(&body)?;
    let config = request.resolve(&state.default_config)?;

    let session = state.start_session(config)?;
    info!(
        "Start endpoint called - {} segments of {}s",
        config.total_segments(),
        config.segment_duration_seconds()
    );
    Ok(Json(ApiResponse::new(
        "Focus session started".to_string(),
        session,
    )))
}

/// Handle POST /session/pause - Pause the running session
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, SessionError> {
    let session = state.pause_session()?;
    Ok(Json(ApiResponse::new("Focus session paused".to_string(), session)))
}

/// Handle POST /session/resume - Resume the paused session
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, SessionError> {
    let session = state.resume_session()?;
    Ok(Json(ApiResponse::new("Focus session resumed".to_string(), session)))
}

/// Handle POST /session/cancel - End the session early
pub async fn cancel_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, SessionError> {
    let session = state.cancel_session()?;
    Ok(Json(ApiResponse::new("Focus session cancelled".to_string(), session)))
}

/// Handle GET /session - Return the current session and server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, SessionError> {
    let session = state
        .get_session()?
        .map(|(snapshot, config, started_at)| SessionStatus::new(snapshot, config, started_at));
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /history - Return finished sessions with totals
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    match state.history.load() {
        Ok(sessions) => Ok(Json(HistoryResponse {
            summary: HistorySummary::from_records(&sessions),
            sessions,
        })),
        Err(e) => {
            error!("Failed to load session history: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /notifications - Return recent milestone messages
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
) -> Json<NotificationsResponse> {
    Json(NotificationsResponse {
        notifications: state.get_notifications(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
