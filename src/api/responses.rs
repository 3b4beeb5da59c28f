//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{EngineError, TimerConfig, TimerState},
    services::{HistorySummary, Notification, SessionRecord},
    state::SessionError,
};

/// Optional overrides for a new session; missing fields use the CLI defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRequest {
    pub segment_minutes: Option<u64>,
    /// Takes precedence over `segment_minutes`
    pub segment_seconds: Option<u64>,
    pub segments: Option<u32>,
}

impl StartRequest {
    /// Parse a request body; an empty body means "use the defaults"
    pub fn from_body(body: &[u8]) -> Result<Self, SessionError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| SessionError::BadRequest(e.to_string()))
    }

    /// Resolve the request against the default session shape
    pub fn resolve(&self, defaults: &TimerConfig) -> Result<TimerConfig, EngineError> {
        let segments = self.segments.unwrap_or(defaults.total_segments());
        match (self.segment_seconds, self.segment_minutes) {
            (Some(seconds), _) => TimerConfig::new(seconds, segments),
            (None, Some(minutes)) => TimerConfig::from_minutes(minutes, segments),
            (None, None) => TimerConfig::new(defaults.segment_duration_seconds(), segments),
        }
    }
}

/// API response structure for session command endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: TimerState,
}

impl ApiResponse {
    /// Create a new API response carrying the session snapshot
    pub fn new(message: String, session: TimerState) -> Self {
        Self {
            status: session.status.to_string(),
            message,
            timestamp: Utc::now(),
            session,
        }
    }
}

/// Error body returned with a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let code = match &self {
            SessionError::NoSession => StatusCode::NOT_FOUND,
            SessionError::AlreadyActive(_) => StatusCode::CONFLICT,
            SessionError::Engine(EngineError::InvalidState { .. }) => StatusCode::CONFLICT,
            SessionError::Engine(EngineError::InvalidConfig(_)) => StatusCode::BAD_REQUEST,
            SessionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SessionError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (code, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Status response with the live session and its progress
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub session: Option<SessionStatus>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub state: TimerState,
    pub config: TimerConfig,
    pub started_at: DateTime<Utc>,
    pub segment_progress_percent: f64,
    pub session_progress_percent: f64,
}

impl SessionStatus {
    pub fn new(state: TimerState, config: TimerConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            segment_progress_percent: config.segment_progress_percent(&state),
            session_progress_percent: config.session_progress_percent(&state),
            state,
            config,
            started_at,
        }
    }
}

/// Finished sessions and their totals
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub summary: HistorySummary,
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_falls_back_to_defaults() {
        let defaults = TimerConfig::default();
        let config = StartRequest::default().resolve(&defaults).unwrap();
        assert_eq!(config, defaults);
    }

    #[test]
    fn start_request_seconds_override_minutes() {
        let request = StartRequest {
            segment_minutes: Some(25),
            segment_seconds: Some(5),
            segments: Some(2),
        };
        let config = request.resolve(&TimerConfig::default()).unwrap();
        assert_eq!(config.segment_duration_seconds(), 5);
        assert_eq!(config.total_segments(), 2);
    }

    #[test]
    fn start_request_body_parsing() {
        let empty = StartRequest::from_body(b"").unwrap();
        assert!(empty.segments.is_none());

        let request = StartRequest::from_body(br#"{"segments": 6}"#).unwrap();
        assert_eq!(request.segments, Some(6));

        let malformed: [&[u8]; 3] = [
            br#"{"segments": -1}"#,
            br#"{"segment_seconds": "ten"}"#,
            b"{",
        ];
        for body in malformed {
            assert!(matches!(
                StartRequest::from_body(body),
                Err(SessionError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn start_request_rejects_zero_segments() {
        let request = StartRequest {
            segments: Some(0),
            ..Default::default()
        };
        assert!(request.resolve(&TimerConfig::default()).is_err());
    }
}
