//! HTTP handlers for intake endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::intake::{IntakeError, IntakeService};
use crate::domain::foundation::SessionKey;

use super::dto::{
    ErrorResponse, HealthResponse, SessionCommandResponse, SessionResponse, TurnRequest,
    TurnResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IntakeHandlers {
    service: Arc<IntakeService>,
    max_query_chars: usize,
}

impl IntakeHandlers {
    pub fn new(service: Arc<IntakeService>, max_query_chars: usize) -> Self {
        Self {
            service,
            max_query_chars,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET / - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "consult-intake API is running",
    })
}

/// POST /gpt, POST /intake/turns - Process one user input
pub async fn submit_turn(
    State(handlers): State<IntakeHandlers>,
    payload: Result<Json<TurnRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let request = match req.into_intake(handlers.max_query_chars) {
        Ok(request) => request,
        Err(message) => return bad_request(message),
    };

    let outcome = handlers.service.submit(request).await;
    tracing::debug!(session = %outcome.session.key(), kind = ?outcome.kind, "Turn processed");

    (StatusCode::OK, Json(TurnResponse::from(outcome))).into_response()
}

/// GET /intake/sessions/:key - Get the stored session
pub async fn get_session(
    State(handlers): State<IntakeHandlers>,
    Path(key): Path<String>,
) -> Response {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers.service.session(&key).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// DELETE /intake/sessions/:key - Reset a session
pub async fn reset_session(
    State(handlers): State<IntakeHandlers>,
    Path(key): Path<String>,
) -> Response {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers.service.reset(&key).await {
        Ok(()) => {
            let response = SessionCommandResponse {
                session_key: key.to_string(),
                message: "Session reset".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// POST /intake/sessions/:key/report - Generate the report for a stored session
pub async fn generate_report(
    State(handlers): State<IntakeHandlers>,
    Path(key): Path<String>,
) -> Response {
    let key = match parse_key(&key) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match handlers.service.generate_report(&key).await {
        Ok(outcome) => (StatusCode::OK, Json(TurnResponse::from(outcome))).into_response(),
        Err(e) => handle_intake_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_key(raw: &str) -> Result<SessionKey, Response> {
    SessionKey::new(raw).map_err(|e| bad_request(e.to_string()))
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn handle_intake_error(error: IntakeError) -> Response {
    match &error {
        IntakeError::SessionNotFound(key) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.user_message(), key)),
        )
            .into_response(),
        IntakeError::Storage(e) => {
            tracing::error!(error = %e, "Session storage failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::unavailable(error.user_message())),
            )
                .into_response()
        }
    }
}
