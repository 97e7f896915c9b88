//! HTTP routes for intake endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_report, get_session, health, reset_session, submit_turn, IntakeHandlers,
};

/// Creates the intake router with all endpoints.
///
/// Routes:
/// - `GET /` - Health check
/// - `POST /gpt` - Process one input (original endpoint)
/// - `POST /intake/turns` - Process one input
/// - `GET /intake/sessions/:key` - Session view
/// - `DELETE /intake/sessions/:key` - Reset the session
/// - `POST /intake/sessions/:key/report` - Generate the report
pub fn intake_routes(handlers: IntakeHandlers) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/gpt", post(submit_turn))
        .route("/intake/turns", post(submit_turn))
        .route("/intake/sessions/:key", get(get_session).delete(reset_session))
        .route("/intake/sessions/:key/report", post(generate_report))
        .with_state(handlers)
}
