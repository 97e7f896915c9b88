//! HTTP adapter - REST API over the intake service.
//!
//! [`app_router`] composes the intake routes with the cross-cutting layers
//! (request tracing, timeout, CORS).

pub mod intake;

pub use intake::{intake_routes, ErrorResponse, IntakeHandlers, TurnRequest, TurnResponse};

use http::HeaderValue;
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Builds the full application router.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(
    handlers: IntakeHandlers,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    intake_routes(handlers).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors_origins))
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
