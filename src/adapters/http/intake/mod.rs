//! HTTP adapter for intake endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, SessionCommandResponse, SessionResponse, TurnRequest,
    TurnResponse, TurnView, DEFAULT_TEMPERATURE,
};
pub use handlers::IntakeHandlers;
pub use routes::intake_routes;
