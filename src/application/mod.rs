//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    GenerationLimits, HandleTurnCommand, HandleTurnHandler, IntakeError, IntakeRequest,
    IntakeService, ReportTriggerHandler, TriggerOutcome, TurnKind, TurnOutcome,
};
