//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;

pub use intake::{
    GenerationLimits, HandleTurnCommand, HandleTurnHandler, IntakeError, IntakeRequest,
    IntakeService, ReportTriggerHandler, TriggerOutcome, TurnKind, TurnOutcome,
};
