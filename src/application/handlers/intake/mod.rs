//! Intake handlers.
//!
//! - `HandleTurnHandler` - one dialogue turn (greeting, reply, nudge, or report hand-off)
//! - `ReportTriggerHandler` - report generation and completion policy
//! - `IntakeService` - per-session locking, load/create and best-effort save

mod handle_turn;
mod outcome;
mod service;
mod trigger_report;

pub use handle_turn::{GenerationLimits, HandleTurnCommand, HandleTurnHandler};
pub use outcome::{TriggerOutcome, TurnKind, TurnOutcome};
pub use service::{IntakeError, IntakeRequest, IntakeService};
pub use trigger_report::{ReportTriggerHandler, REPORT_READY};
