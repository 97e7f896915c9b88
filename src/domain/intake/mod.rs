//! Intake module - dialogue state and completeness evaluation.
//!
//! # Overview
//!
//! A [`Session`] accumulates [`TurnRecord`]s while the user describes their
//! business. Before each generation the [`ContextWindower`] bounds how much
//! history is sent, and the [`CompletenessEvaluator`] decides whether the
//! user should be nudged toward requesting the report.
//!
//! Everything here is synchronous and free of I/O; orchestration lives in
//! `application::handlers::intake`.

mod completeness;
mod context;
mod failure;
mod persona;
pub mod prompts;
mod session;
mod settings;
mod turn;

pub use completeness::{evaluate, CompletenessEvaluator};
pub use context::{ContextWindower, AGENT_LABEL, USER_LABEL};
pub use failure::{
    failure_reply, report_failure_reply, GenerationErrorKind, MAX_FAILURE_DETAIL_CHARS,
    NOTHING_TO_REPORT, REPORT_ALREADY_GENERATED,
};
pub use persona::{persona_instructions, Role, Style};
pub use session::{IntakePhase, Session, SessionMeta, SessionRecord};
pub use settings::{EvaluationScope, IntakeSettings, ReportCompletion};
pub use turn::TurnRecord;
