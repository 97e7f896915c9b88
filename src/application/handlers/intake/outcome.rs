//! Result of processing one user input.

use serde::Serialize;

use crate::domain::intake::{GenerationErrorKind, Session};

/// What kind of reply a turn produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Fixed greeting for the start sentinel.
    Greeting,
    /// Normal generated reply.
    Reply,
    /// Generated reply with the completeness nudge appended.
    Nudged,
    /// A report was produced.
    Report,
    /// Trigger arrived before any informational turn.
    NothingToReport,
    /// Trigger repeated on a consumed session.
    AlreadyGenerated,
    /// Dialogue generation failed; the session is unchanged.
    Failed(GenerationErrorKind),
    /// Report generation failed; the history is kept.
    ReportFailed(GenerationErrorKind),
}

impl TurnKind {
    /// Stable label used by transports.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Greeting => "greeting",
            TurnKind::Reply => "reply",
            TurnKind::Nudged => "nudged",
            TurnKind::Report => "report",
            TurnKind::NothingToReport => "nothing_to_report",
            TurnKind::AlreadyGenerated => "already_generated",
            TurnKind::Failed(_) => "failed",
            TurnKind::ReportFailed(_) => "report_failed",
        }
    }

    /// Failure category, if the turn failed.
    pub fn failure(&self) -> Option<GenerationErrorKind> {
        match self {
            TurnKind::Failed(kind) | TurnKind::ReportFailed(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl Serialize for TurnKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reply text plus the session as it should be persisted.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub reply: String,
    pub session: Session,
    /// Report text when this turn produced one.
    pub report: Option<String>,
    pub kind: TurnKind,
}

impl TurnOutcome {
    pub fn new(reply: impl Into<String>, session: Session, kind: TurnKind) -> Self {
        Self {
            reply: reply.into(),
            session,
            report: None,
            kind,
        }
    }

    pub fn with_report(mut self, report: impl Into<String>) -> Self {
        self.report = Some(report.into());
        self
    }
}

/// Outcome of the report trigger; same shape as a dialogue turn.
pub type TriggerOutcome = TurnOutcome;
