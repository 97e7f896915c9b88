//! ReportTriggerHandler - Hand the conversation to the report writer

use std::sync::Arc;
use std::time::Duration;

use super::outcome::{TriggerOutcome, TurnKind};
use crate::domain::intake::{
    report_failure_reply, ReportCompletion, Session, NOTHING_TO_REPORT, REPORT_ALREADY_GENERATED,
};
use crate::ports::{GenerationError, ReportError, ReportGenerator, ReportRequest};

/// Reply accompanying a freshly generated report.
pub const REPORT_READY: &str = "✅ Your report is ready.";

/// Handler for the report trigger phrase.
pub struct ReportTriggerHandler {
    generator: Arc<dyn ReportGenerator>,
    completion: ReportCompletion,
    timeout: Duration,
}

impl ReportTriggerHandler {
    pub fn new(
        generator: Arc<dyn ReportGenerator>,
        completion: ReportCompletion,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            completion,
            timeout,
        }
    }

    /// Generates the report for `session` and applies the completion policy.
    ///
    /// The session is returned unchanged on every path except success.
    pub async fn trigger(&self, mut session: Session) -> TriggerOutcome {
        // 1. A consumed session needs a new turn before another report
        if session.report_consumed() {
            tracing::info!(session = %session.key(), "Report already generated; skipping");
            return TriggerOutcome::new(REPORT_ALREADY_GENERATED, session, TurnKind::AlreadyGenerated);
        }

        // 2. Hand over the existing history as is
        let request = ReportRequest {
            session_key: session.key().clone(),
            role: session.role(),
            style: session.style(),
            history: session.history().to_vec(),
        };

        tracing::info!(
            session = %session.key(),
            phase = ?session.phase(),
            turns = session.history().len(),
            "Reporting"
        );

        let result = tokio::time::timeout(self.timeout, self.generator.generate(request))
            .await
            .unwrap_or_else(|_| Err(ReportError::Generation(GenerationError::timeout(self.timeout))));

        // 3. Apply the completion policy on success only
        match result {
            Ok(report) => {
                session.complete_report(self.completion);
                tracing::info!(
                    session = %session.key(),
                    completion = ?self.completion,
                    report_chars = report.chars().count(),
                    "Report generated"
                );
                TriggerOutcome::new(REPORT_READY, session, TurnKind::Report).with_report(report)
            }
            Err(ReportError::NothingToReport) => {
                tracing::info!(session = %session.key(), "Nothing to report yet");
                TriggerOutcome::new(NOTHING_TO_REPORT, session, TurnKind::NothingToReport)
            }
            Err(ReportError::Generation(err)) => {
                let kind = err.kind();
                tracing::warn!(session = %session.key(), kind = ?kind, error = %err, "Report generation failed");
                TriggerOutcome::new(
                    report_failure_reply(kind, &err.to_string()),
                    session,
                    TurnKind::ReportFailed(kind),
                )
            }
        }
    }
}
