//! Session aggregate: one user's intake conversation.
//!
//! A session owns its turn history outright. It is created on the first
//! turn for a key, mutated only by the dialogue controller and the report
//! trigger, and persisted as a [`SessionRecord`].

use serde::{Deserialize, Serialize};

use super::persona::{Role, Style};
use super::settings::ReportCompletion;
use super::turn::TurnRecord;
use crate::domain::foundation::{SessionKey, Timestamp};

/// Where a session stands in the intake lifecycle.
///
/// Report generation is a transient step inside a single trigger call and
/// is never stored, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    /// No intake in progress (new, or a report was just produced).
    #[default]
    Idle,
    /// Turns are being collected.
    Collecting,
    /// Completeness was reached and the user has been told how to trigger the report.
    ReadyNudged,
}

/// Session aggregate.
///
/// # Invariants
///
/// - `history` is in chronological order and is never reordered
/// - `role` and `style` never change after creation
/// - `ready_to_generate` reflects the last evaluated turn only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SessionRecord", from = "SessionRecord")]
pub struct Session {
    key: SessionKey,
    role: Role,
    style: Style,
    history: Vec<TurnRecord>,
    ready_to_generate: bool,
    phase: IntakePhase,
    report_consumed: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates an empty, idle session.
    pub fn new(key: SessionKey, role: Role, style: Style) -> Self {
        let now = Timestamp::now();
        Self {
            key,
            role,
            style,
            history: Vec::new(),
            ready_to_generate: false,
            phase: IntakePhase::Idle,
            report_consumed: false,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Turn history, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn ready_to_generate(&self) -> bool {
        self.ready_to_generate
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    /// True after a report was produced under [`ReportCompletion::MarkConsumed`]
    /// and no turn has been added since.
    pub fn report_consumed(&self) -> bool {
        self.report_consumed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Restarts the intake with the greeting exchange as the only turn.
    pub fn begin(&mut self, greeting_turn: TurnRecord) {
        self.history.clear();
        self.history.push(greeting_turn);
        self.ready_to_generate = false;
        self.report_consumed = false;
        self.phase = IntakePhase::Collecting;
        self.touch();
    }

    /// Appends a completed turn and records the readiness evaluated for it.
    ///
    /// Oldest turns are evicted while the history is longer than
    /// `max_retained_turns`.
    pub fn record_turn(&mut self, turn: TurnRecord, ready: bool, max_retained_turns: usize) {
        self.history.push(turn);
        if self.history.len() > max_retained_turns {
            let excess = self.history.len() - max_retained_turns;
            self.history.drain(..excess);
        }

        self.ready_to_generate = ready;
        self.phase = if ready {
            IntakePhase::ReadyNudged
        } else {
            IntakePhase::Collecting
        };
        self.report_consumed = false;
        self.touch();
    }

    /// Applies the completion policy after a report was produced.
    pub fn complete_report(&mut self, completion: ReportCompletion) {
        match completion {
            ReportCompletion::ClearHistory => {
                self.history.clear();
                self.report_consumed = false;
            }
            ReportCompletion::MarkConsumed => {
                self.report_consumed = true;
            }
        }
        self.ready_to_generate = false;
        self.phase = IntakePhase::Idle;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Persisted record
// ════════════════════════════════════════════════════════════════════════════════

/// Stored form of a session, shared by every [`SessionStore`] backend.
///
/// [`SessionStore`]: crate::ports::SessionStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_meta: SessionMeta,
    pub history: Vec<TurnRecord>,
    pub ready_to_generate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub key: SessionKey,
    pub role: Role,
    pub style: Style,
    #[serde(default)]
    pub phase: IntakePhase,
    #[serde(default)]
    pub report_consumed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        Self {
            session_meta: SessionMeta {
                key: session.key,
                role: session.role,
                style: session.style,
                phase: session.phase,
                report_consumed: session.report_consumed,
                created_at: session.created_at,
                updated_at: session.updated_at,
            },
            history: session.history,
            ready_to_generate: session.ready_to_generate,
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        let meta = record.session_meta;
        Self {
            key: meta.key,
            role: meta.role,
            style: meta.style,
            history: record.history,
            ready_to_generate: record.ready_to_generate,
            phase: meta.phase,
            report_consumed: meta.report_consumed,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(
            SessionKey::new("user-1").unwrap(),
            Role::Auditor,
            Style::Formal,
        )
    }

    fn turn(n: usize) -> TurnRecord {
        TurnRecord::new(format!("user {}", n), format!("agent {}", n))
    }

    // Construction

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = test_session();
        assert_eq!(session.phase(), IntakePhase::Idle);
        assert!(session.history().is_empty());
        assert!(!session.ready_to_generate());
        assert!(!session.report_consumed());
    }

    // Begin

    #[test]
    fn begin_replaces_history_with_greeting() {
        let mut session = test_session();
        session.record_turn(turn(1), false, 10);
        session.record_turn(turn(2), true, 10);

        session.begin(TurnRecord::new("start", "Hello"));

        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].user(), "start");
        assert_eq!(session.phase(), IntakePhase::Collecting);
        assert!(!session.ready_to_generate());
    }

    // Record turn

    #[test]
    fn record_turn_keeps_chronological_order() {
        let mut session = test_session();
        for n in 1..=3 {
            session.record_turn(turn(n), false, 10);
        }

        let users: Vec<&str> = session.history().iter().map(|t| t.user()).collect();
        assert_eq!(users, vec!["user 1", "user 2", "user 3"]);
    }

    #[test]
    fn record_turn_evicts_oldest_beyond_cap() {
        let mut session = test_session();
        for n in 1..=5 {
            session.record_turn(turn(n), false, 3);
        }

        let users: Vec<&str> = session.history().iter().map(|t| t.user()).collect();
        assert_eq!(users, vec!["user 3", "user 4", "user 5"]);
    }

    #[test]
    fn record_turn_tracks_readiness_and_phase() {
        let mut session = test_session();

        session.record_turn(turn(1), true, 10);
        assert!(session.ready_to_generate());
        assert_eq!(session.phase(), IntakePhase::ReadyNudged);

        session.record_turn(turn(2), false, 10);
        assert!(!session.ready_to_generate());
        assert_eq!(session.phase(), IntakePhase::Collecting);
    }

    #[test]
    fn record_turn_clears_consumed_flag() {
        let mut session = test_session();
        session.record_turn(turn(1), true, 10);
        session.complete_report(ReportCompletion::MarkConsumed);
        assert!(session.report_consumed());

        session.record_turn(turn(2), false, 10);
        assert!(!session.report_consumed());
    }

    // Complete report

    #[test]
    fn complete_report_clear_history_resets_to_idle() {
        let mut session = test_session();
        session.record_turn(turn(1), true, 10);

        session.complete_report(ReportCompletion::ClearHistory);

        assert!(session.history().is_empty());
        assert!(!session.ready_to_generate());
        assert!(!session.report_consumed());
        assert_eq!(session.phase(), IntakePhase::Idle);
    }

    #[test]
    fn complete_report_mark_consumed_keeps_history() {
        let mut session = test_session();
        session.record_turn(turn(1), true, 10);

        session.complete_report(ReportCompletion::MarkConsumed);

        assert_eq!(session.history().len(), 1);
        assert!(session.report_consumed());
        assert!(!session.ready_to_generate());
        assert_eq!(session.phase(), IntakePhase::Idle);
    }

    // Persisted record

    #[test]
    fn serializes_with_session_meta_in_camel_case() {
        let mut session = test_session();
        session.record_turn(turn(1), true, 10);

        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["sessionMeta"]["key"], "user-1");
        assert_eq!(json["sessionMeta"]["role"], "auditor");
        assert_eq!(json["sessionMeta"]["style"], "formal");
        assert_eq!(json["sessionMeta"]["phase"], "ready_nudged");
        assert_eq!(json["sessionMeta"]["reportConsumed"], false);
        assert!(json["sessionMeta"]["createdAt"].is_string());
        assert!(json["sessionMeta"]["updatedAt"].is_string());
        assert_eq!(json["history"][0]["user"], "user 1");
        assert_eq!(json["readyToGenerate"], true);
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let mut session = test_session();
        session.record_turn(turn(1), false, 10);
        session.record_turn(turn(2), true, 10);

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
    }

    #[test]
    fn record_without_phase_defaults_to_idle() {
        let json = r#"{
            "sessionMeta": {
                "key": "legacy",
                "role": "developer",
                "style": "technical",
                "createdAt": "2024-01-15T10:30:00Z",
                "updatedAt": "2024-01-15T10:35:00Z"
            },
            "history": [{"user": "hi", "agent": "hello"}],
            "readyToGenerate": false
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();

        assert_eq!(session.phase(), IntakePhase::Idle);
        assert_eq!(session.role(), Role::Developer);
        assert_eq!(session.style(), Style::Technical);
        assert_eq!(session.history().len(), 1);
    }
}
