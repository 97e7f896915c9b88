//! HTTP DTOs for intake endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::intake::{IntakeRequest, TurnKind, TurnOutcome};
use crate::domain::foundation::{text, SessionKey, Timestamp};
use crate::domain::intake::{IntakePhase, Role, Session, Style};

/// Default sampling temperature for a turn.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One user input. The Spanish field names of the original API are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_role", alias = "rol")]
    pub role: String,
    #[serde(default = "default_temperature", alias = "temperatura")]
    pub temperature: f32,
    #[serde(default = "default_style", alias = "estilo")]
    pub style: String,
    #[serde(default)]
    pub session_key: Option<String>,
}

fn default_role() -> String {
    "Auditor".to_string()
}

fn default_style() -> String {
    "Formal".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl TurnRequest {
    /// Validates the request and converts it for the service.
    ///
    /// A blank or missing `session_key` gets a freshly generated key.
    pub fn into_intake(self, max_query_chars: usize) -> Result<IntakeRequest, String> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err("Query must not be empty".to_string());
        }
        let length = text::char_len(query);
        if length > max_query_chars {
            return Err(format!(
                "Query too long: {} characters (max {})",
                length, max_query_chars
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("Temperature must be between 0.0 and 2.0".to_string());
        }

        let session_key = match self.session_key.as_deref().map(str::trim) {
            None | Some("") => SessionKey::generate(),
            Some(raw) => SessionKey::new(raw).map_err(|e| e.to_string())?,
        };

        Ok(IntakeRequest {
            session_key,
            query: query.to_string(),
            role: Role::parse_lenient(&self.role),
            style: Style::parse_lenient(&self.style),
            temperature: self.temperature,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Result of one turn or report trigger.
#[derive(Debug, Clone, Serialize)]
pub struct TurnResponse {
    pub session_key: String,
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    pub ready_to_generate: bool,
    pub kind: TurnKind,
}

impl From<TurnOutcome> for TurnResponse {
    fn from(outcome: TurnOutcome) -> Self {
        Self {
            session_key: outcome.session.key().to_string(),
            ready_to_generate: outcome.session.ready_to_generate(),
            reply: outcome.reply,
            report: outcome.report,
            kind: outcome.kind,
        }
    }
}

/// One exchange in a session view.
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub user: String,
    pub agent: String,
}

/// Stored session as exposed over HTTP.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_key: String,
    pub role: Role,
    pub style: Style,
    pub phase: IntakePhase,
    pub ready_to_generate: bool,
    pub report_consumed: bool,
    pub turns: Vec<TurnView>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            session_key: session.key().to_string(),
            role: session.role(),
            style: session.style(),
            phase: session.phase(),
            ready_to_generate: session.ready_to_generate(),
            report_consumed: session.report_consumed(),
            turns: session
                .history()
                .iter()
                .map(|turn| TurnView {
                    user: turn.user().to_string(),
                    agent: turn.agent().to_string(),
                })
                .collect(),
            created_at: *session.created_at(),
            updated_at: *session.updated_at(),
        }
    }
}

/// Response for session command operations.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCommandResponse {
    pub session_key: String,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>, key: &SessionKey) -> Self {
        Self {
            code: "SESSION_NOT_FOUND".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "session_key": key.as_str() })),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TurnRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn defaults_match_original_api() {
        let req = parse(r#"{"query": "hola"}"#);
        assert_eq!(req.role, "Auditor");
        assert_eq!(req.style, "Formal");
        assert_eq!(req.temperature, 0.7);
        assert!(req.session_key.is_none());
    }

    #[test]
    fn spanish_aliases_are_accepted() {
        let req = parse(r#"{"query": "q", "rol": "Desarrollador", "temperatura": 0.2, "estilo": "Técnico"}"#)
            .into_intake(2000)
            .unwrap();
        assert_eq!(req.role, Role::Developer);
        assert_eq!(req.style, Style::Technical);
        assert_eq!(req.temperature, 0.2);
    }

    #[test]
    fn blank_query_is_rejected() {
        let err = parse(r#"{"query": "   "}"#).into_intake(2000).unwrap_err();
        assert!(err.contains("empty"));

        assert!(parse("{}").into_intake(2000).is_err());
    }

    #[test]
    fn long_query_is_rejected_by_characters() {
        let query = "ñ".repeat(11);
        let body = serde_json::json!({ "query": query }).to_string();
        assert!(parse(&body).into_intake(10).is_err());
        assert!(parse(&body).into_intake(11).is_ok());
    }

    #[test]
    fn temperature_range_is_enforced() {
        assert!(parse(r#"{"query": "q", "temperature": 2.1}"#).into_intake(10).is_err());
        assert!(parse(r#"{"query": "q", "temperature": -0.1}"#).into_intake(10).is_err());
        assert!(parse(r#"{"query": "q", "temperature": 2.0}"#).into_intake(10).is_ok());
    }

    #[test]
    fn session_key_is_validated_or_generated() {
        assert!(parse(r#"{"query": "q", "session_key": "../etc"}"#).into_intake(10).is_err());

        let req = parse(r#"{"query": "q", "session_key": "  "}"#).into_intake(10).unwrap();
        assert_eq!(req.session_key.as_str().len(), 36);

        let req = parse(r#"{"query": "q", "session_key": "user@example.com"}"#)
            .into_intake(10)
            .unwrap();
        assert_eq!(req.session_key.as_str(), "user@example.com");
    }

    #[test]
    fn optional_fields_are_skipped() {
        let response = TurnResponse {
            session_key: "k".to_string(),
            reply: "hi".to_string(),
            report: None,
            ready_to_generate: false,
            kind: TurnKind::Reply,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("report").is_none());
        assert_eq!(json["kind"], "reply");
    }
}
