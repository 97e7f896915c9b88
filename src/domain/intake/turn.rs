//! A single user/agent exchange.

use serde::{Deserialize, Serialize};

/// One exchange: what the user said and what the agent answered.
///
/// Fields are private so a record cannot be edited once it is part of a
/// session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    user: String,
    agent: String,
}

impl TurnRecord {
    /// Creates a new turn record.
    pub fn new(user: impl Into<String>, agent: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            agent: agent.into(),
        }
    }

    /// What the user said.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// What the agent answered.
    pub fn agent(&self) -> &str {
        &self.agent
    }
}
