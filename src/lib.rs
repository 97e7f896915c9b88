//! consult-intake - Conversational intake agent
//!
//! Interviews a user about their organization over a multi-turn dialogue,
//! decides when enough has been collected, and turns the conversation into
//! a consultative report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
