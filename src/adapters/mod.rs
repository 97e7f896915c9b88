//! Adapters - Implementations of port interfaces and transports.
//!
//! Adapters connect the intake core to external systems:
//! - `ai` - Chat-completions text generation and the report writer
//! - `storage` - Session stores (file, in-memory, remote)
//! - `http` - REST API (axum)
//! - `console` - Interactive terminal loop

pub mod ai;
pub mod console;
pub mod http;
pub mod storage;
