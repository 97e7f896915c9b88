//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Generation Ports
//!
//! - `TextGenerator` - Single-shot completion for each dialogue turn
//! - `ReportGenerator` - Consultative report from an accumulated conversation
//!
//! ## Persistence Ports
//!
//! - `SessionStore` - Load/save/delete of intake sessions by key

mod report_generator;
mod session_store;
mod text_generator;

pub use report_generator::{ReportError, ReportGenerator, ReportRequest};
pub use session_store::{SessionStore, SessionStoreError};
pub use text_generator::{
    GenerationError, GenerationRequest, TextGenerator, DEFAULT_GENERATION_TIMEOUT,
    DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};
