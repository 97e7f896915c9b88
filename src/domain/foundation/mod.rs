//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, text helpers, and error types
//! that form the vocabulary of the intake domain.

mod ids;
mod timestamp;
mod errors;
pub mod text;

pub use ids::{SessionKey, MAX_SESSION_KEY_LENGTH};
pub use timestamp::Timestamp;
pub use errors::ValidationError;
