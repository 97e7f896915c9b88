//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (session keys, timestamps, errors, text helpers)
//! - `intake` - Sessions, turn history, context windowing and completeness evaluation

pub mod foundation;
pub mod intake;
