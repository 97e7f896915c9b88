//! Session storage adapters
//!
//! Implementations of the SessionStore port:
//! - `FileSessionStore` - One JSON/YAML document per session on disk
//! - `InMemorySessionStore` - In-memory map for testing
//! - `RemoteSessionStore` - REST document store keyed by session identifier

mod file_session_store;
mod in_memory_session_store;
mod remote_session_store;

pub use file_session_store::{DocumentFormat, FileSessionStore};
pub use in_memory_session_store::InMemorySessionStore;
pub use remote_session_store::{RemoteSessionStore, DEFAULT_REMOTE_TIMEOUT};
