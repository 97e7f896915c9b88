//! IntakeService - Session lifecycle around the dialogue controller
//!
//! Loads or creates the session for a key, serializes turns per key,
//! runs the controller and saves the result. Store failures are logged and
//! never fail a turn.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::handle_turn::{HandleTurnCommand, HandleTurnHandler};
use super::outcome::TurnOutcome;
use crate::domain::foundation::SessionKey;
use crate::domain::intake::{Role, Session, Style};
use crate::ports::{SessionStore, SessionStoreError};

/// One user input as received by a transport
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub session_key: SessionKey,
    pub query: String,
    /// Used only when the session is created.
    pub role: Role,
    /// Used only when the session is created.
    pub style: Style,
    pub temperature: f32,
}

/// Errors surfaced by session queries
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionKey),

    #[error("Session storage error: {0}")]
    Storage(#[from] SessionStoreError),
}

impl IntakeError {
    /// Message safe to show to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            IntakeError::SessionNotFound(_) => {
                "We could not find your conversation. Please sign in again or start a new conversation."
            }
            IntakeError::Storage(_) => {
                "Your conversation is temporarily unavailable. Please try again shortly."
            }
        }
    }
}

/// Session-aware entry point used by every transport
pub struct IntakeService {
    store: Arc<dyn SessionStore>,
    controller: HandleTurnHandler,
    locks: RwLock<HashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn SessionStore>, controller: HandleTurnHandler) -> Self {
        Self {
            store,
            controller,
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Processes one input for the request's session.
    pub async fn submit(&self, request: IntakeRequest) -> TurnOutcome {
        let key = request.session_key.clone();

        // 1. Serialize turns for this key
        let lock = self.lock_for(&key).await;
        let outcome = {
            let _guard = lock.lock().await;
            self.run_turn(request).await
        };
        self.release_lock(&key, lock).await;

        outcome
    }

    /// Returns the stored session for `key`.
    pub async fn session(&self, key: &SessionKey) -> Result<Session, IntakeError> {
        self.store
            .load(key)
            .await?
            .ok_or_else(|| IntakeError::SessionNotFound(key.clone()))
    }

    /// Deletes the stored session for `key`.
    pub async fn reset(&self, key: &SessionKey) -> Result<(), IntakeError> {
        let lock = self.lock_for(key).await;
        let result = {
            let _guard = lock.lock().await;
            self.store.delete(key).await
        };
        self.release_lock(key, lock).await;
        result?;

        tracing::info!(session = %key, "Session reset");
        Ok(())
    }

    /// Runs the report trigger for a stored session.
    pub async fn generate_report(&self, key: &SessionKey) -> Result<TurnOutcome, IntakeError> {
        let lock = self.lock_for(key).await;
        let result = {
            let _guard = lock.lock().await;
            match self.session(key).await {
                Ok(session) => {
                    let outcome = self.controller.trigger_report(session).await;
                    self.save_best_effort(&outcome.session).await;
                    Ok(outcome)
                }
                Err(err) => Err(err),
            }
        };
        self.release_lock(key, lock).await;

        result
    }

    async fn run_turn(&self, request: IntakeRequest) -> TurnOutcome {
        // 2. Load, or start fresh
        let loaded = self
            .load_or_create(&request.session_key, request.role, request.style)
            .await;

        // 3. Run the controller
        let cmd = HandleTurnCommand::new(request.query).with_temperature(request.temperature);
        let outcome = self.controller.handle(cmd, loaded.session).await;

        // 4. Persist, best-effort; never over a document we could not read
        if loaded.persist {
            self.save_best_effort(&outcome.session).await;
        } else {
            tracing::warn!(session = %outcome.session.key(), "Skipping save after failed load");
        }

        outcome
    }

    async fn load_or_create(&self, key: &SessionKey, role: Role, style: Style) -> Loaded {
        match self.store.load(key).await {
            Ok(Some(session)) => Loaded {
                session,
                persist: true,
            },
            Ok(None) => {
                tracing::info!(session = %key, role = %role, style = %style, "Creating session");
                Loaded {
                    session: Session::new(key.clone(), role, style),
                    persist: true,
                }
            }
            Err(err) => {
                tracing::warn!(session = %key, error = %err, "Failed to load session; answering without history");
                Loaded {
                    session: Session::new(key.clone(), role, style),
                    persist: false,
                }
            }
        }
    }

    async fn save_best_effort(&self, session: &Session) {
        if let Err(err) = self.store.save(session).await {
            tracing::warn!(session = %session.key(), error = %err, "Failed to persist session");
        }
    }

    async fn lock_for(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(key) {
            return lock.clone();
        }
        self.locks
            .write()
            .await
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drops the table entry for `key` once no other task holds or awaits it.
    async fn release_lock(&self, key: &SessionKey, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.write().await;
        // One reference in the table, one here.
        if Arc::strong_count(&lock) == 2 {
            if let Some(current) = locks.get(key) {
                if Arc::ptr_eq(current, &lock) {
                    locks.remove(key);
                }
            }
        }
    }
}

/// A session as read for one turn.
struct Loaded {
    session: Session,
    /// False when the stored document could not be read.
    persist: bool,
}
