//! Session manager for interactive menus.
//!
//! Owns the message id → session map. Every access goes through one mutex, so
//! two clicks on the same menu apply one after another, and an expiry racing a
//! click is seen by the click as "not found".

use super::pagination::{PageAction, PaginationSession, RenderResult};
use crate::transport::MessageId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How long a menu stays interactive after it is created.
pub const SESSION_TTL: Duration = Duration::from_secs(5 * 60);

/// Why an action on a session was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No live session for the message: expired, closed or never created.
    #[error("menu expired")]
    Expired,
    /// The caller does not own the session.
    #[error("only the menu owner may use these controls")]
    Forbidden,
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The session is still open; redraw with this page.
    Render(RenderResult),
    /// The session was closed and removed.
    Closed,
}

struct SessionEntry {
    session: PaginationSession,
    expiry: CancellationToken,
    /// Fixed when the session is stored, alongside its timer.
    deadline: Instant,
    generation: u64,
}

type SessionMap = HashMap<MessageId, SessionEntry>;

/// Tracks live menus and expires them.
pub struct SessionManager {
    sessions: Arc<Mutex<SessionMap>>,
    ttl: Duration,
    next_generation: AtomicU64,
}

impl SessionManager {
    /// Creates a manager with the default lifetime.
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    /// Creates a manager with a custom session lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            next_generation: AtomicU64::new(1),
        }
    }

    /// Stores a session for a delivered menu and schedules its expiry.
    ///
    /// A session already stored under the same id is replaced and its timer
    /// cancelled.
    pub async fn create(&self, message_id: impl Into<MessageId>, session: PaginationSession) {
        let message_id = message_id.into();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let expiry = CancellationToken::new();

        let replaced = self.sessions.lock().await.insert(
            message_id.clone(),
            SessionEntry {
                session,
                expiry: expiry.clone(),
                deadline: Instant::now() + self.ttl,
                generation,
            },
        );
        if let Some(old) = replaced {
            old.expiry.cancel();
        }

        debug!(message_id = %message_id, ttl = ?self.ttl, "Session created");
        self.schedule_expiry(message_id, generation, expiry);
    }

    fn schedule_expiry(&self, message_id: MessageId, generation: u64, expiry: CancellationToken) {
        let sessions = Arc::clone(&self.sessions);
        let ttl = self.ttl;

        tokio::spawn(async move {
            tokio::select! {
                _ = expiry.cancelled() => {}
                _ = tokio::time::sleep(ttl) => {
                    let mut map = sessions.lock().await;
                    // A newer session under the same id has its own timer.
                    if map.get(&message_id).is_some_and(|e| e.generation == generation) {
                        map.remove(&message_id);
                        debug!(message_id = %message_id, "Session expired");
                    }
                }
            }
        });
    }

    /// Applies a button action from `caller` to the session of `message_id`.
    pub async fn handle_action(
        &self,
        message_id: &str,
        caller: &str,
        action: PageAction,
    ) -> Result<ActionOutcome, SessionError> {
        let mut map = self.sessions.lock().await;

        let Some(entry) = map.get_mut(message_id) else {
            return Err(SessionError::Expired);
        };

        // The timer may not have run yet; past the deadline counts as gone.
        if Instant::now() >= entry.deadline {
            if let Some(stale) = map.remove(message_id) {
                stale.expiry.cancel();
            }
            return Err(SessionError::Expired);
        }

        if entry.session.owner_id() != caller {
            return Err(SessionError::Forbidden);
        }

        if action == PageAction::Close {
            if let Some(closed) = map.remove(message_id) {
                closed.expiry.cancel();
            }
            debug!(message_id = %message_id, "Session closed by owner");
            return Ok(ActionOutcome::Closed);
        }

        entry.session.apply(action);
        Ok(ActionOutcome::Render(entry.session.render()))
    }

    /// Removes a session. Closing an absent session is a no-op.
    ///
    /// Returns whether a session was removed.
    pub async fn close(&self, message_id: &str) -> bool {
        match self.sessions.lock().await.remove(message_id) {
            Some(entry) => {
                entry.expiry.cancel();
                true
            }
            None => false,
        }
    }

    /// Returns whether a live session exists for `message_id`.
    pub async fn contains(&self, message_id: &str) -> bool {
        self.sessions.lock().await.contains_key(message_id)
    }

    /// Returns the current page of a session without changing it.
    pub async fn peek(&self, message_id: &str) -> Option<RenderResult> {
        self.sessions
            .lock()
            .await
            .get(message_id)
            .map(|e| e.session.render())
    }

    /// Returns the number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns true when no session is live.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every session and cancels their timers.
    pub async fn clear(&self) {
        for (_, entry) in self.sessions.lock().await.drain() {
            entry.expiry.cancel();
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
