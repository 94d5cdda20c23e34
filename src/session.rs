use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::RwLock, time::Instant};
use ulid::Ulid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "session_id";

struct Session {
    values: HashMap<String, String>,
    last_seen: Instant,
}

/// Session values kept in process memory, keyed by session id.
///
/// Ids are only ever minted by [`MemorySessionStore::start`]. A session not
/// seen for `idle_ttl` is treated as gone and is swept on the next `start`.
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    idle_ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    fn is_live(&self, session: &Session, now: Instant) -> bool {
        now.duration_since(session.last_seen) < self.idle_ttl
    }

    /// Opens an empty session and returns its id.
    pub async fn start(&self) -> String {
        let id = Ulid::new().to_string();
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, session| self.is_live(session, now));
        let swept = before - sessions.len();
        if swept > 0 {
            tracing::debug!(swept, "idle sessions dropped");
        }

        sessions.insert(
            id.to_owned(),
            Session {
                values: HashMap::new(),
                last_seen: now,
            },
        );

        id
    }

    /// Marks a live session as seen. Unknown and idle ids return `false`.
    pub async fn touch(&self, session_id: &str) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let live = match sessions.get_mut(session_id) {
            Some(session) if self.is_live(session, now) => {
                session.last_seen = now;
                true
            }
            Some(_) => false,
            None => return false,
        };

        if !live {
            sessions.remove(session_id);
        }

        live
    }

    pub async fn get(&self, session_id: &str, key: &str) -> Option<String> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;

        sessions
            .get(session_id)
            .filter(|session| self.is_live(session, now))
            .and_then(|session| session.values.get(key))
            .cloned()
    }

    /// Stores `value` in a live session. Unknown ids are ignored.
    pub async fn put(&self, session_id: &str, key: &str, value: impl Into<String>) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions
            .get_mut(session_id)
            .filter(|session| self.is_live(session, now))
        else {
            return;
        };

        session.values.insert(key.to_owned(), value.into());
        session.last_seen = now;
    }

    /// Number of sessions held in memory, idle ones included until swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
