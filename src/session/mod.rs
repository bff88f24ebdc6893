use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::Session;

/// Capability interface over session state.
///
/// Sessions are handed out behind a per-session mutex; callers hold the lock
/// for the whole message exchange, which serializes concurrent requests that
/// carry the same session id.
pub trait SessionStore: Send + Sync {
    /// Look up a live session. Expired sessions are treated as absent.
    fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>>;

    /// Fetch the session for `session_id`, creating it (seeded with the
    /// system prompt) when the id is unknown or absent. A fresh UUID is
    /// minted when no id is supplied.
    fn get_or_create(
        &self,
        session_id: Option<String>,
        system_prompt: &str,
    ) -> (String, Arc<Mutex<Session>>);
}

impl<T: SessionStore> SessionStore for Arc<T> {
    fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        (**self).get(session_id)
    }

    fn get_or_create(
        &self,
        session_id: Option<String>,
        system_prompt: &str,
    ) -> (String, Arc<Mutex<Session>>) {
        (**self).get_or_create(session_id, system_prompt)
    }
}

struct Entry {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

/// In-process session store with TTL expiry and a capacity bound.
///
/// Expired sessions are dropped lazily on access and swept on insert; when
/// the store is still full after a sweep, the least-recently-seen session is
/// evicted.
pub struct MemorySessionStore {
    sessions: DashMap<String, Entry>,
    ttl: Duration,
    capacity: usize,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn evict(&self) {
        let ttl = self.ttl;
        self.sessions.retain(|_, entry| entry.last_seen.elapsed() <= ttl);

        while self.sessions.len() >= self.capacity {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|entry| entry.value().last_seen)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    tracing::debug!(session_id = %key, "evicting session at capacity");
                    self.sessions.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            if entry.last_seen.elapsed() > self.ttl {
                drop(entry);
                self.sessions.remove(session_id);
                return None;
            }
            entry.last_seen = Instant::now();
            return Some(entry.session.clone());
        }
        None
    }

    fn get_or_create(
        &self,
        session_id: Option<String>,
        system_prompt: &str,
    ) -> (String, Arc<Mutex<Session>>) {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        if let Some(session) = self.get(&session_id) {
            return (session_id, session);
        }

        self.evict();

        // Entry keeps check-and-create atomic: concurrent requests carrying
        // the same fresh id must end up sharing one session, not overwrite
        // each other's transcripts.
        let session = self
            .sessions
            .entry(session_id.clone())
            .or_insert_with(|| Entry {
                session: Arc::new(Mutex::new(Session::new(session_id.clone(), system_prompt))),
                last_seen: Instant::now(),
            })
            .session
            .clone();
        (session_id, session)
    }
}
