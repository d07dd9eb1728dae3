//! In-memory session storage for the HTTP surface, keyed by a cookie id.

use crate::csrf::Session;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Values of one client session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionData {
    values: HashMap<String, String>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Session for SessionData {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn insert(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// A session checked out of the store for one request.
#[derive(Debug)]
pub struct LoadedSession {
    pub id: String,
    pub data: SessionData,
    /// The client did not present a known id; a cookie must be set.
    pub is_new: bool,
}

/// Sessions kept at most.
pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

/// Idle time after which a session is forgotten.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

/// Process-local sessions. Lost on restart; one request per session at a time.
///
/// Bounded: idle sessions expire after `ttl`, and when `capacity` is reached
/// the least recently saved session is evicted.
#[derive(Clone, Debug)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
    capacity: usize,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        MemorySessionStore::with_limits(DEFAULT_SESSION_CAPACITY, DEFAULT_SESSION_TTL)
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        MemorySessionStore {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            ttl,
        }
    }

    /// Copy of the session for `id`, or a fresh session with a new id when
    /// `id` is absent, unknown or expired.
    pub fn load(&self, id: Option<&str>) -> LoadedSession {
        if let Some(id) = id {
            let found = self.inner.read().ok().and_then(|m| {
                m.get(id)
                    .filter(|e| e.last_seen.elapsed() < self.ttl)
                    .map(|e| e.data.clone())
            });
            if let Some(data) = found {
                return LoadedSession {
                    id: id.to_string(),
                    data,
                    is_new: false,
                };
            }
        }
        LoadedSession {
            id: uuid::Uuid::new_v4().to_string(),
            data: SessionData::default(),
            is_new: true,
        }
    }

    /// Store `session`. A new session holding no data is not stored.
    /// Returns whether the session is now held by the store.
    pub fn save(&self, session: &LoadedSession) -> bool {
        if session.is_new && session.data.is_empty() {
            return false;
        }
        if self.capacity == 0 {
            return false;
        }
        let mut m = match self.inner.write() {
            Ok(m) => m,
            Err(_) => {
                tracing::warn!("session store lock poisoned, session not saved");
                return false;
            }
        };
        let ttl = self.ttl;
        m.retain(|_, e| e.last_seen.elapsed() < ttl);
        if !m.contains_key(&session.id) && m.len() >= self.capacity {
            let oldest = m
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| id.clone());
            if let Some(id) = oldest {
                m.remove(&id);
                tracing::debug!(capacity = self.capacity, "session evicted");
            }
        }
        m.insert(
            session.id.clone(),
            Entry {
                data: session.data.clone(),
                last_seen: Instant::now(),
            },
        );
        true
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
