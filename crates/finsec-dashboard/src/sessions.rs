//! In-memory session store keyed by the session cookie
//!
//! Only signed-in sessions are stored. Anonymous requests get a detached
//! session that is dropped with the request unless it passes the login gate.
//! Stored sessions unused for longer than the idle timeout are evicted.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use finsec_domain::{Session, SessionId};
use tokio::sync::Mutex;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "finsec_session";

/// Shared handle to one session. Holding the lock serializes interactions.
pub type SharedSession = Arc<Mutex<Session>>;

/// Process-local store of signed-in sessions
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<SessionId, SharedSession>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create an empty store that evicts sessions idle for `idle_timeout`
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            idle_timeout,
        }
    }

    /// Look up a live session by id. An idle session is evicted instead.
    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        let session = self.sessions.get(id).map(|entry| entry.value().clone())?;
        if is_idle(&session, Utc::now(), self.idle_timeout) {
            self.remove(id);
            return None;
        }
        Some(session)
    }

    /// A fresh, unauthenticated session that is not stored yet
    pub fn detached(&self) -> (SessionId, SharedSession) {
        (SessionId::new(), Arc::new(Mutex::new(Session::new())))
    }

    /// Keep `session` under `id`, sweeping idle sessions first
    pub fn insert(&self, id: SessionId, session: SharedSession) {
        self.evict_idle_at(Utc::now());
        self.sessions.insert(id, session);
        tracing::debug!(session = %id, "session stored");
    }

    /// Return the stored session for `id`, or a detached one.
    ///
    /// The boolean is true when the session is already stored.
    pub fn resolve(&self, id: Option<SessionId>) -> (SessionId, SharedSession, bool) {
        if let Some(id) = id {
            if let Some(session) = self.get(&id) {
                return (id, session, true);
            }
        }
        let (id, session) = self.detached();
        (id, session, false)
    }

    /// Drop a session entirely
    pub fn remove(&self, id: &SessionId) {
        if self.sessions.remove(id).is_some() {
            tracing::debug!(session = %id, "session removed");
        }
    }

    /// Remove every session idle at `now`; returns how many were dropped.
    ///
    /// Sessions locked by an in-flight request are in use and kept.
    pub fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !is_idle(session, now, self.idle_timeout));
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            tracing::info!(evicted, "idle sessions evicted");
        }
        evicted
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn is_idle(session: &SharedSession, now: DateTime<Utc>, max_idle: Duration) -> bool {
    session
        .try_lock()
        .map_or(false, |session| session.is_idle_at(now, max_idle))
}

/// The session bound to the current request
#[derive(Clone)]
pub struct SessionHandle {
    /// Id sent back in the cookie
    pub id: SessionId,
    /// The session itself
    pub session: SharedSession,
}

/// Extract the session id from a `Cookie` header
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value.trim()).ok())
}

/// `Set-Cookie` value binding the browser to `id`
pub fn session_cookie(id: SessionId) -> HeaderValue {
    let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// `Set-Cookie` value clearing the session cookie
pub fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static("finsec_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: Duration = Duration::from_secs(60);

    #[test]
    fn test_resolve_reuses_stored_id() {
        let store = SessionStore::new(IDLE);
        let (id, session) = store.detached();
        store.insert(id, session);

        let (same, _, stored) = store.resolve(Some(id));
        assert_eq!(same, id);
        assert!(stored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_detached_session() {
        let store = SessionStore::new(IDLE);
        let stale = SessionId::new();
        let (id, _, stored) = store.resolve(Some(stale));

        assert!(!stored);
        assert_ne!(id, stale);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_drops_session() {
        let store = SessionStore::new(IDLE);
        let (id, session) = store.detached();
        store.insert(id, session);
        store.remove(&id);
        assert!(store.is_empty());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let store = SessionStore::new(IDLE);
        let (idle_id, idle) = store.detached();
        let (busy_id, busy) = store.detached();
        store.insert(idle_id, idle);
        store.insert(busy_id, busy.clone());

        let later = Utc::now() + chrono::Duration::seconds(120);
        let _in_flight = busy.try_lock().unwrap();
        assert_eq!(store.evict_idle_at(later), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&idle_id).is_none());
    }

    #[test]
    fn test_get_evicts_expired_session() {
        let store = SessionStore::new(Duration::from_millis(1));
        let (id, session) = store.detached();
        store.insert(id, session);

        std::thread::sleep(Duration::from_millis(5));
        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cookie_parsing() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));

        let mut garbage = HeaderMap::new();
        garbage.insert(header::COOKIE, HeaderValue::from_static("finsec_session=nope"));
        assert_eq!(session_id_from_headers(&garbage), None);
    }

    #[test]
    fn test_session_cookie_round_trips() {
        let id = SessionId::new();
        let cookie = session_cookie(id);
        let pair = cookie.to_str().unwrap().split(';').next().unwrap().to_string();

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&pair).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }
}
