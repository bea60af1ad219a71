//! Web front end
//!
//! Serves the map page and a small JSON API. Every browser session gets its
//! own [`Controller`]; events of one session are handled one at a time.

pub mod handlers;
pub mod models;
pub mod routes;

use chrono::Local;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::controller::Controller;
use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::stac::Catalog;

pub use routes::create_router;

/// A live session and the tick it was last used at
struct SessionEntry {
    controller: Arc<Mutex<Controller>>,
    last_used: AtomicU64,
}

/// Shared server state
///
/// Holds at most `max_sessions` sessions. Creating one more drops the least
/// recently used session.
pub struct AppState {
    config: Config,
    catalog: Arc<dyn Catalog>,
    sessions: DashMap<Uuid, SessionEntry>,
    clock: AtomicU64,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn Catalog>) -> Self {
        Self { config, catalog, sessions: DashMap::new(), clock: AtomicU64::new(0) }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Creates an independent session seeded from the configured defaults
    pub fn create_session(&self) -> (Uuid, Arc<Mutex<Controller>>) {
        while self.sessions.len() >= self.config.max_sessions.max(1) {
            if !self.evict_least_recent() {
                break;
            }
        }

        let id = Uuid::new_v4();
        let state = SessionState::new(&self.config, Local::now().date_naive());
        let controller = Arc::new(Mutex::new(Controller::new(state, Arc::clone(&self.catalog))));

        let entry = SessionEntry { controller: Arc::clone(&controller), last_used: AtomicU64::new(self.tick()) };
        self.sessions.insert(id, entry);
        info!(session = %id, active = self.sessions.len(), "session created");
        (id, controller)
    }

    fn evict_least_recent(&self) -> bool {
        let oldest = self
            .sessions
            .iter()
            .min_by_key(|entry| entry.value().last_used.load(Ordering::Relaxed))
            .map(|entry| *entry.key());

        match oldest.and_then(|id| self.sessions.remove(&id)) {
            Some((id, _)) => {
                warn!(session = %id, limit = self.config.max_sessions, "session limit reached, dropping least recently used");
                true
            }
            None => false,
        }
    }

    /// Looks up a session and marks it as used
    pub fn session(&self, id: Uuid) -> Result<Arc<Mutex<Controller>>> {
        let entry = self.sessions.get(&id).ok_or_else(|| Error::UnknownSession(id.to_string()))?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Ok(Arc::clone(&entry.controller))
    }

    pub fn remove_session(&self, id: Uuid) -> Result<()> {
        self.sessions
            .remove(&id)
            .map(|_| info!(session = %id, "session ended"))
            .ok_or_else(|| Error::UnknownSession(id.to_string()))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stac::mock::MockCatalog;

    fn app_state() -> AppState {
        AppState::new(Config::default(), Arc::new(MockCatalog::with_items(Vec::new())))
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let state = app_state();
        let (a, ca) = state.create_session();
        let (b, cb) = state.create_session();
        assert_ne!(a, b);
        assert_eq!(state.session_count(), 2);

        assert!(!Arc::ptr_eq(&ca, &cb));
        assert!(Arc::ptr_eq(&ca, &state.session(a).unwrap()));
    }

    #[test]
    fn test_unknown_session() {
        let state = app_state();
        let err = state.session(Uuid::new_v4()).err().unwrap();
        assert!(matches!(err, Error::UnknownSession(_)));
    }

    #[test]
    fn test_remove_session() {
        let state = app_state();
        let (id, _) = state.create_session();

        state.remove_session(id).unwrap();
        assert_eq!(state.session_count(), 0);
        assert!(state.remove_session(id).is_err());
    }

    fn bounded_state(max_sessions: usize) -> AppState {
        let config = Config { max_sessions, ..Config::default() };
        AppState::new(config, Arc::new(MockCatalog::with_items(Vec::new())))
    }

    #[test]
    fn test_session_count_is_bounded() {
        let state = bounded_state(3);
        let ids: Vec<Uuid> = (0..4).map(|_| state.create_session().0).collect();

        assert_eq!(state.session_count(), 3);
        assert!(state.session(ids[0]).is_err());
        for id in &ids[1..] {
            assert!(state.session(*id).is_ok());
        }
    }

    #[test]
    fn test_recently_used_session_survives_eviction() {
        let state = bounded_state(2);
        let (first, _) = state.create_session();
        let (second, _) = state.create_session();

        state.session(first).unwrap();
        let (third, _) = state.create_session();

        assert_eq!(state.session_count(), 2);
        assert!(state.session(first).is_ok());
        assert!(state.session(second).is_err());
        assert!(state.session(third).is_ok());
    }

    #[test]
    fn test_many_sessions_stay_within_limit() {
        let state = bounded_state(10);
        for _ in 0..100 {
            state.create_session();
        }
        assert_eq!(state.session_count(), 10);
    }
}
