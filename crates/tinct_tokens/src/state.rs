//! Process-wide default engine
//!
//! Most callers own a [`TokenEngine`] directly. Apps that want a single shared
//! registry (UI state, exporters, and mappers all reading the same themes) can
//! initialize [`TokenState`] once and reach it from anywhere.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::TokenEngine;
use crate::theme::Theme;
use crate::tokens::TokenSource;
use crate::TokenError;

/// Global token state instance
static TOKEN_STATE: OnceLock<TokenState> = OnceLock::new();

/// Global invalidation callback - set by the app layer to refresh dependent views
static INVALIDATION_CALLBACK: Mutex<Option<fn(&[String])>> = Mutex::new(None);

/// Set the invalidation callback function
///
/// Called with every source id whose resolved tokens were evicted by a change
/// made through the default engine. The engine lock is released by then, so
/// the callback may read from [`TokenState`] again.
pub fn set_invalidation_callback(callback: fn(&[String])) {
    *INVALIDATION_CALLBACK
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(callback);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared engine behind a lock
pub struct TokenState {
    engine: Mutex<TokenEngine>,
    /// Ids evicted while the engine was locked, waiting for the callback.
    invalidated: Arc<Mutex<Vec<String>>>,
}

impl TokenState {
    /// Initialize the global token state.
    ///
    /// Safe to call multiple times; the first call wins.
    pub fn init(config: EngineConfig) {
        let invalidated = Arc::new(Mutex::new(Vec::new()));
        let buffer = Arc::clone(&invalidated);

        let mut engine = TokenEngine::with_config(config);
        engine.set_invalidation_listener(move |ids| lock(&buffer).extend_from_slice(ids));

        if TOKEN_STATE
            .set(TokenState {
                engine: Mutex::new(engine),
                invalidated,
            })
            .is_ok()
        {
            debug!("TokenState initialized");
        }
    }

    pub fn init_default() {
        Self::init(EngineConfig::default());
    }

    /// Get the global token state instance
    pub fn get() -> &'static TokenState {
        TOKEN_STATE
            .get()
            .expect("TokenState not initialized. Call TokenState::init() at app startup.")
    }

    /// Try to get the global token state (returns None if not initialized)
    pub fn try_get() -> Option<&'static TokenState> {
        TOKEN_STATE.get()
    }

    /// Lock the shared engine for a sequence of operations.
    ///
    /// Invalidations made through the guard are delivered by the next
    /// [`notify_invalidated`](Self::notify_invalidated), after the guard is dropped.
    pub fn engine(&self) -> MutexGuard<'_, TokenEngine> {
        lock(&self.engine)
    }

    pub fn register(&self, source: TokenSource) {
        self.engine().register(source);
        self.notify_invalidated();
    }

    pub fn unregister(&self, id: &str) -> Option<TokenSource> {
        let removed = self.engine().unregister(id);
        self.notify_invalidated();
        removed
    }

    pub fn resolve_to_theme(&self, id: &str) -> Result<Theme, TokenError> {
        self.engine().resolve_to_theme(id)
    }

    /// Hand buffered invalidations to the callback. Must not be called while
    /// holding the guard from [`engine`](Self::engine).
    pub fn notify_invalidated(&self) {
        let ids = std::mem::take(&mut *lock(&self.invalidated));
        if ids.is_empty() {
            return;
        }
        let callback = *lock(&INVALIDATION_CALLBACK);
        if let Some(callback) = callback {
            callback(&ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    static INVALIDATED: AtomicUsize = AtomicUsize::new(0);
    static REFRESHED: AtomicUsize = AtomicUsize::new(0);

    /// Counts ids and re-reads each one through the shared engine, like a UI refresh.
    fn refresh(ids: &[String]) {
        INVALIDATED.fetch_add(ids.len(), Ordering::SeqCst);
        if let Some(state) = TokenState::try_get() {
            for id in ids {
                if state.resolve_to_theme(id).is_ok() {
                    REFRESHED.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
    }

    #[test]
    fn default_engine_notifies_after_releasing_lock() {
        TokenState::init_default();
        set_invalidation_callback(refresh);

        let (done, finished) = mpsc::channel();
        thread::spawn(move || {
            let state = TokenState::get();
            state.register(
                TokenSource::new("state-base", "Base").with_token("colors", "primary", "#000"),
            );
            state.register(TokenSource::new("state-child", "Child").extending("state-base"));
            let before = INVALIDATED.load(Ordering::SeqCst);
            let refreshed = REFRESHED.load(Ordering::SeqCst);

            state.register(
                TokenSource::new("state-base", "Base").with_token("colors", "primary", "#fff"),
            );
            let _ = done.send((
                INVALIDATED.load(Ordering::SeqCst) - before,
                REFRESHED.load(Ordering::SeqCst) - refreshed,
            ));
        });

        let (invalidated, refreshed) = finished
            .recv_timeout(Duration::from_secs(5))
            .expect("register blocked while notifying");
        assert_eq!(invalidated, 2);
        assert_eq!(refreshed, 2);

        let state = TokenState::get();
        let theme = state.resolve_to_theme("state-child").unwrap();
        assert_eq!(theme.get("colors.primary"), Some("#fff"));
        assert!(state.unregister("state-child").is_some());
    }
}
