use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use crate::expression::ast::Scope;

/// Rate limiter for unbound-reference warnings.
///
/// Every miss is counted; a warning is emitted for a given `(scope, name)` at most once per
/// window. One instance is usually shared by every context of a subsystem.
#[derive(Debug)]
pub struct UnboundLog {
    window: Duration,
    last_logged: Mutex<HashMap<(Scope, String), Instant>>,
    misses: AtomicU64,
    logged: AtomicU64,
}

impl UnboundLog {
    /// Create a limiter with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_logged: Mutex::new(HashMap::new()),
            misses: AtomicU64::new(0),
            logged: AtomicU64::new(0),
        }
    }

    /// Process-wide instance with the default window.
    pub fn global() -> Arc<UnboundLog> {
        static GLOBAL: OnceLock<Arc<UnboundLog>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(UnboundLog::new(Duration::from_secs(10)))))
    }

    /// Configured window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a miss; returns whether a warning was emitted for it.
    pub fn record(&self, scope: Scope, name: &str) -> bool {
        self.record_at(scope, name, Instant::now())
    }

    pub(crate) fn record_at(&self, scope: Scope, name: &str, now: Instant) -> bool {
        self.misses.fetch_add(1, Ordering::Relaxed);

        let mut map = self
            .last_logged
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let key = (scope, name.to_owned());
        let due = match map.get(&key) {
            Some(at) => now.saturating_duration_since(*at) >= self.window,
            None => true,
        };
        if !due {
            return false;
        }
        map.insert(key, now);
        drop(map);

        self.logged.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            %scope,
            %name,
            window_ms = self.window.as_millis() as u64,
            "unbound reference evaluated as 0"
        );
        true
    }

    /// Total misses recorded.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Warnings actually emitted.
    pub fn logged(&self) -> u64 {
        self.logged.load(Ordering::Relaxed)
    }
}

impl Default for UnboundLog {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/unbound.rs"]
mod tests;
