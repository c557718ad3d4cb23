//! Core fixed-window rate limiter implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Per-identifier counter state for the current window.
#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    /// Allowed calls recorded in the current window
    count: u32,
    /// When the current window expires
    reset_at: Instant,
}

/// A fixed-window rate limiter keyed by caller identifier.
///
/// This struct is thread-safe and can be shared across multiple tasks via
/// `Arc`. All state is held in process memory: each process instance owns
/// an independent map, so a deployment running N workers (or a per-request
/// serverless runtime, where the map is recreated on every cold start)
/// effectively multiplies or voids the configured limit. Enforcing a global
/// limit across instances requires an external shared counter store, which
/// is out of scope here.
pub struct RateLimiter {
    /// Counter state indexed by caller identifier
    entries: RwLock<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    /// Create a new rate limiter with no recorded callers.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Check whether a call from `identifier` is allowed under `limit`
    /// calls per `window`, recording the call if it is.
    ///
    /// The first call for a never-seen or expired identifier starts a fresh
    /// window with a count of one. A denied call leaves the stored count
    /// untouched. Expiry always takes priority over the count: a stale
    /// entry is treated as a fresh window regardless of its old count.
    pub fn check(&self, identifier: &str, limit: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.write();

        trace!(
            identifier = %identifier,
            limit = limit,
            "Checking rate limit"
        );

        match entries.get_mut(identifier) {
            Some(entry) if now <= entry.reset_at => {
                if entry.count < limit {
                    entry.count += 1;
                    true
                } else {
                    debug!(
                        identifier = %identifier,
                        limit = limit,
                        "Rate limit exceeded"
                    );
                    false
                }
            }
            _ => {
                // New identifier, or the previous window has expired
                entries.insert(
                    identifier.to_string(),
                    RateLimitEntry {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                true
            }
        }
    }

    /// Remove every entry whose window has expired.
    ///
    /// Returns the number of entries removed. This is memory hygiene only:
    /// `check` treats expired entries as fresh windows on its own, so
    /// correctness never depends on the sweep having run.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// Start a background task that sweeps expired entries at `interval`.
    ///
    /// The task runs until the returned handle is dropped.
    pub fn start_sweeper(self: Arc<Self>, interval: Duration) -> SweeperHandle {
        let limiter = Arc::clone(&self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so sweeps start
            // one full interval after construction.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = limiter.sweep();
                if removed > 0 {
                    debug!(removed = removed, "Swept expired rate limit entries");
                }
            }
        });
        SweeperHandle { task }
    }

    /// Get the recorded count for an identifier's current window.
    ///
    /// Returns `None` if no entry exists for the identifier.
    pub fn current_count(&self, identifier: &str) -> Option<u32> {
        let entries = self.entries.read();
        entries.get(identifier).map(|e| e.count)
    }

    /// Get the number of tracked identifiers, expired entries included.
    pub fn entry_count(&self) -> usize {
        let entries = self.entries.read();
        entries.len()
    }

    /// Clear all entries.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.clear();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the background sweep task.
///
/// Dropping the handle aborts the task, tying the sweeper's lifetime to
/// whoever owns the handle.
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
