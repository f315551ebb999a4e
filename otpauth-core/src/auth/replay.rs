//! Replay protection for accepted codes
//!
//! Remembers, per secret, the last time window a code was accepted in. A
//! single mutex covers lookup, eviction and insertion, so concurrent
//! validations of the same code can never both be admitted.
//!
//! Entries are keyed on a SHA-1 fingerprint of the decoded key rather than
//! the key itself, so the guard never holds raw secrets.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Default number of secrets tracked before eviction kicks in
pub const DEFAULT_MAX_CACHE_SIZE: usize = 500;

type Fingerprint = [u8; 20];

/// How the guard makes room once it reaches capacity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvictionPolicy {
    /// Drop every entry whose window differs from the one being recorded.
    /// If that frees nothing, fall back to dropping the least recently
    /// recorded entries.
    #[default]
    StaleWindow,
    /// Drop only the least recently recorded entries.
    LeastRecentlyRecorded,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    window: u64,
    /// Insertion sequence number, used to find the oldest entry
    recorded_at: u64,
}

#[derive(Debug, Default)]
struct GuardState {
    entries: HashMap<Fingerprint, Entry>,
    sequence: u64,
}

/// Bounded store of the last accepted window per secret
pub struct ReplayGuard {
    state: Mutex<GuardState>,
    max_cache_size: AtomicUsize,
    policy: EvictionPolicy,
}

impl ReplayGuard {
    /// Create a guard tracking at most `max_cache_size` secrets
    pub fn new(max_cache_size: usize, policy: EvictionPolicy) -> Self {
        Self {
            state: Mutex::new(GuardState::default()),
            max_cache_size: AtomicUsize::new(max_cache_size),
            policy,
        }
    }

    /// Record that `key` was accepted in `window`
    ///
    /// Returns `true` the first time a key is seen for a window, `false` for
    /// every later call with the same key and window. A different window
    /// overwrites the stored one and is admitted.
    pub fn check_and_record(&self, key: &[u8], window: u64) -> bool {
        let fingerprint = fingerprint(key);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let stored = state.entries.get(&fingerprint).map(|entry| entry.window);
        match stored {
            Some(stored) if stored == window => return false,
            Some(_) => {}
            None => {
                let capacity = self.max_cache_size.load(Ordering::Acquire);
                if state.entries.len() >= capacity {
                    self.evict(&mut state, window, capacity);
                }
            }
        }

        state.sequence += 1;
        let recorded_at = state.sequence;
        state.entries.insert(
            fingerprint,
            Entry {
                window,
                recorded_at,
            },
        );
        true
    }

    fn evict(&self, state: &mut GuardState, window: u64, capacity: usize) {
        let before = state.entries.len();

        if self.policy == EvictionPolicy::StaleWindow {
            state.entries.retain(|_, entry| entry.window == window);
            debug!(
                evicted = before - state.entries.len(),
                window, "Purged replay entries from other windows"
            );
            if state.entries.len() < capacity {
                return;
            }
            warn!(
                capacity,
                "Replay guard full with entries from the current window, dropping oldest"
            );
        }

        // Leave room for the entry about to be inserted
        let keep = capacity.max(1) - 1;
        if state.entries.len() > keep {
            let mut by_age: Vec<(u64, Fingerprint)> = state
                .entries
                .iter()
                .map(|(fingerprint, entry)| (entry.recorded_at, *fingerprint))
                .collect();
            by_age.sort_unstable_by_key(|(recorded_at, _)| *recorded_at);

            let excess = by_age.len() - keep;
            for (_, fingerprint) in &by_age[..excess] {
                state.entries.remove(fingerprint);
            }
        }
        debug!(
            evicted = before - state.entries.len(),
            "Evicted replay entries to stay within capacity"
        );
    }

    /// Change the capacity; takes effect on the next insertion
    pub fn set_max_cache_size(&self, max_cache_size: usize) {
        self.max_cache_size.store(max_cache_size, Ordering::Release);
    }

    pub fn max_cache_size(&self) -> usize {
        self.max_cache_size.load(Ordering::Acquire)
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Number of secrets currently tracked
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every recorded window
    pub fn clear(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clear();
    }
}

impl Default for ReplayGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CACHE_SIZE, EvictionPolicy::default())
    }
}

impl std::fmt::Debug for ReplayGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayGuard")
            .field("max_cache_size", &self.max_cache_size())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn fingerprint(key: &[u8]) -> Fingerprint {
    let mut out = [0u8; 20];
    out.copy_from_slice(&Sha1::digest(key));
    out
}
