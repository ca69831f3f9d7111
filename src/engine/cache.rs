//! Standings cache.
//!
//! A per-league memo of the last computed table, held in process memory
//! only. Entries are served while younger than the TTL and evicted
//! immediately whenever a tie becomes decided. The cache object is
//! constructed explicitly and owned by the application state; handlers
//! receive it by reference.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::StandingsEntry;

/// Default time-to-live for cached standings.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    entries: Vec<StandingsEntry>,
    computed_at: DateTime<Utc>,
}

/// Short-TTL memoization for computed standings tables, keyed by league
/// id. Recomputation on a miss is a pure function of persisted state, so
/// concurrent repopulation is benign: last writer wins.
pub struct StandingsCache {
    ttl: Duration,
    inner: Mutex<HashMap<String, CacheEntry>>,
}

impl StandingsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// A cached table for the league, if present and fresh.
    pub fn get(&self, league_id: &str) -> Option<Vec<StandingsEntry>> {
        let guard = self.inner.lock().expect("standings cache poisoned");
        let entry = guard.get(league_id)?;

        let age = Utc::now().signed_duration_since(entry.computed_at);
        if age.to_std().map(|a| a < self.ttl).unwrap_or(false) {
            Some(entry.entries.clone())
        } else {
            None
        }
    }

    /// Store a freshly computed table.
    pub fn put(&self, league_id: &str, entries: Vec<StandingsEntry>) {
        let mut guard = self.inner.lock().expect("standings cache poisoned");
        guard.insert(
            league_id.to_string(),
            CacheEntry {
                entries,
                computed_at: Utc::now(),
            },
        );
    }

    /// Evict the league's entry immediately. Called at every mutation
    /// point where a tie becomes decided.
    pub fn invalidate(&self, league_id: &str) {
        let mut guard = self.inner.lock().expect("standings cache poisoned");
        if guard.remove(league_id).is_some() {
            debug!("Invalidated standings cache for league {}", league_id);
        }
    }

    /// Number of cached leagues, fresh or not.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("standings cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StandingsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
