//! Cached, refreshable access to the current dictionary snapshot.
//!
//! The index is the only shared mutable state of the crate. Readers clone an
//! `Arc` to the current snapshot under a short read lock and never observe a
//! half-built vocabulary. Reloads run under a separate refresh mutex, so
//! concurrent refresh requests collapse: whoever waited for an in-flight
//! reload reuses its outcome instead of hitting the store again.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::{ImlaError, Result};
use crate::spelling::clock::{Clock, SystemClock};
use crate::spelling::dictionary::DictionarySnapshot;
use crate::spelling::store::DictionaryStore;

/// Default snapshot time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// How the snapshot handed to a caller was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SnapshotStatus {
    /// Served from cache without touching the store.
    Cached,
    /// Freshly loaded from the store.
    Reloaded,
    /// The reload failed; the previous snapshot is served instead.
    Stale {
        /// Why the reload failed.
        error: String,
    },
}

impl SnapshotStatus {
    /// Whether the snapshot is older than a failed reload attempt.
    pub fn is_stale(&self) -> bool {
        matches!(self, SnapshotStatus::Stale { .. })
    }
}

/// A snapshot together with how it was obtained.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    /// The snapshot to use for the whole request.
    pub snapshot: Arc<DictionarySnapshot>,
    /// Cache outcome for this request.
    pub status: SnapshotStatus,
}

impl SnapshotHandle {
    /// Summary suitable for reports and logs.
    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            words: self.snapshot.len(),
            loaded_at: self.snapshot.loaded_at(),
            generation: self.snapshot.generation(),
            status: self.status.clone(),
        }
    }
}

/// Serializable description of the snapshot a result was computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// Number of words in the snapshot.
    pub words: usize,
    /// When the snapshot was loaded.
    pub loaded_at: DateTime<Utc>,
    /// Load sequence number.
    pub generation: u64,
    /// Cache outcome.
    #[serde(flatten)]
    pub status: SnapshotStatus,
}

/// Outcome of the most recent reload attempt.
#[derive(Debug, Clone)]
enum LastAttempt {
    Never,
    Loaded,
    Failed(String),
}

/// Cache in front of a [`DictionaryStore`].
pub struct DictionaryIndex {
    store: Arc<dyn DictionaryStore>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    current: RwLock<Option<Arc<DictionarySnapshot>>>,
    refresh_lock: Mutex<LastAttempt>,
    /// Incremented after every reload attempt, successful or not.
    attempts: AtomicU64,
    /// Generation number for the next successful load.
    next_generation: AtomicU64,
}

impl DictionaryIndex {
    /// Create an index over a store with the default TTL and wall-clock time.
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self::with_clock(store, DEFAULT_TTL, Arc::new(SystemClock))
    }

    /// Create an index with an explicit TTL and clock.
    pub fn with_clock(store: Arc<dyn DictionaryStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        DictionaryIndex {
            store,
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            current: RwLock::new(None),
            refresh_lock: Mutex::new(LastAttempt::Never),
            attempts: AtomicU64::new(0),
            next_generation: AtomicU64::new(1),
        }
    }

    /// The snapshot currently held, without any freshness check or I/O.
    pub fn current(&self) -> Option<Arc<DictionarySnapshot>> {
        self.current.read().clone()
    }

    /// Number of reload attempts made so far.
    pub fn reload_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Acquire)
    }

    /// Get a snapshot, reloading when forced or when the cached one expired.
    ///
    /// A failed reload serves the previous snapshot marked
    /// [`SnapshotStatus::Stale`]; only when there has never been a snapshot
    /// does it fail with [`ImlaError::DictionaryUnavailable`].
    pub fn get_snapshot(&self, force_refresh: bool) -> Result<SnapshotHandle> {
        if let Some(handle) = self.cached(force_refresh) {
            return Ok(handle);
        }

        let observed = self.attempts.load(Ordering::Acquire);
        let mut last = self.refresh_lock.lock();

        // A reload finished while we were waiting for the lock: reuse it.
        if self.attempts.load(Ordering::Acquire) != observed {
            debug!("Reusing the outcome of a concurrent dictionary reload");
            return self.outcome(&last);
        }
        if let Some(handle) = self.cached(force_refresh) {
            return Ok(handle);
        }

        *last = self.reload();
        self.attempts.fetch_add(1, Ordering::AcqRel);
        self.outcome(&last)
    }

    /// Force a reload and describe the result.
    pub fn refresh(&self) -> Result<SnapshotInfo> {
        self.get_snapshot(true).map(|handle| handle.info())
    }

    fn cached(&self, force_refresh: bool) -> Option<SnapshotHandle> {
        if force_refresh {
            return None;
        }
        let snapshot = self.current()?;
        let age = self.clock.now() - snapshot.loaded_at();
        (age < self.ttl).then_some(SnapshotHandle {
            snapshot,
            status: SnapshotStatus::Cached,
        })
    }

    fn reload(&self) -> LastAttempt {
        let started = Instant::now();
        debug!("Loading dictionary from {} store", self.store.name());

        match self.store.load_checked() {
            Ok(records) => {
                let generation = self.next_generation.fetch_add(1, Ordering::AcqRel);
                let snapshot = DictionarySnapshot::build(records, self.clock.now(), generation);
                let stats = snapshot.stats();
                info!(
                    "Dictionary loaded: {} words (latin {}, cyrillic {}, mixed {}), generation {}, {} ms",
                    stats.total_words,
                    stats.latin,
                    stats.cyrillic,
                    stats.mixed,
                    generation,
                    started.elapsed().as_millis()
                );
                *self.current.write() = Some(Arc::new(snapshot));
                LastAttempt::Loaded
            }
            Err(e) => {
                let message = e.to_string();
                if self.current.read().is_some() {
                    warn!("Dictionary reload failed, serving the previous snapshot: {message}");
                } else {
                    warn!("Dictionary reload failed with nothing to serve: {message}");
                }
                LastAttempt::Failed(message)
            }
        }
    }

    fn outcome(&self, last: &LastAttempt) -> Result<SnapshotHandle> {
        let current = self.current();
        match (current, last) {
            (Some(snapshot), LastAttempt::Failed(error)) => Ok(SnapshotHandle {
                snapshot,
                status: SnapshotStatus::Stale {
                    error: error.clone(),
                },
            }),
            (Some(snapshot), _) => Ok(SnapshotHandle {
                snapshot,
                status: SnapshotStatus::Reloaded,
            }),
            (None, LastAttempt::Failed(error)) => Err(ImlaError::dictionary_unavailable(
                format!("no dictionary snapshot could be loaded: {error}"),
            )),
            (None, _) => Err(ImlaError::dictionary_unavailable(
                "no dictionary snapshot has been loaded",
            )),
        }
    }
}

impl fmt::Debug for DictionaryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryIndex")
            .field("store", &self.store.name())
            .field("ttl", &self.ttl)
            .field("words", &self.current().map(|s| s.len()))
            .field("reload_attempts", &self.reload_attempts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::clock::ManualClock;
    use crate::spelling::dictionary::DictionaryEntry;
    use crate::spelling::store::{FnDictionaryStore, MemoryDictionaryStore};
    use std::sync::atomic::AtomicBool;

    fn index_with(store: Arc<dyn DictionaryStore>) -> (DictionaryIndex, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let index = DictionaryIndex::with_clock(store, Duration::from_secs(60), clock.clone());
        (index, clock)
    }

    #[test]
    fn test_cache_hit_within_ttl() {
        let store = Arc::new(MemoryDictionaryStore::from_words(["salam"]));
        let (index, clock) = index_with(store.clone());

        let first = index.get_snapshot(false).unwrap();
        assert_eq!(first.status, SnapshotStatus::Reloaded);
        assert_eq!(first.snapshot.len(), 1);

        store.insert(DictionaryEntry::trusted("dúnya"));
        clock.advance(TimeDelta::seconds(30));

        let second = index.get_snapshot(false).unwrap();
        assert_eq!(second.status, SnapshotStatus::Cached);
        assert_eq!(second.snapshot.len(), 1);
        assert!(Arc::ptr_eq(&first.snapshot, &second.snapshot));
        assert_eq!(index.reload_attempts(), 1);
    }

    #[test]
    fn test_reload_after_ttl() {
        let store = Arc::new(MemoryDictionaryStore::from_words(["salam"]));
        let (index, clock) = index_with(store.clone());
        index.get_snapshot(false).unwrap();

        store.insert(DictionaryEntry::trusted("dúnya"));
        clock.advance(TimeDelta::seconds(61));

        let handle = index.get_snapshot(false).unwrap();
        assert_eq!(handle.status, SnapshotStatus::Reloaded);
        assert_eq!(handle.snapshot.len(), 2);
        assert_eq!(handle.snapshot.generation(), 2);
    }

    #[test]
    fn test_force_refresh_bypasses_ttl() {
        let store = Arc::new(MemoryDictionaryStore::from_words(["salam"]));
        let (index, _clock) = index_with(store.clone());
        index.get_snapshot(false).unwrap();

        store.insert(DictionaryEntry::trusted("dúnya"));
        let info = index.refresh().unwrap();
        assert_eq!(info.words, 2);
        assert_eq!(info.status, SnapshotStatus::Reloaded);
    }

    #[test]
    fn test_stale_snapshot_served_on_failure() {
        let failing = Arc::new(AtomicBool::new(false));
        let flag = failing.clone();
        let store = Arc::new(FnDictionaryStore::new(move || {
            if flag.load(Ordering::SeqCst) {
                Err(ImlaError::store("connection refused"))
            } else {
                Ok(vec![DictionaryEntry::trusted("salam")])
            }
        }));
        let (index, clock) = index_with(store);

        let first = index.get_snapshot(false).unwrap();
        failing.store(true, Ordering::SeqCst);
        clock.advance(TimeDelta::minutes(10));

        let handle = index.get_snapshot(false).unwrap();
        assert!(handle.status.is_stale());
        assert!(Arc::ptr_eq(&first.snapshot, &handle.snapshot));

        let forced = index.get_snapshot(true).unwrap();
        match forced.status {
            SnapshotStatus::Stale { error } => assert!(error.contains("connection refused")),
            other => panic!("expected stale status, got {other:?}"),
        }
    }

    #[test]
    fn test_unavailable_without_snapshot() {
        let store = Arc::new(FnDictionaryStore::new(|| Err(ImlaError::store("down"))));
        let (index, _clock) = index_with(store);

        let err = index.get_snapshot(false).unwrap_err();
        assert!(err.is_unavailable());
        assert!(index.current().is_none());
    }

    #[test]
    fn test_concurrent_refreshes_collapse() {
        use std::sync::Barrier;
        use std::sync::atomic::AtomicUsize;
        use std::thread;

        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let store = Arc::new(FnDictionaryStore::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            Ok(vec![DictionaryEntry::trusted("salam")])
        }));
        let index = Arc::new(DictionaryIndex::new(store));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let index = index.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    index.get_snapshot(false).unwrap().snapshot.len()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        // Threads that queued behind the first reload reuse it; a thread that
        // arrives after it finished finds a fresh cache.
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
