/// Memoizing translation cache with in-flight request coalescing.
///
/// Each key (the lowercase word) is in one of two states: pending, with a
/// fetch running on the Tokio runtime, or terminal. Installing the pending
/// slot and starting the fetch happen under one lock acquisition with no
/// await in between, so at most one fetch per key is ever started before
/// its first terminal result. Terminal entries, errors included, are kept
/// for the life of the cache.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};

use super::{TranslationEntry, TranslationFetcher, seed};

enum Slot {
    Ready(TranslationEntry),
    Pending(watch::Receiver<Option<TranslationEntry>>),
}

type Slots = Arc<Mutex<HashMap<String, Slot>>>;

enum Lookup {
    Ready(TranslationEntry),
    Wait(watch::Receiver<Option<TranslationEntry>>),
}

/// Counters describing how lookups were served.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a terminal entry.
    pub hits: u64,
    /// Lookups that joined a fetch already in flight.
    pub coalesced: u64,
    /// Fetches started.
    pub fetches: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    coalesced: AtomicU64,
    fetches: AtomicU64,
}

pub struct TranslationCache {
    fetcher: Arc<dyn TranslationFetcher>,
    slots: Slots,
    counters: Counters,
}

impl TranslationCache {
    /// Create a cache over `fetcher`, pre-populated with curated entries.
    pub fn new(fetcher: Arc<dyn TranslationFetcher>) -> Self {
        let slots = seed::entries()
            .map(|(word, entry)| (word, Slot::Ready(entry)))
            .collect();

        Self {
            fetcher,
            slots: Arc::new(Mutex::new(slots)),
            counters: Counters::default(),
        }
    }

    /// Translation for `word`.
    ///
    /// Terminal entries return without suspending. Otherwise the caller
    /// waits on the single fetch for this key, starting it if needed.
    /// Must be awaited inside a Tokio runtime.
    pub async fn get(&self, word: &str) -> TranslationEntry {
        let key = word.to_lowercase();

        let mut rx = match self.lookup_or_start(&key, word) {
            Lookup::Ready(entry) => return entry,
            Lookup::Wait(rx) => rx,
        };

        let settled = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|value| (*value).clone());

        match settled {
            Some(entry) => entry,
            None => {
                // The fetch task died without reporting; settle the key so
                // later callers do not wait on a dead channel.
                let entry = TranslationEntry::failed("translation task ended without a result");
                let mut slots = lock(&self.slots);
                if matches!(slots.get(&key), Some(Slot::Pending(_))) {
                    slots.insert(key, Slot::Ready(entry.clone()));
                }
                entry
            }
        }
    }

    /// Current entry for `word` without starting a fetch.
    ///
    /// A key with a fetch in flight reports the pending placeholder.
    #[must_use]
    pub fn peek(&self, word: &str) -> Option<TranslationEntry> {
        match lock(&self.slots).get(&word.to_lowercase())? {
            Slot::Ready(entry) => Some(entry.clone()),
            Slot::Pending(_) => Some(TranslationEntry::pending()),
        }
    }

    /// Number of keys held, pending ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            coalesced: self.counters.coalesced.load(Ordering::Relaxed),
            fetches: self.counters.fetches.load(Ordering::Relaxed),
        }
    }

    fn lookup_or_start(&self, key: &str, word: &str) -> Lookup {
        let mut slots = lock(&self.slots);

        match slots.get(key) {
            Some(Slot::Ready(entry)) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {key:?}");
                return Lookup::Ready(entry.clone());
            }
            Some(Slot::Pending(rx)) => {
                self.counters.coalesced.fetch_add(1, Ordering::Relaxed);
                debug!("Joining in-flight fetch for {key:?}");
                return Lookup::Wait(rx.clone());
            }
            None => {}
        }

        let (tx, rx) = watch::channel(None);
        slots.insert(key.to_string(), Slot::Pending(rx.clone()));
        drop(slots);

        self.counters.fetches.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for {key:?}, fetching");
        self.spawn_fetch(key.to_string(), word.to_string(), tx);

        Lookup::Wait(rx)
    }

    /// Run the fetch detached from any caller, so dropping a waiting future
    /// never abandons the pending slot.
    fn spawn_fetch(&self, key: String, word: String, tx: watch::Sender<Option<TranslationEntry>>) {
        let fetcher = Arc::clone(&self.fetcher);
        let slots = Arc::clone(&self.slots);

        tokio::spawn(async move {
            let entry = match fetcher.fetch(&word).await {
                Ok(reply) => TranslationEntry::from_reply(&reply),
                Err(e) => {
                    warn!("Translation fetch for {word:?} failed: {e}");
                    TranslationEntry::failed(e.to_string())
                }
            };

            lock(&slots).insert(key, Slot::Ready(entry.clone()));
            tx.send_replace(Some(entry));
        });
    }
}

fn lock(slots: &Mutex<HashMap<String, Slot>>) -> MutexGuard<'_, HashMap<String, Slot>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}
