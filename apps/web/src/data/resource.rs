use std::future::Future;
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::store::StoreError;

/// What a view sees of one remote read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Snapshot<T> {
    fn idle() -> Self {
        Self {
            data: T::default(),
            loading: false,
            error: None,
        }
    }

    /// A finished read on its own: failures carry no data.
    fn settled(result: Result<T, StoreError>) -> Self {
        match result {
            Ok(data) => Self {
                data,
                loading: false,
                error: None,
            },
            Err(e) => Self {
                error: Some(e.to_string()),
                ..Self::idle()
            },
        }
    }
}

/// Proof that a read was started for a specific generation.
#[derive(Debug)]
pub struct Ticket {
    generation: u64,
    key: String,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

struct Inner<T> {
    key: Option<String>,
    started: bool,
    generation: u64,
    snapshot: Snapshot<T>,
}

/// Request lifecycle for one keyed read.
///
/// Every started read bumps the generation; a response is applied only if its
/// ticket still carries the current generation, so a slow response for a
/// superseded key cannot overwrite the newer result. The lock is never held
/// across an await.
pub struct Resource<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone + Default> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> Resource<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                key: None,
                started: false,
                generation: 0,
                snapshot: Snapshot::idle(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        // A poisoned lock only means a panic elsewhere mid-update; the snapshot is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.lock().snapshot.clone()
    }

    pub fn key(&self) -> Option<String> {
        self.lock().key.clone()
    }

    /// Decides whether a read must be issued for `key`. When none is due the
    /// snapshot, taken under the same lock, comes back instead.
    ///
    /// An empty key issues nothing and clears `loading` (in-flight reads are
    /// invalidated). An unchanged key issues nothing unless `force` is set.
    /// Data and error belong to one key: switching keys starts from an empty
    /// snapshot.
    pub fn begin(&self, key: &str, force: bool) -> Result<Ticket, Snapshot<T>> {
        let mut inner = self.lock();
        let changed = !inner.started || inner.key.as_deref() != Some(key);
        inner.started = true;

        if key.is_empty() {
            if inner.key.is_some() {
                inner.snapshot = Snapshot::idle();
            }
            inner.key = None;
            inner.generation += 1;
            inner.snapshot.loading = false;
            return Err(inner.snapshot.clone());
        }
        if !changed && !force {
            return Err(inner.snapshot.clone());
        }

        if changed {
            inner.snapshot = Snapshot::idle();
        }
        inner.key = Some(key.to_string());
        inner.generation += 1;
        inner.snapshot.loading = true;
        Ok(Ticket {
            generation: inner.generation,
            key: key.to_string(),
        })
    }

    /// Applies `result` when `ticket` is still current and returns the new
    /// snapshot. A superseded ticket leaves the shared state alone and gets a
    /// snapshot of its own result instead.
    pub fn settle(
        &self,
        ticket: Ticket,
        result: Result<T, StoreError>,
    ) -> Result<Snapshot<T>, Snapshot<T>> {
        let mut inner = self.lock();
        if ticket.generation != inner.generation {
            debug!(
                "Discarding stale response for key '{}' (generation {} < {})",
                ticket.key(),
                ticket.generation,
                inner.generation
            );
            return Err(Snapshot::settled(result));
        }

        inner.snapshot.loading = false;
        match result {
            Ok(data) => {
                inner.snapshot.data = data;
                inner.snapshot.error = None;
            }
            Err(e) => {
                inner.snapshot.error = Some(e.to_string());
            }
        }
        Ok(inner.snapshot.clone())
    }

    /// Runs `fetch` for `key` when `begin` says a read is due. Returns the
    /// outcome for `key` only, even when another key superseded this read
    /// while it was in flight.
    pub async fn load<F, Fut>(&self, key: &str, force: bool, fetch: F) -> Snapshot<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let ticket = match self.begin(key, force) {
            Ok(ticket) => ticket,
            Err(current) => return current,
        };
        let result = fetch(ticket.key().to_string()).await;
        match self.settle(ticket, result) {
            Ok(snapshot) | Err(snapshot) => snapshot,
        }
    }
}
