//! Application store
//!
//! Three independent slices (work, contest, billing) plus the toast queue,
//! held behind one `Arc<Mutex<_>>`. Actions lock briefly to begin a request,
//! release the lock for the network call, then lock again to apply the
//! result. The lock is never held across an `.await`.

pub mod accumulator;
pub mod billing;
pub mod contest;
pub mod lifecycle;
pub mod work;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::notify::{Toast, ToastQueue};

pub use accumulator::{Accumulator, ListQuery, Merge};
pub use billing::BillingSlice;
pub use contest::{ArtistClassListKind, ContestListKind, ContestSlice};
pub use lifecycle::{Lifecycle, RequestKey, RequestStatus, SliceCore, Ticket};
pub use work::{WorkListKind, WorkSlice};

/// Everything the pages render from.
#[derive(Debug, Default, Clone)]
pub struct AppStore {
    pub work: WorkSlice,
    pub contest: ContestSlice,
    pub billing: BillingSlice,
    pub toasts: ToastQueue,
    epoch: u64,
}

impl AppStore {
    /// Back to the initial state (sign-out). Requests still in flight
    /// belong to the old epoch and their responses are dropped.
    pub fn reset(&mut self) {
        let epoch = self.epoch + 1;
        tracing::info!(epoch, "resetting application store");
        *self = Self {
            epoch,
            ..Self::default()
        };
        self.work.core_mut().enter_epoch(epoch);
        self.contest.core_mut().enter_epoch(epoch);
        self.billing.core_mut().enter_epoch(epoch);
    }
}

/// Cloneable handle to the shared store
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<AppStore>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AppStore> {
        // A panic inside a reducer leaves plain data behind; keep serving it.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read a projection of the current state.
    pub fn read<R>(&self, f: impl FnOnce(&AppStore) -> R) -> R {
        f(&self.lock())
    }

    /// Apply a transition. Keep `f` synchronous and short.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut AppStore) -> R) -> R {
        f(&mut self.lock())
    }

    /// Copy of the whole state, for renderers that diff frames.
    pub fn snapshot(&self) -> AppStore {
        self.read(AppStore::clone)
    }

    pub fn reset(&self) {
        self.update(AppStore::reset);
    }

    pub fn drain_toasts(&self) -> Vec<Toast> {
        self.update(|s| s.toasts.drain())
    }
}
