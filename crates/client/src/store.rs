use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::session::Session;

/// Published state of one server-side collection.
///
/// `items` is always a full replacement of server state after a
/// successful load, never a merge, and keeps its previous value across
/// any failure. `is_loading` and `is_loaded` are never both true, and a
/// set `error_message` implies the store is not loading.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error_message: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            is_loaded: false,
            error_message: None,
        }
    }
}

/// Identity an entity exposes for in-place list reconciliation.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Shared machinery behind the account, category and transaction stores.
///
/// Holds the published state behind a `std` lock (synchronous snapshot
/// reads, never held across an await) and an operation gate that admits
/// one operation at a time per store; later calls queue in FIFO order.
#[derive(Clone, Debug)]
pub(crate) struct ResourceStore<T> {
    session: Session,
    state: Arc<RwLock<CollectionState<T>>>,
    gate: Arc<Mutex<()>>,
}

impl<T: Clone> ResourceStore<T> {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(CollectionState::default())),
            gate: Arc::new(Mutex::new(())),
        }
    }

    /// Atomic snapshot of the published state.
    pub(crate) fn snapshot(&self) -> CollectionState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs one operation under the store's gate.
    ///
    /// The protocol is identical for every operation: token guard (no
    /// token publishes the error and skips the network entirely), a
    /// loading publish, exactly one transport call, then a terminal
    /// publish. On success `apply` reconciles the collection with the
    /// decoded outcome; on failure the collection is left untouched.
    pub(crate) async fn execute<R, Fut>(
        &self,
        call: impl FnOnce(String) -> Fut,
        apply: impl FnOnce(&mut Vec<T>, R),
    ) where
        Fut: Future<Output = Result<R, StoreError>>,
    {
        let _gate = self.gate.lock().await;

        let Some(token) = self.session.token() else {
            self.publish_error(&StoreError::Unauthenticated);
            return;
        };

        self.publish_loading();
        match call(token).await {
            Ok(outcome) => self.publish_success(|items| apply(items, outcome)),
            Err(err) => self.publish_error(&err),
        }
    }

    fn publish_loading(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = true;
        state.is_loaded = false;
        state.error_message = None;
    }

    fn publish_success(&self, reconcile: impl FnOnce(&mut Vec<T>)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        reconcile(&mut state.items);
        state.is_loading = false;
        state.is_loaded = true;
        state.error_message = None;
    }

    fn publish_error(&self, err: &StoreError) {
        tracing::warn!(error = %err, "store operation failed");
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.is_loading = false;
        state.error_message = Some(err.to_string());
    }
}

/// Replaces the element whose key matches `id`, leaving order and every
/// other element untouched. A missing id is a silent no-op.
pub(crate) fn replace_by_id<T: Keyed>(items: &mut [T], id: &str, replacement: T) {
    if let Some(slot) = items.iter_mut().find(|item| item.key() == id) {
        *slot = replacement;
    }
}

/// Removes the element whose key matches `id`.
pub(crate) fn remove_by_id<T: Keyed>(items: &mut Vec<T>, id: &str) {
    items.retain(|item| item.key() != id);
}
