//! Per-request cancellation handles
//!
//! Every issued request owns exactly one [`CancelHandle`]. The handle is a
//! small state machine shared between the caller (who may cancel) and the
//! settlement path (which closes it):
//!
//! ```text
//! Pending ──cancel()──▶ Cancelled
//!    │
//!    └────settle()───▶ Settled
//! ```
//!
//! Only the first transition out of `Pending` succeeds, so a result that
//! arrives after a cancellation can never be applied, and a cancellation that
//! arrives after settlement is a no-op.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

/// Global request ID counter
static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifier of one issued request. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Generate a unique request ID
pub fn next_request_id() -> RequestId {
    RequestId(REQUEST_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Lifecycle state of a cancellation handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleState {
    Pending,
    Settled,
    Cancelled,
}

/// Cancellation handle bound to a single request.
///
/// Cloning shares the same underlying state; all clones observe the same
/// transitions.
#[derive(Clone)]
pub struct CancelHandle {
    id: RequestId,
    state: Arc<watch::Sender<HandleState>>,
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    /// Allocate a fresh pending handle with a new request ID.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(HandleState::Pending);
        Self {
            id: next_request_id(),
            state: Arc::new(tx),
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn state(&self) -> HandleState {
        *self.state.borrow()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == HandleState::Pending
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == HandleState::Cancelled
    }

    /// Invalidate the handle. Returns `false` if it had already settled or
    /// been cancelled.
    pub fn cancel(&self) -> bool {
        self.transition(HandleState::Cancelled)
    }

    /// Close the handle on settlement. Returns `false` if the request was
    /// cancelled first, in which case its result must be discarded.
    pub fn settle(&self) -> bool {
        self.transition(HandleState::Settled)
    }

    /// Resolve once the handle is cancelled. Never resolves for a handle that
    /// settles instead.
    pub async fn cancelled(&self) {
        let mut rx = self.state.subscribe();
        let observed = rx.wait_for(|s| *s == HandleState::Cancelled).await.is_ok();
        if !observed {
            // Sender lives as long as `self`; unreachable in practice.
            std::future::pending::<()>().await;
        }
    }

    fn transition(&self, to: HandleState) -> bool {
        self.state.send_if_modified(|state| {
            if *state == HandleState::Pending {
                *state = to;
                true
            } else {
                false
            }
        })
    }
}
