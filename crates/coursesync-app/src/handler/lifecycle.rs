//! Request lifecycle: issue, cancel
//!
//! Each issued request is recorded in `state.pending` under its handle's id
//! and leaves it exactly once: on settlement (see `settle`) or on cancellation
//! here.

use coursesync_client::{ApiRequest, CancelHandle, RequestId};
use coursesync_core::prelude::*;

use crate::pending::{ActionKind, PendingAction};
use crate::state::LessonsState;

use super::{UpdateAction, UpdateResult};

/// Whether mutating handlers are honored. Logs a warning when they are not.
pub(crate) fn require_editing(state: &LessonsState, what: &str) -> bool {
    if !state.route.editing {
        warn!("{what} ignored: view is not in editing mode");
        return false;
    }
    true
}

/// Record `kind` as pending under `handle` and ask the event loop to send
/// `request`.
///
/// A handle that already settled, was cancelled, or is bound to another
/// in-flight request is rejected: handles are bound 1:1 to requests.
pub(crate) fn issue(
    state: &mut LessonsState,
    kind: ActionKind,
    request: ApiRequest,
    handle: CancelHandle,
) -> UpdateResult {
    let id = handle.id();
    if !handle.is_pending() {
        warn!(
            "{} not issued: handle {id} is already {:?}",
            kind.description(),
            handle.state()
        );
        return UpdateResult::none();
    }
    if state.pending.contains_key(&id) {
        warn!(
            "{} not issued: handle {id} is bound to another request",
            kind.description()
        );
        return UpdateResult::none();
    }

    debug!("issuing {} as {id}", kind.description());
    state
        .pending
        .insert(id, PendingAction::new(kind, handle.clone()));

    UpdateResult::action(UpdateAction::SendRequest { request, handle })
}

/// Cancel one in-flight request. Its settlement, whenever it arrives, is
/// dropped without mutation or notification.
pub(crate) fn handle_cancel(state: &mut LessonsState, request_id: RequestId) -> UpdateResult {
    let Some(action) = state.pending.remove(&request_id) else {
        debug!("cancel for {request_id} ignored: not in flight");
        return UpdateResult::none();
    };

    action.handle.cancel();
    info!("cancelled {} ({request_id})", action.kind.description());

    if state.create_dialog.is_in_flight(request_id) {
        state.create_dialog.submitting = false;
        state.create_dialog.in_flight = None;
    }
    if action.kind == ActionKind::LoadLessons {
        state.is_loading = false;
    }

    UpdateResult::none()
}

/// Cancel everything in flight.
pub(crate) fn handle_cancel_all(state: &mut LessonsState) -> UpdateResult {
    for request_id in state.pending_ids() {
        handle_cancel(state, request_id);
    }
    UpdateResult::none()
}
