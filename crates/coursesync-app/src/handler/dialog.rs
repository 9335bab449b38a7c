//! Create-lesson dialog handlers

use coursesync_client::{ApiRequest, CancelHandle};
use coursesync_core::prelude::*;
use coursesync_core::LessonForm;

use crate::pending::ActionKind;
use crate::state::LessonsState;

use super::lifecycle::{handle_cancel, issue, require_editing};
use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_open(state: &mut LessonsState) -> UpdateResult {
    if !require_editing(state, "open create-lesson dialog") {
        return UpdateResult::none();
    }
    state.create_dialog.open = true;
    UpdateResult::none()
}

/// Close the dialog. A create still in flight is cancelled, so its result
/// can no longer land.
pub(crate) fn handle_close(state: &mut LessonsState) -> UpdateResult {
    if let Some(handle) = state.create_dialog.in_flight.clone() {
        handle_cancel(state, handle.id());
    }
    state.create_dialog.reset();
    UpdateResult::none()
}

pub(crate) fn handle_form_edited(state: &mut LessonsState, form: LessonForm) -> UpdateResult {
    let dialog = &mut state.create_dialog;
    if !dialog.open || dialog.submitting {
        return UpdateResult::none();
    }
    dialog.form = form;
    dialog.error = None;
    UpdateResult::none()
}

pub(crate) fn handle_submit(state: &mut LessonsState) -> UpdateResult {
    if !state.create_dialog.open || state.create_dialog.submitting {
        debug!("submit ignored: dialog closed or already submitting");
        return UpdateResult::none();
    }
    if !require_editing(state, "create lesson") {
        return UpdateResult::none();
    }

    let form = state.create_dialog.form.clone();
    if let Err(e) = form.validate() {
        state.create_dialog.error = Some(match e {
            Error::Validation { message, .. } => message,
            other => other.to_string(),
        });
        return UpdateResult::none();
    }

    let handle = CancelHandle::new();
    let course_id = state.route.course_id;
    let result = issue(
        state,
        ActionKind::CreateLesson,
        ApiRequest::CreateLesson { course_id, form },
        handle.clone(),
    );

    if matches!(result.action, Some(UpdateAction::SendRequest { .. })) {
        let dialog = &mut state.create_dialog;
        dialog.submitting = true;
        dialog.error = None;
        dialog.in_flight = Some(handle);
    }
    result
}
