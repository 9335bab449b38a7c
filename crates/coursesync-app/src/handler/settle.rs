//! Settlement routing
//!
//! A settled request drives exactly one mutator on success and nothing on
//! failure. Settlements for requests that are no longer pending, or whose
//! handle was cancelled first, are dropped silently.

use coursesync_client::RequestId;
use coursesync_core::prelude::*;
use coursesync_core::{Lesson, RemotePayload};

use crate::mutators;
use crate::notify::Notification;
use crate::pending::ActionKind;
use crate::state::LessonsState;

use super::{UpdateAction, UpdateResult};

pub(crate) fn handle_request_settled(
    state: &mut LessonsState,
    request_id: RequestId,
    result: std::result::Result<RemotePayload, String>,
) -> UpdateResult {
    let Some(action) = state.pending.remove(&request_id) else {
        debug!("settlement for {request_id} ignored: not in flight");
        return UpdateResult::none();
    };
    let kind = action.kind;

    // First transition wins: a handle cancelled behind our back stays cancelled.
    if !action.handle.settle() {
        debug!(
            "{} ({request_id}) settled after cancellation, result discarded",
            kind.description()
        );
        return UpdateResult::none();
    }

    let elapsed = action.issued_at.elapsed();
    let outcome = result.and_then(|payload| apply(state.lessons(), kind, payload));

    if kind == ActionKind::LoadLessons {
        state.is_loading = false;
    }

    match outcome {
        Ok(lessons) => {
            debug!("{} ({request_id}) succeeded in {elapsed:?}", kind.description());
            state.set_lessons(lessons);

            if state.create_dialog.is_in_flight(request_id) {
                state.create_dialog.reset();
            }

            if kind == ActionKind::LoadLessons {
                info!("loaded {} lessons", state.lessons().len());
                return UpdateResult::none();
            }
            if !state.notify_success {
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::Notify(Notification::success(
                kind.success_title(),
            )))
        }
        Err(reason) => {
            warn!("{} ({request_id}) failed: {reason}", kind.description());

            if state.create_dialog.is_in_flight(request_id) {
                state.create_dialog.submitting = false;
                state.create_dialog.in_flight = None;
            }

            UpdateResult::action(UpdateAction::Notify(Notification::failure(
                kind.failure_title(),
            )))
        }
    }
}

/// Run the one mutator `kind` maps to. A payload of the wrong shape is a
/// failure and leaves `lessons` untouched.
fn apply(
    lessons: &[Lesson],
    kind: ActionKind,
    payload: RemotePayload,
) -> std::result::Result<Vec<Lesson>, String> {
    let next = match (kind, payload) {
        (ActionKind::LoadLessons, RemotePayload::LessonList(all)) => all,
        (ActionKind::CreateLesson, RemotePayload::Lesson(lesson)) => {
            mutators::add_lesson(lessons, lesson)
        }
        (ActionKind::EditLesson { lesson_id }, RemotePayload::Lesson(lesson)) => {
            if lesson.id != lesson_id {
                return Err(format!(
                    "edit of lesson {} answered with lesson {}",
                    lesson_id, lesson.id
                ));
            }
            mutators::replace_lesson(lessons, lesson)
        }
        (ActionKind::DeleteLesson { lesson_id }, RemotePayload::Empty) => {
            mutators::remove_lesson(lessons, lesson_id)
        }
        (ActionKind::CreateFile { lesson_id }, RemotePayload::File(file)) => {
            mutators::add_file(lessons, lesson_id, file)
        }
        (ActionKind::EditFile { lesson_id, file_id }, RemotePayload::File(file)) => {
            mutators::edit_file(lessons, lesson_id, file_id, file)
        }
        (ActionKind::DeleteFile { lesson_id, file_id }, RemotePayload::Empty) => {
            mutators::remove_file(lessons, lesson_id, file_id)
        }
        (ActionKind::CreateDeadline { lesson_id }, RemotePayload::Deadline(deadline)) => {
            mutators::add_deadline(lessons, lesson_id, deadline)
        }
        (
            ActionKind::EditDeadline {
                lesson_id,
                deadline_id,
            },
            RemotePayload::Deadline(deadline),
        ) => mutators::edit_deadline(lessons, lesson_id, deadline_id, deadline),
        (
            ActionKind::DeleteDeadline {
                lesson_id,
                deadline_id,
            },
            RemotePayload::Empty,
        ) => mutators::remove_deadline(lessons, lesson_id, deadline_id),
        (kind, payload) => {
            return Err(format!(
                "unexpected {:?} payload for {}",
                payload.kind(),
                kind.description()
            ))
        }
    };
    Ok(next)
}
