//! Create/edit/delete handlers and the initial fetch
//!
//! Every handler here ends in [`lifecycle::issue`]. Create handlers allocate a
//! fresh handle; edit and delete handlers take the caller's, so the caller can
//! cancel them.

use coursesync_client::{ApiRequest, CancelHandle};
use coursesync_core::prelude::*;
use coursesync_core::{DeadlineForm, DeadlineId, FileId, FileUpload, LessonForm, LessonId};

use crate::pending::ActionKind;
use crate::state::LessonsState;

use super::lifecycle::{issue, require_editing};
use super::UpdateResult;

/// Issue the fetch-all for the route's course. Only the first mount fetches.
pub(crate) fn handle_mount(state: &mut LessonsState) -> UpdateResult {
    if state.mounted {
        debug!("mount ignored: already mounted");
        return UpdateResult::none();
    }
    state.mounted = true;
    state.is_loading = true;

    let course_id = state.route.course_id;
    info!("loading lessons for course {course_id}");
    issue(
        state,
        ActionKind::LoadLessons,
        ApiRequest::FetchLessons { course_id },
        CancelHandle::new(),
    )
}

// ─────────────────────────────────────────────────────────
// Lessons
// ─────────────────────────────────────────────────────────

pub(crate) fn handle_create_lesson(state: &mut LessonsState, form: LessonForm) -> UpdateResult {
    if !require_editing(state, "create lesson") {
        return UpdateResult::none();
    }
    if let Err(e) = form.validate() {
        warn!("create lesson rejected: {e}");
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::CreateLesson,
        ApiRequest::CreateLesson { course_id, form },
        CancelHandle::new(),
    )
}

pub(crate) fn handle_edit_lesson(
    state: &mut LessonsState,
    lesson_id: LessonId,
    form: LessonForm,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "edit lesson") {
        return UpdateResult::none();
    }
    if let Err(e) = form.validate() {
        warn!("edit lesson {lesson_id} rejected: {e}");
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::EditLesson { lesson_id },
        ApiRequest::EditLesson {
            course_id,
            lesson_id,
            form,
        },
        handle,
    )
}

pub(crate) fn handle_delete_lesson(
    state: &mut LessonsState,
    lesson_id: LessonId,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "delete lesson") {
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::DeleteLesson { lesson_id },
        ApiRequest::DeleteLesson {
            course_id,
            lesson_id,
        },
        handle,
    )
}

// ─────────────────────────────────────────────────────────
// Files
// ─────────────────────────────────────────────────────────

pub(crate) fn handle_create_file(
    state: &mut LessonsState,
    lesson_id: LessonId,
    upload: FileUpload,
) -> UpdateResult {
    if !require_editing(state, "create file") {
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::CreateFile { lesson_id },
        ApiRequest::CreateFile {
            course_id,
            lesson_id,
            upload,
        },
        CancelHandle::new(),
    )
}

pub(crate) fn handle_edit_file(
    state: &mut LessonsState,
    lesson_id: LessonId,
    file_id: FileId,
    upload: FileUpload,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "edit file") {
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::EditFile { lesson_id, file_id },
        ApiRequest::EditFile {
            course_id,
            lesson_id,
            file_id,
            upload,
        },
        handle,
    )
}

pub(crate) fn handle_delete_file(
    state: &mut LessonsState,
    lesson_id: LessonId,
    file_id: FileId,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "delete file") {
        return UpdateResult::none();
    }
    let course_id = state.route.course_id;
    issue(
        state,
        ActionKind::DeleteFile { lesson_id, file_id },
        ApiRequest::DeleteFile {
            course_id,
            lesson_id,
            file_id,
        },
        handle,
    )
}

// ─────────────────────────────────────────────────────────
// Deadlines
// ─────────────────────────────────────────────────────────

pub(crate) fn handle_create_deadline(
    state: &mut LessonsState,
    lesson_id: LessonId,
    form: DeadlineForm,
) -> UpdateResult {
    if !require_editing(state, "create deadline") {
        return UpdateResult::none();
    }
    issue(
        state,
        ActionKind::CreateDeadline { lesson_id },
        ApiRequest::CreateDeadline { lesson_id, form },
        CancelHandle::new(),
    )
}

pub(crate) fn handle_edit_deadline(
    state: &mut LessonsState,
    lesson_id: LessonId,
    deadline_id: DeadlineId,
    form: DeadlineForm,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "edit deadline") {
        return UpdateResult::none();
    }
    issue(
        state,
        ActionKind::EditDeadline {
            lesson_id,
            deadline_id,
        },
        ApiRequest::EditDeadline {
            lesson_id,
            deadline_id,
            form,
        },
        handle,
    )
}

pub(crate) fn handle_delete_deadline(
    state: &mut LessonsState,
    lesson_id: LessonId,
    deadline_id: DeadlineId,
    handle: CancelHandle,
) -> UpdateResult {
    if !require_editing(state, "delete deadline") {
        return UpdateResult::none();
    }
    issue(
        state,
        ActionKind::DeleteDeadline {
            lesson_id,
            deadline_id,
        },
        ApiRequest::DeleteDeadline {
            lesson_id,
            deadline_id,
        },
        handle,
    )
}
