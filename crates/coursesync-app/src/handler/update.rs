//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::LessonsState;

use super::{dialog, lifecycle, requests, settle, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut LessonsState, message: Message) -> UpdateResult {
    match message {
        Message::Mount => requests::handle_mount(state),

        // ─────────────────────────────────────────────────────────
        // Lesson Messages
        // ─────────────────────────────────────────────────────────
        Message::CreateLesson { form } => requests::handle_create_lesson(state, form),
        Message::EditLesson {
            lesson_id,
            form,
            handle,
        } => requests::handle_edit_lesson(state, lesson_id, form, handle),
        Message::DeleteLesson { lesson_id, handle } => {
            requests::handle_delete_lesson(state, lesson_id, handle)
        }

        // ─────────────────────────────────────────────────────────
        // File Messages
        // ─────────────────────────────────────────────────────────
        Message::CreateFile { lesson_id, upload } => {
            requests::handle_create_file(state, lesson_id, upload)
        }
        Message::EditFile {
            lesson_id,
            file_id,
            upload,
            handle,
        } => requests::handle_edit_file(state, lesson_id, file_id, upload, handle),
        Message::DeleteFile {
            lesson_id,
            file_id,
            handle,
        } => requests::handle_delete_file(state, lesson_id, file_id, handle),

        // ─────────────────────────────────────────────────────────
        // Deadline Messages
        // ─────────────────────────────────────────────────────────
        Message::CreateDeadline { lesson_id, form } => {
            requests::handle_create_deadline(state, lesson_id, form)
        }
        Message::EditDeadline {
            lesson_id,
            deadline_id,
            form,
            handle,
        } => requests::handle_edit_deadline(state, lesson_id, deadline_id, form, handle),
        Message::DeleteDeadline {
            lesson_id,
            deadline_id,
            handle,
        } => requests::handle_delete_deadline(state, lesson_id, deadline_id, handle),

        // ─────────────────────────────────────────────────────────
        // Request Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::CancelRequest { request_id } => lifecycle::handle_cancel(state, request_id),
        Message::CancelAll => lifecycle::handle_cancel_all(state),
        Message::RequestSettled { request_id, result } => {
            settle::handle_request_settled(state, request_id, result)
        }

        // ─────────────────────────────────────────────────────────
        // Create-Lesson Dialog
        // ─────────────────────────────────────────────────────────
        Message::OpenCreateLessonDialog => dialog::handle_open(state),
        Message::CloseCreateLessonDialog => dialog::handle_close(state),
        Message::CreateLessonFormEdited { form } => dialog::handle_form_edited(state, form),
        Message::SubmitCreateLesson => dialog::handle_submit(state),
    }
}
