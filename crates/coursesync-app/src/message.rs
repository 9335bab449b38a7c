//! Message types for the lesson view (TEA pattern)

use coursesync_client::{CancelHandle, RequestId};
use coursesync_core::{
    DeadlineForm, DeadlineId, FileId, FileUpload, LessonForm, LessonId, RemotePayload,
};

/// All possible messages the lesson view handles
#[derive(Debug, Clone)]
pub enum Message {
    /// Issue the initial fetch for the route's course
    Mount,

    // ─────────────────────────────────────────────────────────
    // Lesson Messages
    // ─────────────────────────────────────────────────────────
    /// Create a lesson directly, bypassing the dialog
    CreateLesson { form: LessonForm },

    EditLesson {
        lesson_id: LessonId,
        form: LessonForm,
        handle: CancelHandle,
    },

    DeleteLesson {
        lesson_id: LessonId,
        handle: CancelHandle,
    },

    // ─────────────────────────────────────────────────────────
    // File Messages
    // ─────────────────────────────────────────────────────────
    CreateFile {
        lesson_id: LessonId,
        upload: FileUpload,
    },

    EditFile {
        lesson_id: LessonId,
        file_id: FileId,
        upload: FileUpload,
        handle: CancelHandle,
    },

    DeleteFile {
        lesson_id: LessonId,
        file_id: FileId,
        handle: CancelHandle,
    },

    // ─────────────────────────────────────────────────────────
    // Deadline Messages
    // ─────────────────────────────────────────────────────────
    CreateDeadline {
        lesson_id: LessonId,
        form: DeadlineForm,
    },

    EditDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
        form: DeadlineForm,
        handle: CancelHandle,
    },

    DeleteDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
        handle: CancelHandle,
    },

    // ─────────────────────────────────────────────────────────
    // Request Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Cancel one in-flight request
    CancelRequest { request_id: RequestId },

    /// Cancel every in-flight request (view teardown)
    CancelAll,

    /// A spawned request finished. Errors are carried as display strings.
    RequestSettled {
        request_id: RequestId,
        result: Result<RemotePayload, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Create-Lesson Dialog
    // ─────────────────────────────────────────────────────────
    OpenCreateLessonDialog,

    /// Close the dialog, cancelling a create in flight
    CloseCreateLessonDialog,

    CreateLessonFormEdited { form: LessonForm },

    SubmitCreateLesson,
}

impl Message {
    /// Whether this reports a finished request. Only request tasks send these.
    pub fn is_settlement(&self) -> bool {
        matches!(self, Message::RequestSettled { .. })
    }
}
