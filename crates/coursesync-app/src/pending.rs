//! In-flight action bookkeeping
//!
//! A [`PendingAction`] lives from the moment a request is issued until its
//! settlement is routed (or it is cancelled). It records what the request is
//! for, so the settlement can be matched to the one mutator it drives.

use std::time::Instant;

use serde::Serialize;

use coursesync_client::CancelHandle;
use coursesync_core::{DeadlineId, FileId, LessonId};

/// Kind of entity an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Lesson,
    File,
    Deadline,
}

/// Operation an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Load,
    Create,
    Edit,
    Delete,
}

/// What an in-flight request will do once it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    LoadLessons,
    CreateLesson,
    EditLesson {
        lesson_id: LessonId,
    },
    DeleteLesson {
        lesson_id: LessonId,
    },
    CreateFile {
        lesson_id: LessonId,
    },
    EditFile {
        lesson_id: LessonId,
        file_id: FileId,
    },
    DeleteFile {
        lesson_id: LessonId,
        file_id: FileId,
    },
    CreateDeadline {
        lesson_id: LessonId,
    },
    EditDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
    },
    DeleteDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
    },
}

impl ActionKind {
    pub fn operation(&self) -> Operation {
        match self {
            ActionKind::LoadLessons => Operation::Load,
            ActionKind::CreateLesson
            | ActionKind::CreateFile { .. }
            | ActionKind::CreateDeadline { .. } => Operation::Create,
            ActionKind::EditLesson { .. }
            | ActionKind::EditFile { .. }
            | ActionKind::EditDeadline { .. } => Operation::Edit,
            ActionKind::DeleteLesson { .. }
            | ActionKind::DeleteFile { .. }
            | ActionKind::DeleteDeadline { .. } => Operation::Delete,
        }
    }

    pub fn entity(&self) -> Entity {
        match self {
            ActionKind::LoadLessons
            | ActionKind::CreateLesson
            | ActionKind::EditLesson { .. }
            | ActionKind::DeleteLesson { .. } => Entity::Lesson,
            ActionKind::CreateFile { .. }
            | ActionKind::EditFile { .. }
            | ActionKind::DeleteFile { .. } => Entity::File,
            ActionKind::CreateDeadline { .. }
            | ActionKind::EditDeadline { .. }
            | ActionKind::DeleteDeadline { .. } => Entity::Deadline,
        }
    }

    /// Lesson the action is scoped to, if any.
    pub fn lesson_id(&self) -> Option<LessonId> {
        match *self {
            ActionKind::LoadLessons | ActionKind::CreateLesson => None,
            ActionKind::EditLesson { lesson_id }
            | ActionKind::DeleteLesson { lesson_id }
            | ActionKind::CreateFile { lesson_id }
            | ActionKind::EditFile { lesson_id, .. }
            | ActionKind::DeleteFile { lesson_id, .. }
            | ActionKind::CreateDeadline { lesson_id }
            | ActionKind::EditDeadline { lesson_id, .. }
            | ActionKind::DeleteDeadline { lesson_id, .. } => Some(lesson_id),
        }
    }

    /// Notification title stem, e.g. `"Delete file"`.
    fn title(&self) -> &'static str {
        match self {
            ActionKind::LoadLessons => "Load lessons",
            ActionKind::CreateLesson => "Create a new lesson",
            ActionKind::EditLesson { .. } => "Edit a lesson",
            ActionKind::DeleteLesson { .. } => "Delete a lesson",
            ActionKind::CreateFile { .. } => "Create a file",
            ActionKind::EditFile { .. } => "Edit file",
            ActionKind::DeleteFile { .. } => "Delete file",
            ActionKind::CreateDeadline { .. } => "Create a deadline",
            ActionKind::EditDeadline { .. } => "Edit a deadline",
            ActionKind::DeleteDeadline { .. } => "Delete a deadline",
        }
    }

    pub fn success_title(&self) -> String {
        format!("{} success", self.title())
    }

    pub fn failure_title(&self) -> String {
        format!("{} failed", self.title())
    }

    /// Get a human-readable description
    pub fn description(&self) -> String {
        match *self {
            ActionKind::LoadLessons => "load lessons".to_string(),
            ActionKind::CreateLesson => "create lesson".to_string(),
            ActionKind::EditLesson { lesson_id } => format!("edit lesson {lesson_id}"),
            ActionKind::DeleteLesson { lesson_id } => format!("delete lesson {lesson_id}"),
            ActionKind::CreateFile { lesson_id } => format!("create file in lesson {lesson_id}"),
            ActionKind::EditFile { lesson_id, file_id } => {
                format!("edit file {file_id} in lesson {lesson_id}")
            }
            ActionKind::DeleteFile { lesson_id, file_id } => {
                format!("delete file {file_id} in lesson {lesson_id}")
            }
            ActionKind::CreateDeadline { lesson_id } => {
                format!("create deadline in lesson {lesson_id}")
            }
            ActionKind::EditDeadline {
                lesson_id,
                deadline_id,
            } => format!("edit deadline {deadline_id} in lesson {lesson_id}"),
            ActionKind::DeleteDeadline {
                lesson_id,
                deadline_id,
            } => format!("delete deadline {deadline_id} in lesson {lesson_id}"),
        }
    }
}

/// An issued request awaiting settlement.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub handle: CancelHandle,
    pub issued_at: Instant,
}

impl PendingAction {
    pub fn new(kind: ActionKind, handle: CancelHandle) -> Self {
        Self {
            kind,
            handle,
            issued_at: Instant::now(),
        }
    }
}
