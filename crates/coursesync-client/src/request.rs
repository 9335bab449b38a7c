//! Request catalogue for the course service
//!
//! Every remote operation the lesson view can issue is one [`ApiRequest`]
//! variant. The variant knows its HTTP method, its path relative to the
//! configured base URL, how its body is encoded and which payload shape the
//! response must have.

use coursesync_core::prelude::*;
use coursesync_core::{
    CourseId, DeadlineForm, DeadlineId, FileId, FileUpload, LessonForm, LessonId, PayloadKind,
};
use serde_json::Value;

const COURSES_PREFIX: &str = "api/courses";
const DEADLINES_PREFIX: &str = "deadlineAPI";

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// Sent as `multipart/form-data` with a `name` text field and a `file` part.
    Multipart(FileUpload),
}

/// A remote operation against the course service
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    FetchLessons {
        course_id: CourseId,
    },
    CreateLesson {
        course_id: CourseId,
        form: LessonForm,
    },
    EditLesson {
        course_id: CourseId,
        lesson_id: LessonId,
        form: LessonForm,
    },
    DeleteLesson {
        course_id: CourseId,
        lesson_id: LessonId,
    },
    CreateFile {
        course_id: CourseId,
        lesson_id: LessonId,
        upload: FileUpload,
    },
    EditFile {
        course_id: CourseId,
        lesson_id: LessonId,
        file_id: FileId,
        upload: FileUpload,
    },
    DeleteFile {
        course_id: CourseId,
        lesson_id: LessonId,
        file_id: FileId,
    },
    CreateDeadline {
        lesson_id: LessonId,
        form: DeadlineForm,
    },
    EditDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
        form: DeadlineForm,
    },
    DeleteDeadline {
        lesson_id: LessonId,
        deadline_id: DeadlineId,
    },
}

impl ApiRequest {
    pub fn method(&self) -> Method {
        match self {
            ApiRequest::FetchLessons { .. } => Method::Get,
            ApiRequest::CreateLesson { .. }
            | ApiRequest::CreateFile { .. }
            | ApiRequest::CreateDeadline { .. } => Method::Post,
            ApiRequest::EditLesson { .. }
            | ApiRequest::EditFile { .. }
            | ApiRequest::EditDeadline { .. } => Method::Put,
            ApiRequest::DeleteLesson { .. }
            | ApiRequest::DeleteFile { .. }
            | ApiRequest::DeleteDeadline { .. } => Method::Delete,
        }
    }

    /// Path relative to the service base URL, always with a trailing slash.
    pub fn path(&self) -> String {
        match self {
            ApiRequest::FetchLessons { course_id } | ApiRequest::CreateLesson { course_id, .. } => {
                format!("{COURSES_PREFIX}/{course_id}/lessons/")
            }
            ApiRequest::EditLesson {
                course_id,
                lesson_id,
                ..
            }
            | ApiRequest::DeleteLesson {
                course_id,
                lesson_id,
            } => format!("{COURSES_PREFIX}/{course_id}/lessons/{lesson_id}/"),
            ApiRequest::CreateFile {
                course_id,
                lesson_id,
                ..
            } => format!("{COURSES_PREFIX}/{course_id}/lessons/{lesson_id}/files/"),
            ApiRequest::EditFile {
                course_id,
                lesson_id,
                file_id,
                ..
            }
            | ApiRequest::DeleteFile {
                course_id,
                lesson_id,
                file_id,
            } => format!("{COURSES_PREFIX}/{course_id}/lessons/{lesson_id}/files/{file_id}/"),
            ApiRequest::CreateDeadline { lesson_id, .. } => {
                format!("{DEADLINES_PREFIX}/{lesson_id}/lecturerDeadlines/")
            }
            ApiRequest::EditDeadline {
                lesson_id,
                deadline_id,
                ..
            }
            | ApiRequest::DeleteDeadline {
                lesson_id,
                deadline_id,
            } => format!("{DEADLINES_PREFIX}/{lesson_id}/lecturerDeadlines/{deadline_id}/"),
        }
    }

    /// Encode the request body, if the operation has one.
    pub fn body(&self) -> Result<Option<RequestBody>> {
        let body = match self {
            ApiRequest::CreateLesson { form, .. } | ApiRequest::EditLesson { form, .. } => {
                Some(RequestBody::Json(serde_json::to_value(form)?))
            }
            ApiRequest::CreateDeadline { form, .. } | ApiRequest::EditDeadline { form, .. } => {
                Some(RequestBody::Json(serde_json::to_value(form)?))
            }
            ApiRequest::CreateFile { upload, .. } | ApiRequest::EditFile { upload, .. } => {
                Some(RequestBody::Multipart(upload.clone()))
            }
            ApiRequest::FetchLessons { .. }
            | ApiRequest::DeleteLesson { .. }
            | ApiRequest::DeleteFile { .. }
            | ApiRequest::DeleteDeadline { .. } => None,
        };
        Ok(body)
    }

    /// Payload shape the response must validate into.
    pub fn expects(&self) -> PayloadKind {
        match self {
            ApiRequest::FetchLessons { .. } => PayloadKind::LessonList,
            ApiRequest::CreateLesson { .. } | ApiRequest::EditLesson { .. } => PayloadKind::Lesson,
            ApiRequest::CreateFile { .. } | ApiRequest::EditFile { .. } => PayloadKind::File,
            ApiRequest::CreateDeadline { .. } | ApiRequest::EditDeadline { .. } => {
                PayloadKind::Deadline
            }
            ApiRequest::DeleteLesson { .. }
            | ApiRequest::DeleteFile { .. }
            | ApiRequest::DeleteDeadline { .. } => PayloadKind::Empty,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ApiRequest::FetchLessons { .. } => "fetch lessons",
            ApiRequest::CreateLesson { .. } => "create lesson",
            ApiRequest::EditLesson { .. } => "edit lesson",
            ApiRequest::DeleteLesson { .. } => "delete lesson",
            ApiRequest::CreateFile { .. } => "create file",
            ApiRequest::EditFile { .. } => "edit file",
            ApiRequest::DeleteFile { .. } => "delete file",
            ApiRequest::CreateDeadline { .. } => "create deadline",
            ApiRequest::EditDeadline { .. } => "edit deadline",
            ApiRequest::DeleteDeadline { .. } => "delete deadline",
        }
    }
}
