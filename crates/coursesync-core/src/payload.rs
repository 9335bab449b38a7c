//! Payload shapes exchanged with the course service
//!
//! Inbound bodies are validated into [`RemotePayload`] at the transport
//! boundary; nothing past that point handles untyped JSON. Outbound bodies are
//! the form types at the bottom of this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Deadline, FileAttachment, Lesson, LessonId};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Inbound ──────────────────────────────────────────────────────────────────

/// Wire shape of a lesson as the service returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonPayload {
    pub id: LessonId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_lesson: Vec<FileAttachment>,
    #[serde(
        default,
        alias = "deadline_lesson",
        deserialize_with = "null_as_default"
    )]
    pub deadlines: Vec<Deadline>,
}

impl From<LessonPayload> for Lesson {
    fn from(payload: LessonPayload) -> Self {
        Lesson::new(payload.id, payload.name, payload.description)
            .with_files(payload.file_lesson)
            .with_deadlines(payload.deadlines)
    }
}

/// The shape a response body is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    LessonList,
    Lesson,
    File,
    Deadline,
    /// Body is ignored (deletions).
    Empty,
}

/// A validated response body.
#[derive(Debug, Clone, PartialEq)]
pub enum RemotePayload {
    LessonList(Vec<Lesson>),
    Lesson(Lesson),
    File(FileAttachment),
    Deadline(Deadline),
    Empty,
}

impl RemotePayload {
    /// Validate a raw response body into the expected payload kind.
    ///
    /// `Empty` accepts any body, including none at all.
    pub fn decode(kind: PayloadKind, body: &[u8]) -> Result<Self> {
        if kind == PayloadKind::Empty {
            return Ok(RemotePayload::Empty);
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::payload(format!("empty body, expected {kind:?}")));
        }
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(kind, value)
    }

    /// Validate an already-parsed JSON value into the expected payload kind.
    pub fn from_value(kind: PayloadKind, value: Value) -> Result<Self> {
        let payload = match kind {
            PayloadKind::LessonList => {
                let lessons: Vec<LessonPayload> = serde_json::from_value(value)
                    .map_err(|e| Error::payload(format!("lesson list: {e}")))?;
                RemotePayload::LessonList(lessons.into_iter().map(Lesson::from).collect())
            }
            PayloadKind::Lesson => {
                let lesson: LessonPayload = serde_json::from_value(value)
                    .map_err(|e| Error::payload(format!("lesson: {e}")))?;
                RemotePayload::Lesson(lesson.into())
            }
            PayloadKind::File => RemotePayload::File(
                serde_json::from_value(value).map_err(|e| Error::payload(format!("file: {e}")))?,
            ),
            PayloadKind::Deadline => RemotePayload::Deadline(
                serde_json::from_value(value)
                    .map_err(|e| Error::payload(format!("deadline: {e}")))?,
            ),
            PayloadKind::Empty => RemotePayload::Empty,
        };
        Ok(payload)
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            RemotePayload::LessonList(_) => PayloadKind::LessonList,
            RemotePayload::Lesson(_) => PayloadKind::Lesson,
            RemotePayload::File(_) => PayloadKind::File,
            RemotePayload::Deadline(_) => PayloadKind::Deadline,
            RemotePayload::Empty => PayloadKind::Empty,
        }
    }
}

// ── Outbound ─────────────────────────────────────────────────────────────────

/// Body of a create/edit lesson request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LessonForm {
    pub name: String,
    pub description: String,
}

impl LessonForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Inline validation done before any request is issued.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", "Name must not empty"));
        }
        Ok(())
    }
}

/// Body of a create/edit deadline request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineForm {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

/// Body of a create/edit file request, sent as multipart form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Display name stored alongside the file.
    pub name: String,
    /// File name reported in the multipart part.
    pub file_name: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeadlineId, FileId};

    #[test]
    fn test_decode_lesson_list_normalizes_locations() {
        let body = br#"[
            {"id": 1, "name": "Intro", "description": null,
             "file_lesson": [{"id": 10, "file": "https://cdn.test/intro.pdf"}]}
        ]"#;

        let payload = RemotePayload::decode(PayloadKind::LessonList, body).unwrap();
        let RemotePayload::LessonList(lessons) = payload else {
            panic!("expected a lesson list");
        };

        assert_eq!(lessons.len(), 1);
        let lesson = &lessons[0];
        assert_eq!(lesson.id, LessonId(1));
        assert_eq!(lesson.description, "");
        assert_eq!(lesson.files()[0].id, FileId(10));
        assert_eq!(lesson.location_items().len(), 1);
        assert_eq!(lesson.location_items()[0].title, "intro.pdf");
    }

    #[test]
    fn test_decode_lesson_without_attachments() {
        let body = br#"{"id": 2, "name": "Next"}"#;
        let payload = RemotePayload::decode(PayloadKind::Lesson, body).unwrap();
        let RemotePayload::Lesson(lesson) = payload else {
            panic!("expected a lesson");
        };
        assert_eq!(lesson.name, "Next");
        assert!(lesson.files().is_empty());
        assert!(lesson.deadlines.is_empty());
    }

    #[test]
    fn test_decode_accepts_deadline_alias() {
        let body = br#"{"id": 3, "name": "Lab",
            "deadline_lesson": [{"id": 4, "name": "Report", "end": "2024-05-01T12:00:00Z"}]}"#;
        let RemotePayload::Lesson(lesson) = RemotePayload::decode(PayloadKind::Lesson, body).unwrap()
        else {
            panic!("expected a lesson");
        };
        assert_eq!(lesson.deadlines[0].id, DeadlineId(4));
    }

    #[test]
    fn test_decode_deadline() {
        let body = br#"{"id": 4, "name": "Report", "description": "PDF only",
            "begin": "2024-04-01T00:00:00Z", "end": "2024-05-01T12:00:00Z"}"#;
        let payload = RemotePayload::decode(PayloadKind::Deadline, body).unwrap();
        assert_eq!(payload.kind(), PayloadKind::Deadline);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let body = br#"{"name": "missing id"}"#;
        let err = RemotePayload::decode(PayloadKind::File, body).unwrap_err();
        assert!(matches!(err, Error::Payload { .. }));
    }

    #[test]
    fn test_decode_rejects_empty_body_for_entity() {
        let err = RemotePayload::decode(PayloadKind::Lesson, b"").unwrap_err();
        assert!(matches!(err, Error::Payload { .. }));
    }

    #[test]
    fn test_decode_empty_ignores_body() {
        assert_eq!(
            RemotePayload::decode(PayloadKind::Empty, b"").unwrap(),
            RemotePayload::Empty
        );
        assert_eq!(
            RemotePayload::decode(PayloadKind::Empty, b"{\"detail\":\"gone\"}").unwrap(),
            RemotePayload::Empty
        );
    }

    #[test]
    fn test_lesson_form_validation() {
        assert!(LessonForm::new("Intro", "").validate().is_ok());
        let err = LessonForm::new("  ", "desc").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_deadline_form_skips_missing_begin() {
        let form = DeadlineForm {
            name: "Report".to_string(),
            description: String::new(),
            begin: None,
            end: "2024-05-01T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("begin").is_none());
        assert_eq!(json["end"], "2024-05-01T12:00:00Z");
    }
}
