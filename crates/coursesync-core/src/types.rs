//! Domain types for the course → lesson → {file, deadline} tree

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::{project_locations, LocationItem};

// ── Identifiers ──────────────────────────────────────────────────────────────

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Course identifier, supplied by the route context.
    CourseId
);
entity_id!(
    /// Server-assigned lesson identifier, unique within a course.
    LessonId
);
entity_id!(
    /// File identifier, unique within its owning lesson.
    FileId
);
entity_id!(
    /// Deadline identifier, unique within its owning lesson.
    DeadlineId
);

// ── FileAttachment ───────────────────────────────────────────────────────────

/// A file attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: FileId,
    /// Display name chosen by the uploader. May be absent or blank.
    #[serde(default)]
    pub name: Option<String>,
    /// Reference to the stored file (usually an absolute URL).
    pub file: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ── Deadline ─────────────────────────────────────────────────────────────────

/// A deadline attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: DeadlineId,
    pub name: String,
    #[serde(default, deserialize_with = "crate::payload::null_as_default")]
    pub description: String,
    #[serde(default)]
    pub begin: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

// ── Lesson ───────────────────────────────────────────────────────────────────

/// A lesson and everything attached to it.
///
/// `location_items` is a projection of `files`. Both fields are private and
/// only [`Lesson::set_files`] writes them, so the projection cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub name: String,
    pub description: String,
    files: Vec<FileAttachment>,
    pub deadlines: Vec<Deadline>,
    location_items: Vec<LocationItem>,
}

impl Lesson {
    pub fn new(id: LessonId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            files: Vec::new(),
            deadlines: Vec::new(),
            location_items: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<FileAttachment>) -> Self {
        self.set_files(files);
        self
    }

    pub fn with_deadlines(mut self, deadlines: Vec<Deadline>) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }

    pub fn location_items(&self) -> &[LocationItem] {
        &self.location_items
    }

    /// Replace the file list and recompute the location items from it.
    pub fn set_files(&mut self, files: Vec<FileAttachment>) {
        self.location_items = project_locations(&files);
        self.files = files;
    }

    pub fn file(&self, id: FileId) -> Option<&FileAttachment> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn deadline(&self, id: DeadlineId) -> Option<&Deadline> {
        self.deadlines.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: u64, file: &str) -> FileAttachment {
        FileAttachment {
            id: FileId(id),
            name: None,
            file: file.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_ids_display_as_plain_numbers() {
        assert_eq!(LessonId(7).to_string(), "7");
        assert_eq!(CourseId::from(12).to_string(), "12");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&FileId(10)).unwrap();
        assert_eq!(json, "10");
    }

    #[test]
    fn test_set_files_recomputes_location_items() {
        let mut lesson = Lesson::new(LessonId(1), "Intro", "");
        assert!(lesson.location_items().is_empty());

        lesson.set_files(vec![
            attachment(10, "https://cdn.test/a.pdf"),
            attachment(11, "https://cdn.test/b.png"),
        ]);

        assert_eq!(lesson.files().len(), 2);
        assert_eq!(lesson.location_items(), project_locations(lesson.files()));

        lesson.set_files(Vec::new());
        assert!(lesson.location_items().is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let lesson = Lesson::new(LessonId(1), "Intro", "")
            .with_files(vec![attachment(10, "https://cdn.test/a.pdf")]);

        assert!(lesson.file(FileId(10)).is_some());
        assert!(lesson.file(FileId(11)).is_none());
        assert!(lesson.deadline(DeadlineId(1)).is_none());
    }
}
