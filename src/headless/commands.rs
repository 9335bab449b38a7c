//! Stdin commands for headless mode
//!
//! One JSON object per line, tagged by `op`:
//!
//! ```json
//! {"op":"create_lesson","name":"Recursion","description":"Week 3"}
//! {"op":"create_file","lesson":1,"name":"Slides","path":"./slides.pdf"}
//! {"op":"delete_file","lesson":1,"file":10}
//! {"op":"cancel","request":3}
//! {"op":"snapshot"}
//! {"op":"quit"}
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use coursesync_app::Message;
use coursesync_client::{CancelHandle, RequestId};
use coursesync_core::prelude::*;
use coursesync_core::{DeadlineForm, DeadlineId, FileId, FileUpload, LessonForm, LessonId};

/// A command read from stdin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    CreateLesson {
        name: String,
        #[serde(default)]
        description: String,
    },
    EditLesson {
        lesson: u64,
        name: String,
        #[serde(default)]
        description: String,
    },
    DeleteLesson {
        lesson: u64,
    },
    CreateFile {
        lesson: u64,
        #[serde(default)]
        name: Option<String>,
        path: PathBuf,
    },
    EditFile {
        lesson: u64,
        file: u64,
        #[serde(default)]
        name: Option<String>,
        path: PathBuf,
    },
    DeleteFile {
        lesson: u64,
        file: u64,
    },
    CreateDeadline {
        lesson: u64,
        #[serde(flatten)]
        fields: DeadlineFields,
    },
    EditDeadline {
        lesson: u64,
        deadline: u64,
        #[serde(flatten)]
        fields: DeadlineFields,
    },
    DeleteDeadline {
        lesson: u64,
        deadline: u64,
    },
    Cancel {
        request: u64,
    },
    CancelAll,
    OpenDialog,
    CloseDialog,
    SetForm {
        name: String,
        #[serde(default)]
        description: String,
    },
    SubmitDialog,
    Snapshot,
    Quit,
}

/// Deadline fields shared by create and edit
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeadlineFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub begin: Option<DateTime<Utc>>,
    pub end: DateTime<Utc>,
}

impl From<DeadlineFields> for DeadlineForm {
    fn from(fields: DeadlineFields) -> Self {
        DeadlineForm {
            name: fields.name,
            description: fields.description,
            begin: fields.begin,
            end: fields.end,
        }
    }
}

/// What the runner should do with a command
#[derive(Debug)]
pub enum Input {
    /// Feed a message to the engine
    Message(Message),
    Snapshot,
    Quit,
}

impl Command {
    /// Parse one stdin line.
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(Error::from)
    }

    /// Resolve the command into engine input. Uploads are read from disk here.
    pub async fn into_input(self) -> Result<Input> {
        let message = match self {
            Command::CreateLesson { name, description } => Message::CreateLesson {
                form: LessonForm::new(name, description),
            },
            Command::EditLesson {
                lesson,
                name,
                description,
            } => Message::EditLesson {
                lesson_id: LessonId(lesson),
                form: LessonForm::new(name, description),
                handle: CancelHandle::new(),
            },
            Command::DeleteLesson { lesson } => Message::DeleteLesson {
                lesson_id: LessonId(lesson),
                handle: CancelHandle::new(),
            },
            Command::CreateFile { lesson, name, path } => Message::CreateFile {
                lesson_id: LessonId(lesson),
                upload: read_upload(&path, name).await?,
            },
            Command::EditFile {
                lesson,
                file,
                name,
                path,
            } => Message::EditFile {
                lesson_id: LessonId(lesson),
                file_id: FileId(file),
                upload: read_upload(&path, name).await?,
                handle: CancelHandle::new(),
            },
            Command::DeleteFile { lesson, file } => Message::DeleteFile {
                lesson_id: LessonId(lesson),
                file_id: FileId(file),
                handle: CancelHandle::new(),
            },
            Command::CreateDeadline { lesson, fields } => Message::CreateDeadline {
                lesson_id: LessonId(lesson),
                form: fields.into(),
            },
            Command::EditDeadline {
                lesson,
                deadline,
                fields,
            } => Message::EditDeadline {
                lesson_id: LessonId(lesson),
                deadline_id: DeadlineId(deadline),
                form: fields.into(),
                handle: CancelHandle::new(),
            },
            Command::DeleteDeadline { lesson, deadline } => Message::DeleteDeadline {
                lesson_id: LessonId(lesson),
                deadline_id: DeadlineId(deadline),
                handle: CancelHandle::new(),
            },
            Command::Cancel { request } => Message::CancelRequest {
                request_id: RequestId(request),
            },
            Command::CancelAll => Message::CancelAll,
            Command::OpenDialog => Message::OpenCreateLessonDialog,
            Command::CloseDialog => Message::CloseCreateLessonDialog,
            Command::SetForm { name, description } => Message::CreateLessonFormEdited {
                form: LessonForm::new(name, description),
            },
            Command::SubmitDialog => Message::SubmitCreateLesson,
            Command::Snapshot => return Ok(Input::Snapshot),
            Command::Quit => return Ok(Input::Quit),
        };
        Ok(Input::Message(message))
    }
}

/// Read a local file into an upload. The display name defaults to the file name.
async fn read_upload(path: &Path, name: Option<String>) -> Result<FileUpload> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read upload {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(FileUpload {
        name: name.unwrap_or_else(|| file_name.clone()),
        file_name,
        content,
    })
}
