//! Headless mode - NDJSON event output and stdin commands
//!
//! The binary has no UI of its own. It drives the lesson view engine from
//! JSON commands read on stdin and reports everything observable as
//! structured JSON events on stdout.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"lessons_loaded","count":2,"lessons":[...],"timestamp":1704700001000}
//! {"event":"request_issued","request":4,"operation":"delete","entity":"file","lesson":1,"action":"delete file 10 in lesson 1","timestamp":1704700002000}
//! {"event":"notification","severity":"success","title":"Delete file success","message":"Yay","timestamp":1704700003000}
//! ```

pub mod commands;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use coursesync_app::{
    ActionKind, Entity, LessonsSnapshot, Notification, Notifier, Operation, Severity,
};
use coursesync_client::RequestId;
use coursesync_core::{Lesson, LessonId};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The initial fetch finished
    LessonsLoaded {
        count: usize,
        lessons: Vec<Lesson>,
        timestamp: i64,
    },

    /// A settled action replaced the lesson sequence
    LessonsChanged {
        count: usize,
        revision: u64,
        timestamp: i64,
    },

    /// A request was issued; `request` is the id to cancel it with
    RequestIssued {
        request: RequestId,
        operation: Operation,
        entity: Entity,
        #[serde(skip_serializing_if = "Option::is_none")]
        lesson: Option<LessonId>,
        action: String,
        timestamp: i64,
    },

    /// A user-facing notification
    Notification {
        severity: Severity,
        title: String,
        message: String,
        timestamp: i64,
    },

    /// Full view state, on request
    Snapshot {
        #[serde(flatten)]
        snapshot: LessonsSnapshot,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        // Serialize to JSON
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn lessons_loaded(lessons: &[Lesson]) -> Self {
        Self::LessonsLoaded {
            count: lessons.len(),
            lessons: lessons.to_vec(),
            timestamp: Self::now(),
        }
    }

    pub fn lessons_changed(count: usize, revision: u64) -> Self {
        Self::LessonsChanged {
            count,
            revision,
            timestamp: Self::now(),
        }
    }

    pub fn request_issued(request: RequestId, kind: &ActionKind) -> Self {
        Self::RequestIssued {
            request,
            operation: kind.operation(),
            entity: kind.entity(),
            lesson: kind.lesson_id(),
            action: kind.description(),
            timestamp: Self::now(),
        }
    }

    pub fn notification(notification: &Notification) -> Self {
        Self::Notification {
            severity: notification.severity,
            title: notification.title.clone(),
            message: notification.message.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn snapshot(snapshot: LessonsSnapshot) -> Self {
        Self::Snapshot {
            snapshot,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

/// Notifier that writes each notification as a `notification` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessNotifier;

impl Notifier for HeadlessNotifier {
    fn notify(&self, notification: &Notification) {
        HeadlessEvent::notification(notification).emit();
    }
}
