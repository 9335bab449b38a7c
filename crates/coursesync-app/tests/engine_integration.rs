//! Integration tests for the lesson view engine
//!
//! Drives a full [`Engine`] against a [`ScriptedTransport`], so requests run
//! as real spawned tasks and settle through the message channel.

use std::sync::{Arc, Mutex};

use coursesync_app::{
    Engine, EngineEvent, Message, Notification, Notifier, RouteContext, Settings, Severity,
};
use coursesync_client::test_utils::ScriptedTransport;
use coursesync_client::{ApiRequest, CancelHandle, Method};
use coursesync_core::{
    CourseId, FileAttachment, FileId, FileUpload, Lesson, LessonForm, LessonId, RemotePayload,
};

const LESSONS: &str = "api/courses/3/lessons/";
const FILE_10: &str = "api/courses/3/lessons/1/files/10/";

/// Notifier that records everything it is asked to show.
#[derive(Clone, Default)]
struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.seen.lock().unwrap().push(notification.clone());
    }
}

fn file(id: u64) -> FileAttachment {
    FileAttachment {
        id: FileId(id),
        name: None,
        file: format!("https://cdn.test/media/handout-{id}.pdf"),
        created_at: None,
    }
}

fn intro() -> Lesson {
    Lesson::new(LessonId(1), "Intro", "").with_files(vec![file(10)])
}

fn engine(
    editing: bool,
) -> (
    Engine<ScriptedTransport>,
    ScriptedTransport,
    RecordingNotifier,
) {
    let transport = ScriptedTransport::new();
    let notifier = RecordingNotifier::default();
    let engine = Engine::new(
        RouteContext::new(CourseId(3), editing),
        Settings::default(),
        transport.clone(),
        Arc::new(notifier.clone()),
    );
    (engine, transport, notifier)
}

/// Engine mounted with lesson 1 (holding file 10) loaded.
async fn mounted() -> (
    Engine<ScriptedTransport>,
    ScriptedTransport,
    RecordingNotifier,
) {
    let (mut engine, transport, notifier) = engine(true);
    transport.succeed(
        Method::Get,
        LESSONS,
        RemotePayload::LessonList(vec![intro()]),
    );
    engine.mount();
    engine.run_until_idle().await;
    (engine, transport, notifier)
}

#[tokio::test]
async fn test_mount_loads_lessons() {
    let (mut engine, transport, notifier) = engine(false);
    let mut events = engine.subscribe();
    transport.succeed(
        Method::Get,
        LESSONS,
        RemotePayload::LessonList(vec![intro(), Lesson::new(LessonId(2), "Loops", "")]),
    );

    assert!(engine.is_loading());
    engine.mount();
    engine.run_until_idle().await;

    assert!(!engine.is_loading());
    assert_eq!(engine.lessons().len(), 2);
    assert_eq!(engine.lessons()[0].location_items()[0].title, "handout-10.pdf");
    assert!(notifier.all().is_empty());
    assert_eq!(
        events.try_recv().unwrap(),
        EngineEvent::LessonsLoaded { count: 2 }
    );
}

#[tokio::test]
async fn test_mount_failure_notifies_and_stops_loading() {
    let (mut engine, transport, notifier) = engine(true);
    transport.fail(Method::Get, LESSONS, "connection refused");

    engine.mount();
    engine.run_until_idle().await;

    assert!(!engine.is_loading());
    assert!(engine.lessons().is_empty());
    assert_eq!(notifier.titles(), vec!["Load lessons failed"]);
}

#[tokio::test]
async fn test_create_lesson_appends() {
    let (mut engine, transport, notifier) = mounted().await;
    transport.succeed(
        Method::Post,
        LESSONS,
        RemotePayload::Lesson(Lesson::new(LessonId(2), "Recursion", "")),
    );

    engine.create_lesson(LessonForm::new("Recursion", ""));
    engine.run_until_idle().await;

    let ids: Vec<_> = engine.lessons().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![LessonId(1), LessonId(2)]);
    let seen = notifier.all();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].severity, Severity::Success);
    assert_eq!(seen[0].title, "Create a new lesson success");
}

#[tokio::test]
async fn test_delete_file_empties_lesson() {
    let (mut engine, transport, notifier) = mounted().await;
    transport.succeed(Method::Delete, FILE_10, RemotePayload::Empty);
    let handle = CancelHandle::new();

    engine.delete_file(LessonId(1), FileId(10), &handle);
    engine.run_until_idle().await;

    let lesson = &engine.lessons()[0];
    assert!(lesson.files().is_empty());
    assert!(lesson.location_items().is_empty());
    assert_eq!(notifier.titles(), vec!["Delete file success"]);
    assert!(!handle.is_pending());
}

#[tokio::test]
async fn test_create_file_sends_multipart_upload() {
    let (mut engine, transport, _notifier) = mounted().await;
    transport.succeed(
        Method::Post,
        "api/courses/3/lessons/1/files/",
        RemotePayload::File(file(11)),
    );
    let upload = FileUpload {
        name: "Week 2".to_string(),
        file_name: "week2.pdf".to_string(),
        content: b"%PDF-1.7".to_vec(),
    };

    engine.create_file(LessonId(1), upload.clone());
    engine.run_until_idle().await;

    assert_eq!(engine.lessons()[0].files().len(), 2);
    let sent = transport.requests();
    assert!(sent.contains(&ApiRequest::CreateFile {
        course_id: CourseId(3),
        lesson_id: LessonId(1),
        upload,
    }));
}

#[tokio::test]
async fn test_failed_action_leaves_state_unchanged() {
    let (mut engine, transport, notifier) = mounted().await;
    let before = engine.snapshot();
    transport.fail(Method::Delete, FILE_10, "500 Internal Server Error");

    engine.delete_file(LessonId(1), FileId(10), &CancelHandle::new());
    engine.run_until_idle().await;

    assert_eq!(engine.snapshot(), before);
    let seen = notifier.all();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Delete file failed");
    assert_eq!(seen[0].message, "Please try again");
}

#[tokio::test]
async fn test_cancelled_action_never_mutates_or_notifies() {
    let (mut engine, transport, notifier) = mounted().await;
    let before = engine.snapshot();
    let gate = transport.gate(Method::Delete, FILE_10);
    let handle = CancelHandle::new();

    engine.delete_file(LessonId(1), FileId(10), &handle);
    assert_eq!(engine.pending_count(), 1);

    engine.cancel(&handle);
    assert!(handle.is_cancelled());
    assert_eq!(engine.pending_count(), 0);

    // The transfer completes anyway; its result must be dropped.
    gate.succeed(RemotePayload::Empty);
    assert!(engine.settle_next().await);

    assert_eq!(engine.snapshot(), before);
    assert!(notifier.all().is_empty());
}

#[tokio::test]
async fn test_out_of_order_settlements_converge() {
    let (mut engine, transport, notifier) = mounted().await;
    let first = transport.gate(Method::Post, "api/courses/3/lessons/1/files/");
    let second = transport.gate(Method::Post, "api/courses/3/lessons/1/files/");
    let upload = FileUpload {
        name: "x".to_string(),
        file_name: "x.pdf".to_string(),
        content: Vec::new(),
    };

    engine.create_file(LessonId(1), upload.clone());
    engine.create_file(LessonId(1), upload);
    assert_eq!(engine.pending_count(), 2);

    second.succeed(RemotePayload::File(file(12)));
    first.succeed(RemotePayload::File(file(11)));
    engine.run_until_idle().await;

    let mut ids: Vec<_> = engine.lessons()[0].files().iter().map(|f| f.id.0).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![10, 11, 12]);
    assert_eq!(notifier.all().len(), 2);
}

#[tokio::test]
async fn test_create_dialog_validation_issues_no_request() {
    let (mut engine, transport, notifier) = mounted().await;
    let sent_before = transport.requests().len();

    engine.open_create_dialog();
    engine.set_create_form(LessonForm::new("", "No name"));
    engine.submit_create_dialog();
    engine.run_until_idle().await;

    assert_eq!(transport.requests().len(), sent_before);
    assert_eq!(
        engine.state().create_dialog().error.as_deref(),
        Some("Name must not empty")
    );
    assert!(notifier.all().is_empty());
}

#[tokio::test]
async fn test_create_dialog_round_trip() {
    let (mut engine, transport, _notifier) = mounted().await;
    transport.succeed(
        Method::Post,
        LESSONS,
        RemotePayload::Lesson(Lesson::new(LessonId(2), "Recursion", "Week 3")),
    );

    engine.open_create_dialog();
    engine.set_create_form(LessonForm::new("Recursion", "Week 3"));
    engine.submit_create_dialog();
    assert!(engine.state().create_dialog().submitting);
    engine.run_until_idle().await;

    assert!(!engine.state().create_dialog().open);
    assert_eq!(engine.lessons().len(), 2);
}

#[tokio::test]
async fn test_read_only_view_issues_no_mutations() {
    let (mut engine, transport, _notifier) = engine(false);
    transport.succeed(
        Method::Get,
        LESSONS,
        RemotePayload::LessonList(vec![intro()]),
    );
    engine.mount();
    engine.run_until_idle().await;

    engine.delete_file(LessonId(1), FileId(10), &CancelHandle::new());
    engine.create_lesson(LessonForm::new("Nope", ""));

    assert_eq!(engine.pending_count(), 0);
    assert_eq!(transport.requests().len(), 1);
    assert_eq!(engine.lessons()[0].files().len(), 1);
}

#[tokio::test]
async fn test_state_is_exposed_read_only() {
    let (engine, _transport, _notifier) = mounted().await;
    let state = engine.state();

    assert_eq!(state.route(), RouteContext::new(CourseId(3), true));
    assert!(state.is_mounted());
    assert!(!state.is_loading());
    assert!(!state.create_dialog().open);
}

#[tokio::test]
async fn test_dispatched_settlement_is_ignored() {
    let (mut engine, transport, notifier) = mounted().await;
    let gate = transport.gate(Method::Delete, FILE_10);
    let handle = CancelHandle::new();
    engine.delete_file(LessonId(1), FileId(10), &handle);

    engine.dispatch(Message::RequestSettled {
        request_id: handle.id(),
        result: Ok(RemotePayload::Empty),
    });

    assert_eq!(engine.pending_count(), 1);
    assert!(handle.is_pending());
    assert_eq!(engine.lessons()[0].files().len(), 1);

    gate.succeed(RemotePayload::Empty);
    engine.run_until_idle().await;
    assert!(engine.lessons()[0].files().is_empty());
    assert_eq!(notifier.titles(), vec!["Delete file success".to_string()]);
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_requests() {
    let (mut engine, transport, notifier) = mounted().await;
    let gate = transport.gate(Method::Delete, FILE_10);
    let handle = CancelHandle::new();
    let mut events = engine.subscribe();

    engine.delete_file(LessonId(1), FileId(10), &handle);
    // A dropped gate fails the transfer, so the task ends promptly.
    drop(gate);
    engine.shutdown().await;

    assert!(handle.is_cancelled());
    assert_eq!(engine.pending_count(), 0);
    assert_eq!(events.try_recv().unwrap(), EngineEvent::Shutdown);
    assert!(notifier.all().is_empty());
}
