//! Engine - owns the lesson view and drives its message loop
//!
//! The Engine owns the TEA state, the message channel, the transport and the
//! notifier. Callers feed it messages (directly or through the typed handler
//! methods) and drain settlements with [`Engine::settle_next`] or
//! [`Engine::run_until_idle`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use coursesync_client::{CancelHandle, Transport};
use coursesync_core::{
    DeadlineForm, DeadlineId, FileId, FileUpload, Lesson, LessonForm, LessonId,
};

use crate::actions::RequestTaskMap;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::notify::Notifier;
use crate::process;
use crate::state::{LessonsSnapshot, LessonsState, RouteContext};

/// How long shutdown waits for request tasks before aborting them
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Lightweight snapshot of state for change detection.
#[derive(Debug, Clone, Copy)]
struct StateSnapshot {
    is_loading: bool,
    revision: u64,
}

impl StateSnapshot {
    fn capture(state: &LessonsState) -> Self {
        Self {
            is_loading: state.is_loading,
            revision: state.revision(),
        }
    }
}

/// Orchestration engine for one lesson view.
///
/// The state is only reachable read-only; every change goes through a
/// handler method and the update function.
///
/// ```compile_fail
/// fn flip<T>(engine: &mut coursesync_app::Engine<T>) {
///     engine.state.route.editing = false;
/// }
/// ```
pub struct Engine<T> {
    /// TEA application state (the Model)
    state: LessonsState,

    /// Request tasks report their settlements here.
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,

    transport: Arc<T>,
    notifier: Arc<dyn Notifier>,
    request_tasks: RequestTaskMap,
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<T> Engine<T>
where
    T: Transport + Sync + 'static,
{
    /// Create an engine for `route`. Nothing is fetched until [`Engine::mount`].
    pub fn new(
        route: RouteContext,
        settings: Settings,
        transport: T,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = LessonsState::with_settings(route, &settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            transport: Arc::new(transport),
            notifier,
            request_tasks: Arc::new(Mutex::new(HashMap::new())),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Feed a caller-originated message through the update cycle.
    ///
    /// Settlements only come from request tasks; one passed in here is dropped.
    pub fn dispatch(&mut self, msg: Message) {
        if msg.is_settlement() {
            warn!("settlement dispatched from outside the engine ignored");
            return;
        }
        self.process_message(msg);
    }

    /// Process a single message through the TEA update cycle and emit events
    /// for the resulting state changes.
    fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.transport,
            &self.notifier,
            &self.request_tasks,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all messages already queued. Does not wait.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next queued message (usually a settlement) and process
    /// it. Returns `false` once the channel is closed.
    pub async fn settle_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process messages until no request is in flight.
    pub async fn run_until_idle(&mut self) {
        while self.state.pending_count() > 0 {
            if !self.settle_next().await {
                break;
            }
        }
        self.drain_pending_messages();
    }

    // ─────────────────────────────────────────────────────────
    // Read-only view
    // ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &LessonsState {
        &self.state
    }

    pub fn lessons(&self) -> &[Lesson] {
        self.state.lessons()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn pending_count(&self) -> usize {
        self.state.pending_count()
    }

    pub fn snapshot(&self) -> LessonsSnapshot {
        self.state.snapshot()
    }

    // ─────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────

    /// Issue the initial fetch.
    pub fn mount(&mut self) {
        self.process_message(Message::Mount);
    }

    pub fn create_lesson(&mut self, form: LessonForm) {
        self.process_message(Message::CreateLesson { form });
    }

    pub fn edit_lesson(&mut self, lesson_id: LessonId, form: LessonForm, handle: &CancelHandle) {
        self.process_message(Message::EditLesson {
            lesson_id,
            form,
            handle: handle.clone(),
        });
    }

    pub fn delete_lesson(&mut self, lesson_id: LessonId, handle: &CancelHandle) {
        self.process_message(Message::DeleteLesson {
            lesson_id,
            handle: handle.clone(),
        });
    }

    pub fn create_file(&mut self, lesson_id: LessonId, upload: FileUpload) {
        self.process_message(Message::CreateFile { lesson_id, upload });
    }

    pub fn edit_file(
        &mut self,
        lesson_id: LessonId,
        file_id: FileId,
        upload: FileUpload,
        handle: &CancelHandle,
    ) {
        self.process_message(Message::EditFile {
            lesson_id,
            file_id,
            upload,
            handle: handle.clone(),
        });
    }

    pub fn delete_file(&mut self, lesson_id: LessonId, file_id: FileId, handle: &CancelHandle) {
        self.process_message(Message::DeleteFile {
            lesson_id,
            file_id,
            handle: handle.clone(),
        });
    }

    pub fn create_deadline(&mut self, lesson_id: LessonId, form: DeadlineForm) {
        self.process_message(Message::CreateDeadline { lesson_id, form });
    }

    pub fn edit_deadline(
        &mut self,
        lesson_id: LessonId,
        deadline_id: DeadlineId,
        form: DeadlineForm,
        handle: &CancelHandle,
    ) {
        self.process_message(Message::EditDeadline {
            lesson_id,
            deadline_id,
            form,
            handle: handle.clone(),
        });
    }

    pub fn delete_deadline(
        &mut self,
        lesson_id: LessonId,
        deadline_id: DeadlineId,
        handle: &CancelHandle,
    ) {
        self.process_message(Message::DeleteDeadline {
            lesson_id,
            deadline_id,
            handle: handle.clone(),
        });
    }

    /// Cancel the request bound to `handle`.
    pub fn cancel(&mut self, handle: &CancelHandle) {
        self.process_message(Message::CancelRequest {
            request_id: handle.id(),
        });
    }

    // ─────────────────────────────────────────────────────────
    // Create-lesson dialog
    // ─────────────────────────────────────────────────────────

    pub fn open_create_dialog(&mut self) {
        self.process_message(Message::OpenCreateLessonDialog);
    }

    pub fn close_create_dialog(&mut self) {
        self.process_message(Message::CloseCreateLessonDialog);
    }

    pub fn set_create_form(&mut self, form: LessonForm) {
        self.process_message(Message::CreateLessonFormEdited { form });
    }

    pub fn submit_create_dialog(&mut self) {
        self.process_message(Message::SubmitCreateLesson);
    }

    // ─────────────────────────────────────────────────────────
    // Shutdown
    // ─────────────────────────────────────────────────────────

    /// Cancel everything in flight and wait briefly for request tasks.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        self.process_message(Message::CancelAll);

        let tasks: Vec<_> = match self.request_tasks.lock() {
            Ok(mut map) => map.drain().collect(),
            Err(_) => Vec::new(),
        };

        for (request_id, task) in tasks {
            let abort = task.abort_handle();
            match tokio::time::timeout(SHUTDOWN_GRACE, task).await {
                Ok(Ok(())) => debug!("Request {} task finished", request_id),
                Ok(Err(e)) if e.is_cancelled() => {}
                Ok(Err(e)) => warn!("Request {} task panicked: {}", request_id, e),
                Err(_) => {
                    warn!("Request {} task timed out, aborting", request_id);
                    abort.abort();
                }
            }
        }
        info!("engine shut down");
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.is_loading && !post.is_loading {
            self.emit(EngineEvent::LessonsLoaded {
                count: self.state.lessons().len(),
            });
        } else if pre.revision != post.revision {
            self.emit(EngineEvent::LessonsChanged {
                count: self.state.lessons().len(),
                revision: post.revision,
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
