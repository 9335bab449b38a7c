//! Lesson view state (Model in TEA pattern)

use std::collections::HashMap;

use serde::Serialize;

use coursesync_client::{CancelHandle, RequestId};
use coursesync_core::{CourseId, Lesson, LessonForm};

use crate::config::Settings;
use crate::pending::PendingAction;

/// Route and session context the view was opened with. Read only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    pub course_id: CourseId,
    /// Mutating handlers are only honored while this is set.
    pub editing: bool,
}

impl RouteContext {
    pub fn new(course_id: CourseId, editing: bool) -> Self {
        Self { course_id, editing }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Create-lesson dialog
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CreateLessonDialog {
    pub open: bool,
    pub submitting: bool,
    pub form: LessonForm,
    /// Inline validation error shown under the form
    pub error: Option<String>,
    /// Handle of the in-flight create, while submitting
    pub in_flight: Option<CancelHandle>,
}

impl CreateLessonDialog {
    /// Close and reset the form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether `id` is the in-flight create of this dialog.
    pub fn is_in_flight(&self, id: RequestId) -> bool {
        self.in_flight.as_ref().is_some_and(|h| h.id() == id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View state
// ─────────────────────────────────────────────────────────────────────────────

/// Complete state of one lesson view.
///
/// Only the update function writes it; outside the crate it is read through
/// accessors. `lessons` is only ever replaced with the output of a mutator.
///
/// ```compile_fail
/// use coursesync_app::{LessonsState, RouteContext};
/// use coursesync_core::CourseId;
///
/// let mut state = LessonsState::new(RouteContext::new(CourseId(1), true));
/// state.is_loading = false;
/// ```
#[derive(Debug)]
pub struct LessonsState {
    pub(crate) route: RouteContext,
    lessons: Vec<Lesson>,
    /// Bumped on every replacement of `lessons`
    revision: u64,
    pub(crate) is_loading: bool,
    /// Set once the initial fetch has been issued
    pub(crate) mounted: bool,
    pub(crate) pending: HashMap<RequestId, PendingAction>,
    pub(crate) create_dialog: CreateLessonDialog,
    pub(crate) notify_success: bool,
}

impl LessonsState {
    pub fn new(route: RouteContext) -> Self {
        Self {
            route,
            lessons: Vec::new(),
            revision: 0,
            is_loading: true,
            mounted: false,
            pending: HashMap::new(),
            create_dialog: CreateLessonDialog::default(),
            notify_success: true,
        }
    }

    pub fn with_settings(route: RouteContext, settings: &Settings) -> Self {
        let mut state = Self::new(route);
        state.notify_success = settings.behavior.notify_success;
        state
    }

    pub fn route(&self) -> RouteContext {
        self.route
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn create_dialog(&self) -> &CreateLessonDialog {
        &self.create_dialog
    }

    pub(crate) fn set_lessons(&mut self, lessons: Vec<Lesson>) {
        self.lessons = lessons;
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of requests issued but not yet settled or cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending action for a request, if it is still in flight.
    pub fn pending_action(&self, id: RequestId) -> Option<&PendingAction> {
        self.pending.get(&id)
    }

    /// Ids of all in-flight requests, oldest first.
    pub fn pending_ids(&self) -> Vec<RequestId> {
        let mut ids: Vec<RequestId> = self.pending.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn snapshot(&self) -> LessonsSnapshot {
        LessonsSnapshot {
            lessons: self.lessons.clone(),
            is_loading: self.is_loading,
            pending: self.pending_count(),
        }
    }
}

/// Read-only copy of the observable view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonsSnapshot {
    pub lessons: Vec<Lesson>,
    pub is_loading: bool,
    pub pending: usize,
}
