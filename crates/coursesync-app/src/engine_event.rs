//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. Notifications are not events; they go through the
//! engine's `Notifier`.

/// Domain events emitted by the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The initial fetch finished (successfully or not) and loading stopped
    LessonsLoaded { count: usize },

    /// The lesson sequence was replaced by a mutator
    LessonsChanged { count: usize, revision: u64 },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::LessonsLoaded { .. } => "lessons_loaded",
            Self::LessonsChanged { .. } => "lessons_changed",
            Self::Shutdown => "shutdown",
        }
    }
}
