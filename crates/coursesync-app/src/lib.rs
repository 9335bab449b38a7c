//! # coursesync-app - Lesson View State and Orchestration
//!
//! Keeps a course's lessons (with their files and deadlines) in sync with the
//! course service, following the TEA pattern:
//!
//! - **Model**: [`LessonsState`] holds the lessons, the loading flag, the
//!   in-flight actions and the create-lesson dialog
//! - **Update**: [`handler::update()`] applies a [`Message`] and returns an
//!   [`UpdateAction`] for the event loop
//! - **Mutators**: [`mutators`] are the only functions that produce a new
//!   lesson sequence
//!
//! [`Engine`] owns the state, the message channel, the [`Transport`] and the
//! [`Notifier`], and is what frontends drive.
//!
//! [`Transport`]: coursesync_client::Transport

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod message;
pub mod mutators;
pub mod notify;
pub mod pending;
pub mod process;
pub mod state;

// Re-export primary types
pub use config::{load_settings, BehaviorSettings, ServerSettings, Settings};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
pub use pending::{ActionKind, Entity, Operation, PendingAction};
pub use state::{CreateLessonDialog, LessonsSnapshot, LessonsState, RouteContext};
