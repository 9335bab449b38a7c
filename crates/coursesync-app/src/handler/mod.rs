//! Handler module - TEA update function and lesson view handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `requests`: Create/edit/delete handlers and the initial fetch
//! - `lifecycle`: Issuing and cancelling requests
//! - `settle`: Routing settled requests into the mutators
//! - `dialog`: Create-lesson dialog handlers

pub(crate) mod dialog;
pub(crate) mod lifecycle;
pub(crate) mod requests;
pub(crate) mod settle;
pub(crate) mod update;


use coursesync_client::{ApiRequest, CancelHandle};

use crate::message::Message;
use crate::notify::Notification;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Send a request in the background and report back with
    /// `Message::RequestSettled`
    SendRequest {
        request: ApiRequest,
        handle: CancelHandle,
    },

    /// Show a notification to the user
    Notify(Notification),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
