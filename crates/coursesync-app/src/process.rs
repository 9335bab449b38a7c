//! Message processing
//!
//! Runs the TEA update function and dispatches the resulting actions.

use std::sync::Arc;

use tokio::sync::mpsc;

use coursesync_client::Transport;

use crate::actions::{handle_action, RequestTaskMap};
use crate::handler;
use crate::message::Message;
use crate::notify::Notifier;
use crate::state::LessonsState;

/// Process a message through the TEA update function
pub fn process_message<T>(
    state: &mut LessonsState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    transport: &Arc<T>,
    notifier: &Arc<dyn Notifier>,
    request_tasks: &RequestTaskMap,
) where
    T: Transport + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), transport, notifier, request_tasks);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
