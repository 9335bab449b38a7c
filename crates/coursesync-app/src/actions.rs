//! Action handlers: UpdateAction dispatch and background request tasks

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use coursesync_client::{ApiRequest, CancelHandle, RequestId, Transport};

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::notify::Notifier;

/// Convenience type alias for request task tracking
pub type RequestTaskMap = Arc<Mutex<HashMap<RequestId, JoinHandle<()>>>>;

/// Execute an action, spawning a background task for requests
pub fn handle_action<T>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    transport: &Arc<T>,
    notifier: &Arc<dyn Notifier>,
    request_tasks: &RequestTaskMap,
) where
    T: Transport + Sync + 'static,
{
    match action {
        UpdateAction::SendRequest { request, handle } => {
            let request_id = handle.id();
            let task = spawn_request(request, handle, msg_tx, transport.clone());
            if let Ok(mut tasks) = request_tasks.lock() {
                tasks.retain(|_, running| !running.is_finished());
                tasks.insert(request_id, task);
            }
        }

        UpdateAction::Notify(notification) => {
            notifier.notify(&notification);
        }
    }
}

/// Send one request and report its outcome back to the message loop.
fn spawn_request<T>(
    request: ApiRequest,
    handle: CancelHandle,
    msg_tx: mpsc::Sender<Message>,
    transport: Arc<T>,
) -> JoinHandle<()>
where
    T: Transport + Sync + 'static,
{
    tokio::spawn(async move {
        let request_id = handle.id();
        let result = transport
            .request(&request, &handle)
            .await
            .map_err(|e| e.to_string());

        debug!(
            "{} {request_id} finished: {}",
            request.description(),
            if result.is_ok() { "ok" } else { "error" }
        );

        if msg_tx
            .send(Message::RequestSettled { request_id, result })
            .await
            .is_err()
        {
            warn!("{request_id} settled after the message loop closed");
        }
    })
}
