//! Test utilities for transport consumers
//!
//! [`ScriptedTransport`] answers requests from a script keyed by method and
//! path, so responses do not depend on the order in which spawned tasks reach
//! the transport. A [`Gate`] holds a response back until the test releases
//! it, which is how cancellation races are staged.
//!
//! The scripted transport deliberately ignores cancellation: it behaves like
//! a network transfer that completes anyway.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use coursesync_core::{Error, RemotePayload, Result};

use crate::cancel::CancelHandle;
use crate::request::{ApiRequest, Method};
use crate::transport::Transport;

type Slot = oneshot::Receiver<Result<RemotePayload>>;

#[derive(Default)]
struct Script {
    responses: HashMap<(Method, String), VecDeque<Slot>>,
    requests: Vec<ApiRequest>,
}

/// Transport that replays scripted responses.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

/// A response held back until released.
#[derive(Debug)]
pub struct Gate {
    tx: oneshot::Sender<Result<RemotePayload>>,
}

impl Gate {
    /// Let the held request succeed with `payload`.
    pub fn succeed(self, payload: RemotePayload) {
        let _ = self.tx.send(Ok(payload));
    }

    /// Let the held request fail with a transport error.
    pub fn fail(self, message: impl Into<String>) {
        let _ = self.tx.send(Err(Error::transport(message)));
    }
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next `method path` request with `response`.
    pub fn respond(&self, method: Method, path: &str, response: Result<RemotePayload>) {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(response);
        self.push(method, path, rx);
    }

    /// Answer the next `method path` request successfully.
    pub fn succeed(&self, method: Method, path: &str, payload: RemotePayload) {
        self.respond(method, path, Ok(payload));
    }

    /// Fail the next `method path` request with a transport error.
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.respond(method, path, Err(Error::transport(message)));
    }

    /// Hold the next `method path` request until the returned gate is released.
    pub fn gate(&self, method: Method, path: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, rx);
        Gate { tx }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    fn push(&self, method: Method, path: &str, slot: Slot) {
        self.lock()
            .responses
            .entry((method, path.to_string()))
            .or_default()
            .push_back(slot);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for ScriptedTransport {
    async fn request(&self, request: &ApiRequest, _cancel: &CancelHandle) -> Result<RemotePayload> {
        let slot = {
            let mut script = self.lock();
            script.requests.push(request.clone());
            script
                .responses
                .get_mut(&(request.method(), request.path()))
                .and_then(VecDeque::pop_front)
        };

        match slot {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::transport("gate dropped without a response"))),
            None => Err(Error::transport(format!(
                "no scripted response for {} {}",
                request.method(),
                request.path()
            ))),
        }
    }
}
