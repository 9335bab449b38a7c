//! Headless mode runner - main event loop
//!
//! Mounts the lesson view, then multiplexes request settlements and stdin
//! commands until `quit` or end of input, emitting NDJSON events as state
//! changes.

use std::collections::HashSet;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use coursesync_app::{Engine, EngineEvent};
use coursesync_client::{RequestId, Transport};
use coursesync_core::prelude::*;

use super::commands::{Command, Input};
use super::HeadlessEvent;

/// Run the headless event loop until quit or stdin closes.
pub async fn run_headless<T>(mut engine: Engine<T>) -> Result<()>
where
    T: Transport + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("coursesync starting in HEADLESS mode");
    info!("Course: {}", engine.state().route().course_id);
    info!("Editing: {}", engine.state().route().editing);
    info!("═══════════════════════════════════════════════════════");

    // Spawn headless-specific stdin reader
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(64);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(cmd_tx);
    });

    let mut events = engine.subscribe();
    let mut announced = HashSet::new();

    engine.mount();
    emit_post_message_events(&engine, &mut events, &mut announced);

    let result = headless_event_loop(&mut engine, cmd_rx, &mut events, &mut announced).await;

    engine.shutdown().await;

    info!("coursesync headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop<T>(
    engine: &mut Engine<T>,
    mut cmd_rx: mpsc::Receiver<Command>,
    events: &mut broadcast::Receiver<EngineEvent>,
    announced: &mut HashSet<RequestId>,
) -> Result<()>
where
    T: Transport + Sync + 'static,
{
    loop {
        tokio::select! {
            open = engine.settle_next() => {
                if !open {
                    info!("Message channel closed");
                    break;
                }
            }
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => match cmd.into_input().await {
                    Ok(Input::Message(msg)) => engine.dispatch(msg),
                    Ok(Input::Snapshot) => HeadlessEvent::snapshot(engine.snapshot()).emit(),
                    Ok(Input::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    Err(e) => HeadlessEvent::error(e.to_string(), false).emit(),
                },
                None => {
                    // Input is exhausted; let in-flight requests finish first.
                    info!("Stdin closed, waiting for {} request(s)", engine.pending_count());
                    engine.run_until_idle().await;
                    emit_post_message_events(engine, events, announced);
                    break;
                }
            },
        }

        emit_post_message_events(engine, events, announced);
    }

    Ok(())
}

/// Emit events for engine changes and newly issued requests
fn emit_post_message_events<T>(
    engine: &Engine<T>,
    events: &mut broadcast::Receiver<EngineEvent>,
    announced: &mut HashSet<RequestId>,
) where
    T: Transport + Sync + 'static,
{
    loop {
        match events.try_recv() {
            Ok(EngineEvent::LessonsLoaded { .. }) => {
                HeadlessEvent::lessons_loaded(engine.lessons()).emit();
            }
            Ok(EngineEvent::LessonsChanged { count, revision }) => {
                HeadlessEvent::lessons_changed(count, revision).emit();
            }
            Ok(EngineEvent::Shutdown) => {}
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Headless event stream lagged by {} events", n);
            }
            Err(_) => break,
        }
    }

    let state = engine.state();
    let pending = state.pending_ids();
    for request_id in &pending {
        if announced.insert(*request_id) {
            if let Some(action) = state.pending_action(*request_id) {
                HeadlessEvent::request_issued(*request_id, &action.kind).emit();
            }
        }
    }
    announced.retain(|id| pending.contains(id));
}

/// Read JSON commands from stdin and forward them (blocking version)
fn spawn_stdin_reader_blocking(cmd_tx: mpsc::Sender<Command>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match Command::parse(trimmed) {
                    Ok(command) => {
                        let quit = command == Command::Quit;
                        if cmd_tx.blocking_send(command).is_err() || quit {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Invalid stdin command {:?}: {}", trimmed, e);
                        HeadlessEvent::error(format!("invalid command: {e}"), false).emit();
                    }
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
