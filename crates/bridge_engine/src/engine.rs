use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use bridge_logging::{bridge_error, bridge_info, bridge_warn};

use crate::dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
use crate::{DispatchCommand, DispatchError, EngineEvent, FailureKind};

enum EngineCommand {
    Dispatch {
        command: DispatchCommand,
        guard: InFlightGuard,
    },
}

/// Holds the engine's single in-flight slot; dropping it frees the slot.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Background dispatcher: one worker thread hosting a tokio runtime.
///
/// Accepts at most one dispatch at a time and reports results as
/// [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    in_flight: Arc<AtomicBool>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> Self {
        Self::with_dispatcher(Arc::new(ReqwestDispatcher::new(settings)))
    }

    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("bridge-engine".to_string())
            .spawn(move || run_worker(dispatcher, cmd_rx, event_tx));
        if let Err(err) = spawned {
            bridge_error!("Failed to spawn engine thread: {}", err);
        }

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queues a dispatch, or fails with [`FailureKind::Busy`] while one is in flight.
    pub fn submit(&self, command: DispatchCommand) -> Result<(), DispatchError> {
        let Some(guard) = InFlightGuard::acquire(&self.in_flight) else {
            bridge_warn!(
                "Rejected dispatch #{}: another request is in flight",
                command.request_id
            );
            return Err(DispatchError::new(
                FailureKind::Busy,
                "another request is in flight",
            ));
        };
        self.cmd_tx
            .send(EngineCommand::Dispatch { command, guard })
            .map_err(|_| DispatchError::new(FailureKind::Unavailable, "engine thread stopped"))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().ok()?;
        match rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                // Worker is gone; keep callers from spinning.
                thread::sleep(timeout);
                None
            }
        }
    }
}

fn run_worker(
    dispatcher: Arc<dyn Dispatcher>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => Some(runtime),
        Err(err) => {
            bridge_error!("Failed to start tokio runtime: {}", err);
            None
        }
    };

    while let Ok(command) = cmd_rx.recv() {
        match &runtime {
            Some(runtime) => {
                let dispatcher = dispatcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(dispatcher, command, event_tx).await;
                });
            }
            None => {
                let EngineCommand::Dispatch { command, guard } = command;
                drop(guard);
                let _ = event_tx.send(EngineEvent::DispatchCompleted {
                    request_id: command.request_id,
                    result: Err(DispatchError::new(
                        FailureKind::Unavailable,
                        "tokio runtime unavailable",
                    )),
                });
            }
        }
    }
}

async fn handle_command(
    dispatcher: Arc<dyn Dispatcher>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Dispatch { command, guard } => {
            let DispatchCommand {
                request_id,
                url,
                method,
                body,
            } = command;
            let _ = event_tx.send(EngineEvent::DispatchStarted { request_id });

            // Run in its own task so a panic still yields a completion.
            let task = tokio::spawn(async move {
                dispatcher.dispatch(&url, method, body.as_ref()).await
            });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(DispatchError::new(FailureKind::Unavailable, err.to_string())),
            };
            match &result {
                Ok(_) => bridge_info!("Dispatch #{} succeeded", request_id),
                Err(err) => bridge_warn!("Dispatch #{} failed: {}", request_id, err),
            }

            // Free the slot before reporting so the next submit is accepted.
            drop(guard);
            let _ = event_tx.send(EngineEvent::DispatchCompleted { request_id, result });
        }
    }
}
