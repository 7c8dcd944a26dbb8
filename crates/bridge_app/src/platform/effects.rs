use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use bridge_core::{DispatchRequest, Effect, HttpMethod, Msg, RequestId};
use bridge_engine::{
    DispatchCommand, DispatchError, DispatchSettings, EngineEvent, EngineHandle, Method,
};
use serde_json::Value;
use bridge_logging::{bridge_debug, bridge_error, bridge_info, bridge_warn};

use super::persistence::{save_backend_url, LocalStorage};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Executes core effects: dispatches go to the engine, saves go to storage.
pub struct EffectRunner {
    engine: EngineHandle,
    storage: LocalStorage,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        storage: LocalStorage,
        settings: DispatchSettings,
        msg_tx: mpsc::Sender<Msg>,
        repaint: egui::Context,
    ) -> Self {
        let engine = EngineHandle::new(settings);
        let runner = Self {
            engine,
            storage,
            msg_tx,
        };
        runner.spawn_event_loop(repaint);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PersistBackendUrl { url } => save_backend_url(&self.storage, &url),
                Effect::Dispatch(request) => self.dispatch(request),
            }
        }
    }

    fn dispatch(&self, request: DispatchRequest) {
        let request_id = request.request_id;
        bridge_info!(
            "Dispatch request_id={} method={} url={}",
            request_id,
            request.method,
            request.url
        );
        let command = DispatchCommand {
            request_id,
            url: request.url,
            method: map_method(request.method),
            body: request.body,
        };
        if let Err(err) = self.engine.submit(command) {
            // Resolve right away so the UI leaves the loading state.
            bridge_warn!("Dispatch {} not accepted: {}", request_id, err);
            let _ = self.msg_tx.send(completion_msg(request_id, Err(err)));
        }
    }

    fn spawn_event_loop(&self, repaint: egui::Context) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        let spawned = thread::Builder::new()
            .name("bridge-events".to_string())
            .spawn(move || loop {
                let Some(event) = engine.recv_timeout(EVENT_POLL_INTERVAL) else {
                    continue;
                };
                let Some(msg) = event_msg(event) else {
                    continue;
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
                repaint.request_repaint();
            });
        if let Err(err) = spawned {
            bridge_error!("Failed to spawn engine event thread: {}", err);
        }
    }
}

/// Engine events the UI cares about, as core messages.
fn event_msg(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::DispatchStarted { request_id } => {
            bridge_debug!("Dispatch {} started", request_id);
            None
        }
        EngineEvent::DispatchCompleted { request_id, result } => {
            Some(completion_msg(request_id, result))
        }
    }
}

fn completion_msg(request_id: RequestId, result: Result<Value, DispatchError>) -> Msg {
    Msg::DispatchCompleted {
        request_id,
        result: result.map_err(|err| err.user_message()),
    }
}

fn map_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Post => Method::POST,
    }
}
