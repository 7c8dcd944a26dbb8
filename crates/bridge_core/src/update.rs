use bridge_logging::{bridge_debug, bridge_info, bridge_warn};

use crate::{
    join_url, AppState, BridgeAction, DispatchRequest, Effect, Msg, Notice, RequestOutcome,
};

pub const URL_SAVED_NOTICE: &str = "Backend URL updated successfully!";
pub const INVALID_URL_NOTICE: &str = "Invalid URL format. Please include http:// or https://";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DraftUrlChanged(draft) => {
            state.config_mut().set_draft(draft);
            Vec::new()
        }
        Msg::ConnectClicked => confirm_backend_url(&mut state),
        Msg::PayloadChanged(payload) => {
            state.set_payload(payload);
            Vec::new()
        }
        Msg::ActionClicked(action) => start_action(&mut state, action),
        Msg::DispatchCompleted { request_id, result } => {
            if state.in_flight() != Some(request_id) {
                bridge_warn!(
                    "Ignoring completion for request {} (in flight: {:?})",
                    request_id,
                    state.in_flight()
                );
                return (state, Vec::new());
            }
            let outcome = match result {
                Ok(response) => RequestOutcome::Success(response),
                Err(message) => RequestOutcome::Failure(message),
            };
            state.finish_dispatch(outcome);
            Vec::new()
        }
        Msg::ResetClicked => {
            // The in-flight dispatch still owns the slot.
            if !state.is_busy() {
                state.reset_outcome();
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice().is_some() {
                state.set_notice(None);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn confirm_backend_url(state: &mut AppState) -> Vec<Effect> {
    let candidate = state.config().draft_url().to_string();
    let saved = state.config_mut().save(&candidate).map(ToOwned::to_owned);
    match saved {
        Ok(url) => {
            bridge_info!("Backend URL set to {}", url);
            state.set_notice(Some(Notice::info(URL_SAVED_NOTICE)));
            vec![Effect::PersistBackendUrl { url }]
        }
        Err(err) => {
            bridge_warn!("Rejected backend URL: {}", err);
            state.set_notice(Some(Notice::error(INVALID_URL_NOTICE)));
            Vec::new()
        }
    }
}

fn start_action(state: &mut AppState, action: BridgeAction) -> Vec<Effect> {
    if state.is_busy() {
        bridge_debug!("{:?} ignored: dispatch already in flight", action);
        return Vec::new();
    }
    if let Some(warning) = action.empty_payload_warning() {
        if state.payload().trim().is_empty() {
            state.set_notice(Some(Notice::warning(warning)));
            return Vec::new();
        }
    }

    let url = join_url(state.config().active_url(), action.path());
    let body = action.body(state.payload());
    state.set_notice(None);
    let request_id = state.begin_dispatch();
    bridge_info!(
        "Dispatch #{} {:?}: {} {}",
        request_id,
        action,
        action.method(),
        url
    );
    vec![Effect::Dispatch(DispatchRequest {
        request_id,
        url,
        method: action.method(),
        body,
    })]
}
