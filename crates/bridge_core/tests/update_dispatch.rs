use std::sync::Once;

use bridge_core::{
    update, AppState, BackendConfig, BridgeAction, DispatchRequest, Effect, HttpMethod, Msg,
    NoticeSeverity, RequestOutcome, ResultView, IDLE_PLACEHOLDER,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bridge_logging::initialize_for_tests);
}

fn state_at(url: &str) -> AppState {
    AppState::with_config(BackendConfig::load(Some(url.to_string()), "http://fallback"))
}

fn with_payload(state: AppState, payload: &str) -> AppState {
    update(state, Msg::PayloadChanged(payload.to_string())).0
}

fn dispatched(effects: &[Effect]) -> &DispatchRequest {
    match effects {
        [Effect::Dispatch(request)] => request,
        other => panic!("expected one dispatch effect, got {other:?}"),
    }
}

#[test]
fn process_builds_request_and_renders_data_field() {
    init_logging();
    let state = with_payload(state_at("http://localhost:5000"), "hello");
    let (state, effects) = update(state, Msg::ActionClicked(BridgeAction::Process));

    let request = dispatched(&effects).clone();
    assert_eq!(request.url, "http://localhost:5000/api/process");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.body, Some(json!({ "input": "hello" })));
    assert!(state.view().loading);
    assert!(!state.view().actions_enabled);
    assert_eq!(state.view().result, ResultView::Loading);

    let (state, effects) = update(
        state,
        Msg::DispatchCompleted {
            request_id: request.request_id,
            result: Ok(json!({ "timestamp": "t", "data": { "ok": true } })),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.actions_enabled);
    assert!(!view.loading);
    assert_eq!(
        view.result,
        ResultView::Success {
            json: "{\n  \"ok\": true\n}".to_string(),
            message: None,
            timestamp: Some("t".to_string()),
        }
    );
}

#[test]
fn trigger_posts_without_body_even_when_payload_empty() {
    init_logging();
    let (_state, effects) = update(
        state_at("https://hooks.example/"),
        Msg::ActionClicked(BridgeAction::Trigger),
    );
    let request = dispatched(&effects);
    assert_eq!(request.url, "https://hooks.example/n8n/trigger");
    assert_eq!(request.body, None);
}

#[test]
fn send_wraps_payload_as_message() {
    init_logging();
    let state = with_payload(state_at("http://h"), "  ping  ");
    let (_state, effects) = update(state, Msg::ActionClicked(BridgeAction::Send));
    let request = dispatched(&effects);
    assert_eq!(request.url, "http://h/send");
    assert_eq!(request.body, Some(json!({ "message": "  ping  " })));
}

#[test]
fn blank_payload_blocks_process_and_send() {
    init_logging();
    for payload in ["", "   ", "\n\t"] {
        for action in [BridgeAction::Process, BridgeAction::Send] {
            let state = with_payload(state_at("http://h"), payload);
            let (state, effects) = update(state, Msg::ActionClicked(action));
            assert!(effects.is_empty());
            assert_eq!(state.outcome(), &RequestOutcome::Idle);
            assert!(!state.is_busy());
            let notice = state.notice().expect("warning");
            assert_eq!(notice.severity, NoticeSeverity::Warning);
        }
    }
}

#[test]
fn second_action_while_in_flight_is_rejected() {
    init_logging();
    let state = with_payload(state_at("http://h"), "x");
    let (state, first) = update(state, Msg::ActionClicked(BridgeAction::Process));
    assert_eq!(first.len(), 1);

    for action in BridgeAction::ALL {
        let (next, effects) = update(state.clone(), Msg::ActionClicked(action));
        assert!(effects.is_empty());
        assert_eq!(next.in_flight(), state.in_flight());
    }
}

#[test]
fn failure_reenables_actions() {
    init_logging();
    let (state, effects) = update(state_at("http://h"), Msg::ActionClicked(BridgeAction::Trigger));
    let request_id = dispatched(&effects).request_id;

    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            request_id,
            result: Err("Network error - ensure the backend URL is correct and CORS is enabled."
                .to_string()),
        },
    );
    let view = state.view();
    assert!(view.actions_enabled);
    assert!(!view.loading);
    assert!(view.reset_enabled);
    match view.result {
        ResultView::Error { message } => assert!(message.contains("CORS")),
        other => panic!("expected error view, got {other:?}"),
    }
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, effects) = update(state_at("http://h"), Msg::ActionClicked(BridgeAction::Trigger));
    let request_id = dispatched(&effects).request_id;

    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            request_id: request_id + 10,
            result: Ok(json!({})),
        },
    );
    assert!(state.is_busy());
    assert_eq!(state.outcome(), &RequestOutcome::Loading);
}

#[test]
fn request_ids_increase_per_dispatch() {
    init_logging();
    let (state, effects) = update(state_at("http://h"), Msg::ActionClicked(BridgeAction::Trigger));
    let first = dispatched(&effects).request_id;
    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            request_id: first,
            result: Ok(json!({ "ok": 1 })),
        },
    );
    let (_state, effects) = update(state, Msg::ActionClicked(BridgeAction::Trigger));
    assert!(dispatched(&effects).request_id > first);
}

#[test]
fn reset_returns_to_idle_and_keeps_backend() {
    init_logging();
    let (state, effects) = update(
        state_at("https://keep.example"),
        Msg::ActionClicked(BridgeAction::Trigger),
    );
    let request_id = dispatched(&effects).request_id;
    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            request_id,
            result: Ok(json!({ "message": "queued" })),
        },
    );
    assert!(state.view().reset_enabled);

    let (state, effects) = update(state, Msg::ResetClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().result, ResultView::Idle);
    assert!(!state.view().reset_enabled);
    assert_eq!(state.config().active_url(), "https://keep.example");
    assert!(!IDLE_PLACEHOLDER.is_empty());
}

#[test]
fn reset_is_ignored_while_loading() {
    init_logging();
    let (state, _) = update(state_at("http://h"), Msg::ActionClicked(BridgeAction::Trigger));
    let (state, _) = update(state, Msg::ResetClicked);
    assert_eq!(state.outcome(), &RequestOutcome::Loading);
}

#[test]
fn success_without_data_shows_whole_response_and_message() {
    init_logging();
    let (state, effects) = update(state_at("http://h"), Msg::ActionClicked(BridgeAction::Trigger));
    let request_id = dispatched(&effects).request_id;
    let (state, _) = update(
        state,
        Msg::DispatchCompleted {
            request_id,
            result: Ok(json!({ "message": "workflow started" })),
        },
    );
    assert_eq!(
        state.view().result,
        ResultView::Success {
            json: "{\n  \"message\": \"workflow started\"\n}".to_string(),
            message: Some("workflow started".to_string()),
            timestamp: None,
        }
    );
}

#[test]
fn payload_is_read_only_while_loading() {
    init_logging();
    let state = with_payload(state_at("http://h"), "x");
    assert!(state.view().payload_editable);
    let (state, _) = update(state, Msg::ActionClicked(BridgeAction::Send));
    assert!(!state.view().payload_editable);
}

#[test]
fn dispatch_clears_previous_notice() {
    init_logging();
    let state = state_at("http://h");
    let (state, _) = update(state, Msg::ActionClicked(BridgeAction::Send));
    assert!(state.notice().is_some());
    let (state, _) = update(state, Msg::ActionClicked(BridgeAction::Trigger));
    assert!(state.notice().is_none());
    assert!(state.is_busy());
}
