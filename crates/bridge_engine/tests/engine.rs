use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bridge_engine::{
    DispatchCommand, DispatchError, DispatchSettings, Dispatcher, EngineEvent, EngineHandle,
    FailureKind, Method, NETWORK_HINT,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    bridge_logging::initialize_for_tests();
}

fn command(request_id: u64, url: String) -> DispatchCommand {
    DispatchCommand {
        request_id,
        url,
        method: Method::POST,
        body: None,
    }
}

fn wait_for_completion(
    engine: &EngineHandle,
    request_id: u64,
) -> Result<Value, bridge_engine::DispatchError> {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Some(EngineEvent::DispatchCompleted {
            request_id: done,
            result,
        }) = engine.recv_timeout(Duration::from_millis(50))
        {
            if done == request_id {
                return result;
            }
        }
    }
    panic!("dispatch #{request_id} did not complete");
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_completion() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/n8n/trigger"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [1, 2] })))
        .mount(&server)
        .await;

    let engine = EngineHandle::new(DispatchSettings::default());
    engine
        .submit(command(1, format!("{}/n8n/trigger", server.uri())))
        .expect("accepted");

    let result = tokio::task::block_in_place(|| wait_for_completion(&engine, 1));
    assert_eq!(result, Ok(json!({ "data": [1, 2] })));
    assert!(!engine.is_busy());
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_rejects_overlapping_dispatch() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({ "ok": true })),
        )
        .mount(&server)
        .await;

    let engine = EngineHandle::new(DispatchSettings::default());
    let url = format!("{}/slow", server.uri());
    engine.submit(command(1, url.clone())).expect("first accepted");
    assert!(engine.is_busy());

    let err = engine.submit(command(2, url.clone())).unwrap_err();
    assert_eq!(err.kind, FailureKind::Busy);

    let result = tokio::task::block_in_place(|| wait_for_completion(&engine, 1));
    assert_eq!(result, Ok(json!({ "ok": true })));

    engine.submit(command(3, url)).expect("accepted after completion");
    let result = tokio::task::block_in_place(|| wait_for_completion(&engine, 3));
    assert!(result.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_dispatch_frees_the_slot() {
    init_logging();
    let server = MockServer::start().await;

    let engine = EngineHandle::new(DispatchSettings::default());
    engine
        .submit(command(7, format!("{}/nowhere", server.uri())))
        .expect("accepted");
    let err = tokio::task::block_in_place(|| wait_for_completion(&engine, 7)).unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 404,
            reason: "Not Found".to_string()
        }
    );
    assert!(!engine.is_busy());
}

/// Panics on the first call, answers `{"call": n}` afterwards.
#[derive(Default)]
struct PanicsOnce {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Dispatcher for PanicsOnce {
    async fn dispatch(
        &self,
        _url: &str,
        _method: Method,
        _body: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            panic!("dispatcher blew up");
        }
        Ok(json!({ "call": call }))
    }
}

#[test]
fn panicking_dispatch_still_completes_and_frees_the_slot() {
    init_logging();
    let engine = EngineHandle::with_dispatcher(Arc::new(PanicsOnce::default()));

    engine
        .submit(command(1, "http://unused.invalid/send".to_string()))
        .expect("accepted");
    let err = wait_for_completion(&engine, 1).unwrap_err();
    assert_eq!(err.kind, FailureKind::Unavailable);
    assert_eq!(err.user_message(), NETWORK_HINT);
    assert!(!engine.is_busy());

    engine
        .submit(command(2, "http://unused.invalid/send".to_string()))
        .expect("accepted after panic");
    let result = wait_for_completion(&engine, 2);
    assert_eq!(result, Ok(json!({ "call": 1 })));
}
