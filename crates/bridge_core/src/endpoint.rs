use std::fmt;

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three fixed calls the panel can make against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeAction {
    /// Generic processing endpoint, sends the payload as `input`.
    Process,
    /// Workflow trigger, no body.
    Trigger,
    /// Message relay, sends the payload as `message`.
    Send,
}

impl BridgeAction {
    pub const ALL: [BridgeAction; 3] = [
        BridgeAction::Send,
        BridgeAction::Process,
        BridgeAction::Trigger,
    ];

    pub fn path(self) -> &'static str {
        match self {
            BridgeAction::Process => "/api/process",
            BridgeAction::Trigger => "/n8n/trigger",
            BridgeAction::Send => "/send",
        }
    }

    pub fn method(self) -> HttpMethod {
        HttpMethod::Post
    }

    pub fn label(self) -> &'static str {
        match self {
            BridgeAction::Process => "Process Logic",
            BridgeAction::Trigger => "n8n Workflow",
            BridgeAction::Send => "Transmit to Flask Proxy",
        }
    }

    /// Warning shown when the action needs a payload and none was typed.
    pub fn empty_payload_warning(self) -> Option<&'static str> {
        match self {
            BridgeAction::Process => Some("Please enter something first!"),
            BridgeAction::Send => Some("Please enter a message!"),
            BridgeAction::Trigger => None,
        }
    }

    /// JSON body for this action, or `None` when it is sent without one.
    pub fn body(self, payload: &str) -> Option<Value> {
        match self {
            BridgeAction::Process => Some(json!({ "input": payload })),
            BridgeAction::Send => Some(json!({ "message": payload })),
            BridgeAction::Trigger => None,
        }
    }
}

/// Joins a base URL and an endpoint path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_slash_placement() {
        assert_eq!(join_url("http://h/", "/p"), "http://h/p");
        assert_eq!(join_url("http://h", "p"), "http://h/p");
        assert_eq!(join_url("http://h", "/p"), "http://h/p");
        assert_eq!(join_url("http://h/", "p"), "http://h/p");
    }

    #[test]
    fn join_strips_only_one_trailing_slash() {
        assert_eq!(join_url("http://h/base//", "p"), "http://h/base//p");
    }

    #[test]
    fn join_keeps_base_path_prefix() {
        assert_eq!(
            join_url("https://api.example.com/v1/", "/api/process"),
            "https://api.example.com/v1/api/process"
        );
    }

    #[test]
    fn trigger_has_no_body() {
        assert_eq!(BridgeAction::Trigger.body("ignored"), None);
        assert_eq!(BridgeAction::Trigger.empty_payload_warning(), None);
    }

    #[test]
    fn payload_actions_wrap_text() {
        assert_eq!(
            BridgeAction::Process.body("hello"),
            Some(json!({ "input": "hello" }))
        );
        assert_eq!(
            BridgeAction::Send.body("hi"),
            Some(json!({ "message": "hi" }))
        );
    }
}
