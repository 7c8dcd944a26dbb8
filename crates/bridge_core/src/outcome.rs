use serde_json::Value;

/// Result slot for the most recent dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Failure(String),
}

impl RequestOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestOutcome::Loading)
    }
}

/// The part of a backend response worth showing: `data` when present, else everything.
pub fn display_payload(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if !data.is_null() => data,
        _ => response,
    }
}

/// Optional human-readable `message` field of a response.
pub fn response_message(response: &Value) -> Option<&str> {
    response
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

/// Optional `timestamp` field of a response.
pub fn response_timestamp(response: &Value) -> Option<&str> {
    response.get("timestamp").and_then(Value::as_str)
}

/// Pretty-prints JSON with two-space indentation.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
