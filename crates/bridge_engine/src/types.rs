use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub type RequestId = u64;

/// Shown for every transport-class failure; the cause goes to the log.
pub const NETWORK_HINT: &str =
    "Network error - ensure the backend URL is correct and CORS is enabled.";
pub const INVALID_JSON_HINT: &str = "Invalid JSON response from backend.";

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchCommand {
    pub request_id: RequestId,
    pub url: String,
    pub method: reqwest::Method,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    DispatchStarted {
        request_id: RequestId,
    },
    DispatchCompleted {
        request_id: RequestId,
        result: Result<Value, DispatchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Text for the error panel.
    pub fn user_message(&self) -> String {
        match &self.kind {
            FailureKind::HttpStatus { code, reason } => {
                format!("Server error: {code} {reason}").trim_end().to_string()
            }
            FailureKind::InvalidJson => INVALID_JSON_HINT.to_string(),
            FailureKind::Busy => "A request is already in flight.".to_string(),
            FailureKind::InvalidUrl
            | FailureKind::Network
            | FailureKind::Timeout
            | FailureKind::TooLarge { .. }
            | FailureKind::Unavailable => NETWORK_HINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus { code: u16, reason: String },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidJson,
    Network,
    /// Another dispatch is still in flight.
    Busy,
    /// The engine runtime could not be started or the task died.
    Unavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus { code, .. } => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidJson => write!(f, "invalid json"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Busy => write!(f, "busy"),
            FailureKind::Unavailable => write!(f, "engine unavailable"),
        }
    }
}
