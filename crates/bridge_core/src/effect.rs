use serde_json::Value;

use crate::HttpMethod;

pub type RequestId = u64;

/// A fully resolved HTTP call ready for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub request_id: RequestId,
    pub url: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the confirmed backend URL to durable storage.
    PersistBackendUrl { url: String },
    Dispatch(DispatchRequest),
}
