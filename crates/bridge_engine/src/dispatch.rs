use std::time::Duration;

use bridge_logging::{bridge_debug, bridge_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{DispatchError, FailureKind};

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub connect_timeout: Duration,
    /// Overall request deadline; `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        url: &str,
        method: reqwest::Method,
        body: Option<&Value>,
    ) -> Result<Value, DispatchError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestDispatcher {
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DispatchError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| DispatchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> DispatchError {
        DispatchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(
        &self,
        url: &str,
        method: reqwest::Method,
        body: Option<&Value>,
    ) -> Result<Value, DispatchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| DispatchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let mut request = client
            .request(method, parsed)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body)
                .map_err(|err| DispatchError::new(FailureKind::InvalidJson, err.to_string()))?;
            request = request.body(encoded);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::new(
                FailureKind::HttpStatus {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                },
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        bridge_debug!("{} answered {} ({} bytes)", url, status, bytes.len());

        serde_json::from_slice(&bytes).map_err(|err| {
            bridge_warn!("Response from {} is not JSON: {}", url, err);
            DispatchError::new(FailureKind::InvalidJson, err.to_string())
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        return DispatchError::new(FailureKind::Timeout, err.to_string());
    }
    DispatchError::new(FailureKind::Network, err.to_string())
}
