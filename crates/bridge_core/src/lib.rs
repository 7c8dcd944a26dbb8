//! Backend bridge core: pure state machine and view-model helpers.
mod config;
mod effect;
mod endpoint;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use config::{
    validate_backend_url, BackendConfig, ConfigError, BACKEND_URL_STORAGE_KEY,
    DEFAULT_BACKEND_URL,
};
pub use effect::{DispatchRequest, Effect, RequestId};
pub use endpoint::{join_url, BridgeAction, HttpMethod};
pub use msg::Msg;
pub use outcome::{
    display_payload, format_json, response_message, response_timestamp, RequestOutcome,
};
pub use state::{AppState, Notice, NoticeSeverity};
pub use update::{update, INVALID_URL_NOTICE, URL_SAVED_NOTICE};
pub use view_model::{AppViewModel, ResultView, IDLE_PLACEHOLDER};
