use crate::Notice;

/// Text shown in the result region before anything has been sent.
pub const IDLE_PLACEHOLDER: &str = "Listening for response packet...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Idle,
    Loading,
    Error {
        message: String,
    },
    Success {
        /// Pretty-printed `data` field, or the whole response when absent.
        json: String,
        message: Option<String>,
        timestamp: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub active_url: String,
    pub draft_url: String,
    pub draft_pending: bool,
    pub payload: String,
    pub payload_editable: bool,
    pub actions_enabled: bool,
    pub reset_enabled: bool,
    pub loading: bool,
    pub result: ResultView,
    pub notice: Option<Notice>,
}
