use crate::view_model::{AppViewModel, ResultView};
use crate::{
    display_payload, format_json, response_message, response_timestamp, BackendConfig,
    RequestId, RequestOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// Inline acknowledgment shown to the user until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    config: BackendConfig,
    payload: String,
    outcome: RequestOutcome,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BackendConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn outcome(&self) -> &RequestOutcome {
        &self.outcome
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True while a dispatch is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.is_busy();
        AppViewModel {
            active_url: self.config.active_url().to_string(),
            draft_url: self.config.draft_url().to_string(),
            draft_pending: self.config.is_draft_pending(),
            payload: self.payload.clone(),
            payload_editable: !loading,
            actions_enabled: !loading,
            reset_enabled: matches!(
                self.outcome,
                RequestOutcome::Success(_) | RequestOutcome::Failure(_)
            ),
            loading,
            result: result_view(&self.outcome),
            notice: self.notice.clone(),
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn config_mut(&mut self) -> &mut BackendConfig {
        self.dirty = true;
        &mut self.config
    }

    pub(crate) fn set_payload(&mut self, payload: String) {
        self.payload = payload;
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Option<Notice>) {
        self.notice = notice;
        self.dirty = true;
    }

    /// Moves the outcome to `Loading` and hands out the id for the new dispatch.
    pub(crate) fn begin_dispatch(&mut self) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(request_id);
        self.outcome = RequestOutcome::Loading;
        self.dirty = true;
        request_id
    }

    pub(crate) fn finish_dispatch(&mut self, outcome: RequestOutcome) {
        self.in_flight = None;
        self.outcome = outcome;
        self.dirty = true;
    }

    pub(crate) fn reset_outcome(&mut self) {
        self.outcome = RequestOutcome::Idle;
        self.dirty = true;
    }
}

fn result_view(outcome: &RequestOutcome) -> ResultView {
    match outcome {
        RequestOutcome::Idle => ResultView::Idle,
        RequestOutcome::Loading => ResultView::Loading,
        RequestOutcome::Failure(message) => ResultView::Error {
            message: message.clone(),
        },
        RequestOutcome::Success(response) => ResultView::Success {
            json: format_json(display_payload(response)),
            message: response_message(response).map(ToOwned::to_owned),
            timestamp: response_timestamp(response).map(ToOwned::to_owned),
        },
    }
}
