use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the backend URL field.
    DraftUrlChanged(String),
    /// User clicked Connect to confirm the draft URL.
    ConnectClicked,
    /// User edited the payload text area.
    PayloadChanged(String),
    /// User clicked one of the three action buttons.
    ActionClicked(crate::BridgeAction),
    /// Engine finished a dispatch, successfully or not.
    DispatchCompleted {
        request_id: crate::RequestId,
        result: Result<Value, String>,
    },
    /// User clicked Reset on the result panel.
    ResetClicked,
    /// User closed the notice banner.
    NoticeDismissed,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
