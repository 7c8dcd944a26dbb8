use egui::Color32;

pub const WINDOW_TITLE: &str = "Backend Bridge";
pub const SUBTITLE: &str = "DYNAMIC CONNECTION HUB";

pub const URL_LABEL: &str = "TARGET ENDPOINT URL";
pub const URL_HINT: &str = "https://your-api.railway.app";
pub const CONNECT_LABEL: &str = "Connect";

pub const PAYLOAD_LABEL: &str = "MESSAGE PAYLOAD";
pub const PAYLOAD_HINT: &str = "Type content to send to your backend...";

pub const OUTPUT_LABEL: &str = "TELEMETRY OUTPUT";
pub const RESET_LABEL: &str = "Reset";
pub const DISMISS_LABEL: &str = "Dismiss";
pub const LOADING_TEXT: &str = "Awaiting response from backend...";
pub const ERROR_PREFIX: &str = "Connection Fault:";

pub const CONNECT_BUTTON_WIDTH: f32 = 88.0;
pub const PRIMARY_BUTTON_HEIGHT: f32 = 44.0;
pub const SECONDARY_BUTTON_HEIGHT: f32 = 34.0;
pub const PAYLOAD_ROWS: usize = 5;
pub const RESULT_MAX_HEIGHT: f32 = 240.0;
pub const SECTION_SPACING: f32 = 14.0;

pub const CONNECTED_COLOR: Color32 = Color32::from_rgb(16, 185, 129);
pub const PENDING_COLOR: Color32 = Color32::from_rgb(251, 191, 36);
pub const ERROR_FILL: Color32 = Color32::from_rgb(254, 242, 242);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);
pub const WARNING_FILL: Color32 = Color32::from_rgb(255, 251, 235);
pub const WARNING_TEXT: Color32 = Color32::from_rgb(180, 83, 9);
pub const INFO_FILL: Color32 = Color32::from_rgb(236, 253, 245);
pub const INFO_TEXT: Color32 = Color32::from_rgb(4, 120, 87);
pub const JSON_FILL: Color32 = Color32::from_rgb(15, 23, 42);
