use bridge_core::{
    AppViewModel, BridgeAction, Msg, Notice, NoticeSeverity, ResultView, IDLE_PLACEHOLDER,
};
use egui::{Align, Button, Color32, Frame, Layout, RichText, ScrollArea, TextEdit, TextStyle};

use super::constants::*;

/// Draws one frame from the view model and returns the user's actions as messages.
pub fn render(ctx: &egui::Context, view: &AppViewModel) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::bottom("session_root").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!("Session Root: {}", view.active_url))
                    .monospace()
                    .small()
                    .weak(),
            );
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().id_salt("panel").show(ui, |ui| {
            header(ui);
            ui.add_space(SECTION_SPACING);
            if let Some(notice) = &view.notice {
                notice_banner(ui, notice, &mut msgs);
                ui.add_space(SECTION_SPACING);
            }
            backend_section(ui, view, &mut msgs);
            ui.add_space(SECTION_SPACING);
            payload_section(ui, view, &mut msgs);
            ui.add_space(SECTION_SPACING);
            action_section(ui, view, &mut msgs);
            ui.add_space(SECTION_SPACING);
            result_section(ui, view, &mut msgs);
        });
    });

    msgs
}

fn header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.heading(RichText::new(WINDOW_TITLE).strong());
        ui.label(RichText::new(SUBTITLE).small().weak());
    });
}

fn notice_banner(ui: &mut egui::Ui, notice: &Notice, msgs: &mut Vec<Msg>) {
    let (fill, text) = match notice.severity {
        NoticeSeverity::Info => (INFO_FILL, INFO_TEXT),
        NoticeSeverity::Warning => (WARNING_FILL, WARNING_TEXT),
        NoticeSeverity::Error => (ERROR_FILL, ERROR_TEXT),
    };
    Frame::none()
        .fill(fill)
        .inner_margin(8.0)
        .rounding(6.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(text, notice.text.as_str());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button(DISMISS_LABEL).clicked() {
                        msgs.push(Msg::NoticeDismissed);
                    }
                });
            });
        });
}

fn backend_section(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            let indicator = if view.draft_pending {
                PENDING_COLOR
            } else {
                CONNECTED_COLOR
            };
            ui.colored_label(indicator, "●");
            ui.label(RichText::new(URL_LABEL).small().strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("Current: {}", view.active_url))
                        .monospace()
                        .small()
                        .weak(),
                );
            });
        });

        ui.horizontal(|ui| {
            let mut draft = view.draft_url.clone();
            let width = (ui.available_width() - CONNECT_BUTTON_WIDTH).max(120.0);
            let edit = ui.add(
                TextEdit::singleline(&mut draft)
                    .hint_text(URL_HINT)
                    .font(TextStyle::Monospace)
                    .desired_width(width),
            );
            let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if edit.changed() {
                msgs.push(Msg::DraftUrlChanged(draft));
            }
            let connect = ui.add(
                Button::new(CONNECT_LABEL).min_size(egui::vec2(CONNECT_BUTTON_WIDTH - 8.0, 0.0)),
            );
            if connect.clicked() || submitted {
                msgs.push(Msg::ConnectClicked);
            }
        });
    });
}

fn payload_section(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    ui.label(RichText::new(PAYLOAD_LABEL).small().strong());
    let mut payload = view.payload.clone();
    let edit = ui.add_enabled(
        view.payload_editable,
        TextEdit::multiline(&mut payload)
            .hint_text(PAYLOAD_HINT)
            .desired_rows(PAYLOAD_ROWS)
            .desired_width(f32::INFINITY),
    );
    if edit.changed() {
        msgs.push(Msg::PayloadChanged(payload));
    }
}

fn action_section(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        if view.loading {
            ui.spinner();
        }
        let size = egui::vec2(ui.available_width(), PRIMARY_BUTTON_HEIGHT);
        let send = ui.add_enabled(
            view.actions_enabled,
            Button::new(RichText::new(BridgeAction::Send.label()).strong()).min_size(size),
        );
        if send.clicked() {
            msgs.push(Msg::ActionClicked(BridgeAction::Send));
        }
    });

    ui.columns(2, |columns| {
        for (column, action) in columns
            .iter_mut()
            .zip([BridgeAction::Process, BridgeAction::Trigger])
        {
            let size = egui::vec2(column.available_width(), SECONDARY_BUTTON_HEIGHT);
            let button = column.add_enabled(
                view.actions_enabled,
                Button::new(action.label()).min_size(size),
            );
            if button.clicked() {
                msgs.push(Msg::ActionClicked(action));
            }
        }
    });
}

fn result_section(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(RichText::new(OUTPUT_LABEL).small().strong().weak());
        if view.reset_enabled {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button(RESET_LABEL).clicked() {
                    msgs.push(Msg::ResetClicked);
                }
            });
        }
    });
    ui.add_space(6.0);

    match &view.result {
        ResultView::Idle => {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(RichText::new(IDLE_PLACEHOLDER).italics().weak());
                ui.add_space(24.0);
            });
        }
        ResultView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(LOADING_TEXT).italics());
            });
        }
        ResultView::Error { message } => {
            Frame::none()
                .fill(ERROR_FILL)
                .inner_margin(12.0)
                .rounding(8.0)
                .show(ui, |ui| {
                    ui.colored_label(ERROR_TEXT, format!("{ERROR_PREFIX} {message}"));
                });
        }
        ResultView::Success {
            json,
            message,
            timestamp,
        } => {
            if let Some(timestamp) = timestamp {
                ui.label(RichText::new(format_timestamp(timestamp)).small().weak());
            }
            Frame::none()
                .fill(JSON_FILL)
                .inner_margin(12.0)
                .rounding(8.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("result_json")
                        .max_height(RESULT_MAX_HEIGHT)
                        .show(ui, |ui| {
                            let mut text = json.as_str();
                            ui.add(
                                TextEdit::multiline(&mut text)
                                    .code_editor()
                                    .text_color(Color32::from_rgb(165, 180, 252))
                                    .frame(false)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                });
            if let Some(message) = message {
                ui.add_space(6.0);
                ui.label(RichText::new(message).italics());
            }
        }
    }
}

/// Shows RFC 3339 timestamps as local wall-clock time; anything else verbatim.
fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
