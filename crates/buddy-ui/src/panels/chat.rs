//! Chat panel: displays the active session's messages and the input field.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use buddy_types::{message::Message, session::Session};
use crate::state::UiState;
use crate::theme::*;

/// Render the chat panel. Returns Some(message) when user submits input.
/// `busy` disables sending while any exchange is in flight.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    session: &Session,
    busy: bool,
) -> Option<String> {
    let mut submitted = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new("StudyBuddy Assistant")
                            .color(TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if busy {
                            WARNING
                        } else if state.last_failure.is_some() {
                            ERROR
                        } else {
                            SUCCESS
                        };
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(status_color)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &session.messages {
                            render_message(ui, message);
                            ui.add_space(4.0);
                        }

                        if state.is_waiting_in(&session.id) {
                            render_bubble(ui, "Thinking...", false);
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Ask for help or motivation...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(!busy, input);

                    let send_enabled = !state.input_text.trim().is_empty() && !busy;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(
                            RichText::new("Send").color(TEXT_PRIMARY),
                        )
                        .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if send_enabled && (enter || send_btn.clicked()) {
                        submitted = Some(std::mem::take(&mut state.input_text));
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    render_bubble(ui, &message.text, message.is_user());
}

/// User messages sit on the right in the accent colour
fn render_bubble(ui: &mut egui::Ui, text: &str, from_user: bool) {
    let (layout, fill) = if from_user {
        (Layout::right_to_left(Align::Min), ACCENT)
    } else {
        (Layout::left_to_right(Align::Min), BG_SECONDARY)
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(fill)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.label(RichText::new(text).color(TEXT_PRIMARY));
            });
    });
}
