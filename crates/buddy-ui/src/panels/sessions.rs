//! Session sidebar: list of chats with new/select/delete controls.

use egui::{self, RichText, ScrollArea, Vec2};
use buddy_types::session::SessionSummary;
use crate::theme::*;

/// What the user asked for in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    New,
    Select(String),
    Delete(String),
}

/// Render the session list. Delete buttons only show while more than one
/// session exists.
pub fn session_sidebar(
    ui: &mut egui::Ui,
    sessions: &[SessionSummary],
    active_id: &str,
) -> Option<SessionAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            let new_btn = ui.add(
                egui::Button::new(RichText::new("+ New Chat").color(TEXT_PRIMARY))
                    .fill(BG_SURFACE)
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(ui.available_width(), 28.0)),
            );
            if new_btn.clicked() {
                action = Some(SessionAction::New);
            }

            ui.separator();

            let can_delete = sessions.len() > 1;
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for session in sessions {
                        let selected = session.id == active_id;
                        ui.horizontal(|ui| {
                            let label = ui.selectable_label(
                                selected,
                                RichText::new(&session.title).color(TEXT_PRIMARY),
                            );
                            if label.clicked() && !selected {
                                action = Some(SessionAction::Select(session.id.clone()));
                            }

                            if can_delete {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let del = ui.small_button(
                                            RichText::new("x").color(TEXT_SECONDARY),
                                        );
                                        if del.on_hover_text("Delete chat").clicked() {
                                            action = Some(SessionAction::Delete(session.id.clone()));
                                        }
                                    },
                                );
                            }
                        });
                    }
                });
        });

    action
}
