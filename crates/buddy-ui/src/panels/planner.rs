//! Planner page: dashboard, task list and important days.

use chrono::NaiveDate;
use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};

use buddy_core::mood::MoodSnapshot;
use buddy_core::planner::{CalendarStore, DashboardSummary, TaskStore};
use buddy_types::mood::Mood;
use buddy_types::planner::{ImportantDay, Task};
use crate::state::{TaskEdit, UiState};
use crate::theme::*;

/// Mutations requested from the planner page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerAction {
    AddTask {
        title: String,
        subject: String,
        due_date: String,
    },
    EditTask {
        id: u64,
        title: String,
        subject: String,
        due_date: String,
    },
    ToggleTask(u64),
    DeleteTask(u64),
    MarkDay {
        date: NaiveDate,
        title: String,
        description: Option<String>,
    },
    DeleteDay(String),
    PickMood(Mood),
    DismissMood,
}

impl TaskEdit {
    /// The edit action for this buffer, if every field is filled in
    pub fn submit(&self) -> Option<PlannerAction> {
        if !self.form.is_complete() {
            log::debug!("Task {} edit incomplete, not saving", self.id);
            return None;
        }
        Some(PlannerAction::EditTask {
            id: self.id,
            title: self.form.title.clone(),
            subject: self.form.subject.clone(),
            due_date: self.form.due_date.clone(),
        })
    }
}

pub fn planner_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    tasks: &TaskStore,
    calendar: &CalendarStore,
    mood: &MoodSnapshot,
    today: NaiveDate,
) -> Option<PlannerAction> {
    let mut action = None;
    let summary = DashboardSummary::build(tasks, calendar, today);

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    dashboard(ui, &summary);
                    ui.add_space(12.0);
                    if let Some(a) = mood_section(ui, mood) {
                        action = Some(a);
                    }
                    ui.add_space(12.0);
                    ui.separator();

                    if let Some(a) = task_section(ui, state, tasks) {
                        action = Some(a);
                    }

                    ui.add_space(12.0);
                    ui.separator();

                    if let Some(a) = calendar_section(ui, state, calendar, today) {
                        action = Some(a);
                    }
                });
        });

    action
}

fn dashboard(ui: &mut egui::Ui, summary: &DashboardSummary) {
    ui.heading(RichText::new("Dashboard").color(TEXT_PRIMARY).strong());

    let progress = summary.progress;
    ui.label(
        RichText::new(format!(
            "{} of {} tasks done",
            progress.completed, progress.total
        ))
        .color(TEXT_SECONDARY)
        .small(),
    );
    ui.add(
        egui::ProgressBar::new(progress.percent as f32 / 100.0)
            .fill(progress_color(progress.percent))
            .text(format!("{}%", progress.percent)),
    );

    ui.add_space(6.0);
    ui.columns(3, |cols| {
        cols[0].label(RichText::new("Upcoming").color(ACCENT_HOVER).strong());
        if summary.upcoming_events.is_empty() {
            cols[0].label(RichText::new("Nothing scheduled").color(TEXT_SECONDARY).small());
        }
        for day in &summary.upcoming_events {
            cols[0].label(
                RichText::new(format!("{}  {}", day.day(), day.title)).color(TEXT_PRIMARY),
            );
        }

        cols[1].label(RichText::new("Pending").color(ACCENT_HOVER).strong());
        for task in &summary.pending_tasks {
            cols[1].label(RichText::new(&task.title).color(TEXT_PRIMARY));
        }

        cols[2].label(RichText::new("Completed").color(ACCENT_HOVER).strong());
        for task in &summary.completed_tasks {
            cols[2].label(RichText::new(&task.title).color(TEXT_SECONDARY).strikethrough());
        }
    });
}

fn mood_section(ui: &mut egui::Ui, mood: &MoodSnapshot) -> Option<PlannerAction> {
    let mut action = None;

    ui.label(RichText::new("How are you feeling?").color(TEXT_PRIMARY).strong());
    ui.horizontal(|ui| {
        for m in Mood::ALL {
            let picked = mood.selected == Some(m);
            let btn = ui
                .selectable_label(picked, RichText::new(m.emoji()).size(22.0))
                .on_hover_text(m.label());
            if btn.clicked() {
                action = Some(PlannerAction::PickMood(m));
            }
        }
    });

    if mood.selected.is_some() || mood.loading {
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    match (&mood.message, mood.loading) {
                        (_, true) => {
                            ui.label(
                                RichText::new("Generating a message for you...")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }
                        (Some(text), false) => {
                            let color = if mood.failure.is_some() { WARNING } else { TEXT_PRIMARY };
                            ui.label(RichText::new(text).color(color));
                        }
                        (None, false) => {}
                    }
                    ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                        if ui.small_button("x").on_hover_text("Dismiss").clicked() {
                            action = Some(PlannerAction::DismissMood);
                        }
                    });
                });
            });
    }

    action
}

fn task_section(ui: &mut egui::Ui, state: &mut UiState, tasks: &TaskStore) -> Option<PlannerAction> {
    let mut action = None;

    ui.heading(RichText::new("Tasks").color(TEXT_PRIMARY).strong());

    ui.horizontal(|ui| {
        let form = &mut state.task_form;
        ui.add(
            egui::TextEdit::singleline(&mut form.title)
                .hint_text("Task")
                .desired_width(160.0),
        );
        ui.add(
            egui::TextEdit::singleline(&mut form.subject)
                .hint_text("Subject")
                .desired_width(110.0),
        );
        ui.add(
            egui::TextEdit::singleline(&mut form.due_date)
                .hint_text("Due date")
                .desired_width(100.0),
        );
        if ui
            .add_enabled(form.is_complete(), egui::Button::new("Add").fill(ACCENT))
            .clicked()
        {
            action = Some(PlannerAction::AddTask {
                title: form.title.clone(),
                subject: form.subject.clone(),
                due_date: form.due_date.clone(),
            });
            form.clear();
        }
    });

    ui.add(
        egui::TextEdit::singleline(&mut state.task_search)
            .hint_text("Search tasks...")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(4.0);

    let matches = tasks.search(&state.task_search);
    if matches.is_empty() {
        ui.label(RichText::new("No tasks found").color(TEXT_SECONDARY).italics());
    }
    for task in matches {
        let editing = state.task_edit.as_ref().is_some_and(|e| e.id == task.id);
        let row = if editing {
            task_edit_row(ui, &mut state.task_edit)
        } else {
            task_row(ui, task, &mut state.task_edit)
        };
        if let Some(a) = row {
            action = Some(a);
        }
    }

    action
}

fn task_row(ui: &mut egui::Ui, task: &Task, edit: &mut Option<TaskEdit>) -> Option<PlannerAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        let mut done = task.completed;
        if ui.checkbox(&mut done, "").changed() {
            action = Some(PlannerAction::ToggleTask(task.id));
        }
        let title = RichText::new(&task.title).color(TEXT_PRIMARY);
        ui.label(if task.completed { title.strikethrough() } else { title });
        ui.label(
            RichText::new(format!("{} · due {}", task.subject, task.due_date))
                .color(TEXT_SECONDARY)
                .small(),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.small_button("Delete").clicked() {
                action = Some(PlannerAction::DeleteTask(task.id));
            }
            if ui.small_button("Edit").clicked() {
                *edit = Some(TaskEdit::of(task));
            }
        });
    });
    action
}

/// Inline form replacing the row of the task being edited
fn task_edit_row(ui: &mut egui::Ui, edit: &mut Option<TaskEdit>) -> Option<PlannerAction> {
    let mut action = None;
    let mut close = false;
    let Some(buffer) = edit.as_mut() else {
        return None;
    };

    ui.horizontal(|ui| {
        ui.add(egui::TextEdit::singleline(&mut buffer.form.title).desired_width(160.0));
        ui.add(egui::TextEdit::singleline(&mut buffer.form.subject).desired_width(110.0));
        ui.add(egui::TextEdit::singleline(&mut buffer.form.due_date).desired_width(100.0));

        let save = ui.add_enabled(
            buffer.form.is_complete(),
            egui::Button::new("Save").fill(ACCENT),
        );
        if save.clicked() {
            action = buffer.submit();
            close = action.is_some();
        }
        if ui.small_button("Cancel").clicked() {
            close = true;
        }
    });

    if close {
        *edit = None;
    }
    action
}

fn calendar_section(
    ui: &mut egui::Ui,
    state: &mut UiState,
    calendar: &CalendarStore,
    today: NaiveDate,
) -> Option<PlannerAction> {
    let mut action = None;

    ui.heading(RichText::new("Important Days").color(TEXT_PRIMARY).strong());

    let form = &mut state.day_form;
    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut form.date)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0),
        );
        ui.add(
            egui::TextEdit::singleline(&mut form.title)
                .hint_text("Event")
                .desired_width(160.0),
        );
    });
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .hint_text("Description (optional)")
            .desired_rows(2)
            .desired_width(f32::INFINITY),
    );

    let date = form.parsed_date();
    let in_past = date.is_some_and(|d| d < today);
    if let Some(existing) = date.and_then(|d| calendar.get_by_date(d)) {
        ui.label(
            RichText::new(format!("Replaces \"{}\"", existing.title))
                .color(WARNING)
                .small(),
        );
    }
    if in_past {
        ui.label(RichText::new("Past dates cannot be marked").color(ERROR).small());
    }

    let can_mark = date.is_some() && !in_past && !form.title.trim().is_empty();
    let mark = ui.add_enabled(
        can_mark,
        egui::Button::new(RichText::new("Mark Day").color(TEXT_PRIMARY))
            .fill(ACCENT)
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(90.0, 24.0)),
    );
    if mark.clicked() {
        if let Some(date) = date {
            action = Some(PlannerAction::MarkDay {
                date,
                title: form.title.trim().to_string(),
                description: form.description(),
            });
            form.clear();
        }
    }

    ui.add_space(6.0);
    for day in calendar.upcoming(today) {
        if let Some(a) = day_row(ui, day) {
            action = Some(a);
        }
    }

    action
}

fn day_row(ui: &mut egui::Ui, day: &ImportantDay) -> Option<PlannerAction> {
    let mut action = None;
    egui::Frame::default()
        .fill(BG_SECONDARY)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(6.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(day.day().to_string()).color(ACCENT_HOVER).strong());
                ui.label(RichText::new(&day.title).color(TEXT_PRIMARY));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button("Remove").clicked() {
                        action = Some(PlannerAction::DeleteDay(day.id.clone()));
                    }
                });
            });
            if let Some(desc) = &day.description {
                ui.label(RichText::new(desc).color(TEXT_SECONDARY).small());
            }
        });
    action
}
