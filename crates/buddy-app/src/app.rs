//! Main egui application: composes all panels and drives the chat controller.

use std::rc::Rc;

use chrono::{Local, NaiveDate};
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use buddy_core::config_store::ConfigStore;
use buddy_core::controller::{ChatController, SendOutcome};
use buddy_core::event_bus::EventBus;
use buddy_core::exchange::MessageExchange;
use buddy_core::mood::{MoodLogger, MoodOutcome};
use buddy_core::planner::{CalendarStore, TaskStore};
use buddy_core::ports::{Clock, SystemClock};
use buddy_core::session_store::SessionStore;
use buddy_platform::llm::GeminiProvider;
use buddy_platform::storage::auto_detect_storage;
use buddy_types::config::AssistantConfig;
use buddy_types::mood::Mood;
use buddy_ui::panels::{chat, planner, sessions, settings};
use buddy_ui::panels::planner::PlannerAction;
use buddy_ui::panels::sessions::SessionAction;
use buddy_ui::panels::settings::{SaveFeedback, SettingsAction};
use buddy_ui::state::{Page, UiState};
use buddy_ui::theme;

/// The main application state
pub struct BuddyApp {
    ui_state: UiState,
    /// Settings being edited; applied to the controller on save
    config: AssistantConfig,
    save_feedback: Option<SaveFeedback>,
    event_bus: EventBus,
    controller: Rc<ChatController>,
    mood: Rc<MoodLogger>,
    tasks: TaskStore,
    calendar: CalendarStore,
    config_store: ConfigStore,
    today: NaiveDate,
    first_frame: bool,
}

impl BuddyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let storage = auto_detect_storage();
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        let config_store = ConfigStore::new(storage.clone());
        let config = config_store.load();
        let event_bus = EventBus::new();

        let exchange = MessageExchange::new(Rc::new(GeminiProvider::new(&config)), config.clone());
        let controller = ChatController::new(
            SessionStore::new(storage.clone(), clock.clone()),
            exchange,
            clock.clone(),
            event_bus.clone(),
        );

        let today = Local::now().date_naive();
        let mood = MoodLogger::new(clock.clone());
        let tasks = TaskStore::load(storage.clone(), clock);
        let mut calendar = CalendarStore::load(storage.clone());
        calendar.prune_past(today);

        Self {
            ui_state: UiState::new(),
            config,
            save_feedback: None,
            event_bus,
            controller: Rc::new(controller),
            mood: Rc::new(mood),
            tasks,
            calendar,
            config_store,
            today,
            first_frame: true,
        }
    }

    /// Point the controller at the edited settings
    fn apply_config(&self) {
        self.controller
            .set_completion(Rc::new(GeminiProvider::new(&self.config)));
        self.controller.set_config(self.config.clone());
    }

    fn save_config(&mut self) {
        self.apply_config();
        let saved = self.config_store.save(&self.config);
        self.save_feedback = Some(match saved {
            Ok(()) => {
                log::info!("Config saved");
                SaveFeedback::ok("Saved")
            }
            Err(e) => {
                log::error!("Failed to save config: {}", e);
                SaveFeedback::failed("Applied, but not saved")
            }
        });
    }

    fn reset_config(&mut self) {
        self.save_feedback = Some(match self.config_store.reset() {
            Ok(defaults) => {
                self.config = defaults;
                SaveFeedback::ok("Defaults restored")
            }
            Err(e) => {
                log::error!("Failed to reset config: {}", e);
                self.config = AssistantConfig::default();
                SaveFeedback::failed("Defaults applied, old settings still stored")
            }
        });
        self.apply_config();
    }

    /// Drop past important days once the local date rolls over
    fn roll_date(&mut self) {
        let today = Local::now().date_naive();
        if today != self.today {
            self.today = today;
            self.calendar.prune_past(today);
        }
    }
}

impl eframe::App for BuddyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        self.roll_date();

        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        let busy = self.controller.is_busy();
        if busy || self.mood.is_loading() {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("StudyBuddy")
                        .strong()
                        .color(theme::ACCENT_HOVER)
                        .size(16.0),
                );
                ui.separator();
                ui.selectable_value(&mut self.ui_state.page, Page::Chat, "Chat");
                ui.selectable_value(&mut self.ui_state.page, Page::Planner, "Planner");
                ui.separator();
                ui.label(
                    RichText::new(format!("Model: {}", self.controller.config().model))
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    match settings::settings_panel(ui, &mut self.config, self.save_feedback.as_ref()) {
                        SettingsAction::SaveClicked => self.save_config(),
                        SettingsAction::ResetClicked => self.reset_config(),
                        SettingsAction::Changed => self.save_feedback = None,
                        SettingsAction::None => {}
                    }
                });
        }

        match self.ui_state.page {
            Page::Chat => self.chat_page(ctx, busy),
            Page::Planner => self.planner_page(ctx),
        }
    }
}

impl BuddyApp {
    fn chat_page(&mut self, ctx: &egui::Context, busy: bool) {
        let summaries = self.controller.summaries();
        let active_id = self.controller.active_session_id();

        SidePanel::left("session_panel")
            .min_width(180.0)
            .max_width(260.0)
            .show(ctx, |ui| {
                match sessions::session_sidebar(ui, &summaries, &active_id) {
                    Some(SessionAction::New) => {
                        self.controller.new_session();
                    }
                    Some(SessionAction::Select(id)) => {
                        self.controller.select_session(&id);
                    }
                    Some(SessionAction::Delete(id)) => {
                        self.controller.delete_session(&id);
                    }
                    None => {}
                }
            });

        let session = self.controller.active_session();
        CentralPanel::default().show(ctx, |ui| {
            if let Some(text) = chat::chat_panel(ui, &mut self.ui_state, &session, busy) {
                self.dispatch_message(text, ctx);
            }
        });
    }

    fn planner_page(&mut self, ctx: &egui::Context) {
        let today = self.today;
        let mood = self.mood.snapshot();
        CentralPanel::default().show(ctx, |ui| {
            let action = planner::planner_panel(
                ui,
                &mut self.ui_state,
                &self.tasks,
                &self.calendar,
                &mood,
                today,
            );
            if let Some(action) = action {
                self.apply_planner(action, today, ctx);
            }
        });
    }

    fn apply_planner(&mut self, action: PlannerAction, today: NaiveDate, ctx: &egui::Context) {
        match action {
            PlannerAction::AddTask {
                title,
                subject,
                due_date,
            } => {
                if self.tasks.add(&title, &subject, &due_date).is_none() {
                    log::debug!("Task rejected: missing fields");
                }
            }
            PlannerAction::EditTask {
                id,
                title,
                subject,
                due_date,
            } => {
                if !self.tasks.edit(id, &title, &subject, &due_date) {
                    log::debug!("Edit of task {} rejected", id);
                }
            }
            PlannerAction::ToggleTask(id) => {
                self.tasks.toggle(id);
            }
            PlannerAction::DeleteTask(id) => {
                self.tasks.delete(id);
            }
            PlannerAction::MarkDay {
                date,
                title,
                description,
            } => {
                if self.calendar.mark(date, today, &title, description).is_none() {
                    log::debug!("Cannot mark {}", date);
                }
            }
            PlannerAction::DeleteDay(id) => {
                self.calendar.delete(&id);
            }
            PlannerAction::PickMood(mood) => self.dispatch_mood(mood, ctx),
            PlannerAction::DismissMood => self.mood.dismiss(),
        }
    }

    /// Ask for a message matching the picked mood (async)
    fn dispatch_mood(&self, mood: Mood, ctx: &egui::Context) {
        let logger = self.mood.clone();
        let exchange = self.controller.exchange();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match logger.pick(mood, &exchange).await {
                MoodOutcome::Delivered { failure: Some(f) } => {
                    log::warn!("Mood message for {} failed: {}", mood.label(), f.label());
                }
                MoodOutcome::Delivered { failure: None } => {}
                other => log::debug!("Mood pick not shown: {:?}", other),
            }
            ctx.request_repaint();
        });
    }

    /// Run one exchange on the controller (async)
    fn dispatch_message(&self, text: String, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match controller.send_message(&text).await {
                SendOutcome::Sent { failure: Some(f) } => {
                    log::warn!("Exchange finished with {}", f.label());
                }
                SendOutcome::Sent { failure: None } => {}
                other => log::debug!("Send not completed: {:?}", other),
            }
            ctx.request_repaint();
        });
    }
}
