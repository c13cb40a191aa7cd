use std::time::Duration;

use client_core::{
    render::{render, render_statistics, Action, ViewNode},
    TrackerState,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

pub struct TrackerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: TrackerState,
    status: String,
    in_flight: bool,
    statistics: Option<Vec<String>>,
    statistics_pending: bool,
}

impl TrackerApp {
    /// Queues the initial load right away.
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: TrackerState::default(),
            status: String::new(),
            in_flight: false,
            statistics: None,
            statistics_pending: false,
        };
        app.load();
        app
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn load(&mut self) {
        self.request_snapshot(BackendCommand::Load);
    }

    pub fn submit(&mut self) {
        let request = self.state.session_log_request();
        self.request_snapshot(BackendCommand::Submit(request));
    }

    pub fn refresh_statistics(&mut self) {
        if self.statistics_pending {
            return;
        }
        self.statistics_pending = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchStatistics,
            &mut self.status,
        );
    }

    fn request_snapshot(&mut self, cmd: BackendCommand) {
        // One tracker request at a time.
        if self.in_flight {
            return;
        }
        if dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.in_flight = true;
        } else {
            self.state.apply_failure();
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Fetched(outcome) => {
                self.in_flight = false;
                match &outcome {
                    Ok(_) => self.status.clear(),
                    Err(err) => self.status = err.clone(),
                }
                self.state.apply_outcome(outcome);
            }
            UiEvent::StatisticsLoaded(stats) => {
                self.statistics_pending = false;
                self.statistics = Some(render_statistics(&stats));
            }
            UiEvent::StatisticsFailed(err) => {
                self.statistics_pending = false;
                tracing::warn!("statistics request failed: {err}");
                self.status = format!("Statistics unavailable: {err}");
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn show_tracker(&mut self, ui: &mut egui::Ui) {
        for node in render(&self.state).nodes {
            match node {
                ViewNode::Text(text) => {
                    ui.label(text);
                }
                ViewNode::DateInput { mut value, .. } => {
                    ui.horizontal(|ui| {
                        ui.label("Date");
                        let edit = egui::TextEdit::singleline(&mut value).hint_text("YYYY-MM-DD");
                        if ui.add(edit).changed() {
                            self.state.set_date(value.clone());
                        }
                        if ui.button("Today").clicked() {
                            self.state.set_date(
                                chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
                            );
                        }
                    });
                }
                ViewNode::SessionSelect { value, options, .. } => {
                    let selected_label = options
                        .iter()
                        .find(|opt| opt.value == value)
                        .map(|opt| opt.label.clone())
                        .unwrap_or_else(|| value.clone());
                    egui::ComboBox::from_label("Session")
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for opt in &options {
                                if ui
                                    .selectable_label(value == opt.value, opt.label.as_str())
                                    .clicked()
                                {
                                    self.state.set_session(opt.value);
                                }
                            }
                        });
                }
                ViewNode::Button { label, action } => {
                    let clicked = ui
                        .add_enabled(!self.in_flight, egui::Button::new(label))
                        .clicked();
                    if clicked {
                        match action {
                            Action::Submit => self.submit(),
                        }
                    }
                }
            }
        }
    }

    fn show_statistics(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Statistics").show(ui, |ui| {
            let refresh = ui.add_enabled(
                !self.statistics_pending,
                egui::Button::new("Refresh statistics"),
            );
            if refresh.clicked() {
                self.refresh_statistics();
            }
            match &self.statistics {
                Some(lines) => {
                    for line in lines {
                        ui.label(line.as_str());
                    }
                }
                None => {
                    ui.weak("Not loaded yet");
                }
            }
        });
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Session Streak");
            ui.add_space(8.0);
            self.show_tracker(ui);
            if self.state.has_error() {
                let retry = ui.add_enabled(!self.in_flight, egui::Button::new("Retry"));
                if retry.clicked() {
                    self.load();
                }
            }
            ui.separator();
            self.show_statistics(ui);
            if !self.status.is_empty() {
                ui.separator();
                ui.small(self.status.as_str());
            }
        });

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::TrackerApp;
    use crate::backend_bridge::commands::BackendCommand;
    use crate::controller::events::UiEvent;
    use client_core::FETCH_ERROR_MESSAGE;
    use crossbeam_channel::{bounded, Receiver, Sender};
    use shared::protocol::{SessionLogRequest, StatisticsResponse, TimeResponse};

    fn app() -> (TrackerApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        (TrackerApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn snapshot(streak: u64) -> TimeResponse {
        TimeResponse {
            current_time: "2023-10-03T10:00:00+00:00".into(),
            streak,
            total_points: streak * 12,
        }
    }

    #[test]
    fn queues_initial_load() {
        let (_app, cmd_rx, _ui_tx) = app();
        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::Load));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn submit_waits_for_outstanding_request() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.submit();
        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::Load));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn submit_sends_current_selection_after_load() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let _ = cmd_rx.try_recv();
        app.handle_event(UiEvent::Fetched(Ok(snapshot(2))));

        app.state.set_date("2023-10-04");
        app.state.set_session("3-hours");
        app.submit();

        assert_eq!(
            cmd_rx.try_recv().ok(),
            Some(BackendCommand::Submit(SessionLogRequest {
                date: "2023-10-04".into(),
                session_type: "3-hours".into(),
            }))
        );
    }

    #[test]
    fn fetched_events_drive_the_tracker_state() {
        let (mut app, _cmd_rx, _ui_tx) = app();
        app.handle_event(UiEvent::Fetched(Ok(snapshot(3))));
        assert_eq!(app.state().streak, 3);
        assert_eq!(app.state().total_points, 36);

        app.handle_event(UiEvent::Fetched(Err("connection refused".into())));
        assert_eq!(app.state().current_time, FETCH_ERROR_MESSAGE);
        assert_eq!(app.state().streak, 3);
        assert!(!app.in_flight);
    }

    #[test]
    fn successful_reply_clears_stale_error_status() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let _ = cmd_rx.try_recv();
        app.handle_event(UiEvent::Fetched(Err("request to /api/time failed".into())));
        assert_eq!(app.status, "request to /api/time failed");
        assert!(app.state().has_error());

        app.load();
        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::Load));
        app.handle_event(UiEvent::Fetched(Ok(snapshot(2))));

        assert!(app.status.is_empty());
        assert!(!app.state().has_error());
        assert_eq!(app.state().streak, 2);
    }

    #[test]
    fn queued_events_are_drained_each_frame() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Info("Backend: http://127.0.0.1:8080/".into()))
            .expect("send");
        ui_tx
            .send(UiEvent::Fetched(Ok(snapshot(1))))
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.state().streak, 1);
        assert_eq!(app.status, "Backend: http://127.0.0.1:8080/");
    }

    #[test]
    fn disconnected_worker_shows_error_string() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        drop(cmd_rx);
        let app = TrackerApp::new(cmd_tx, ui_rx);
        assert_eq!(app.state().current_time, FETCH_ERROR_MESSAGE);
        assert!(!app.in_flight);
    }

    #[test]
    fn statistics_replies_fill_the_panel() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let _ = cmd_rx.try_recv();
        app.refresh_statistics();
        app.refresh_statistics();
        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::FetchStatistics));
        assert!(cmd_rx.try_recv().is_err());

        app.handle_event(UiEvent::StatisticsLoaded(StatisticsResponse {
            current_date: "2023-10-03".into(),
            streak: 3,
            total_points: 36,
            weekly_trend: Vec::new(),
            achievements: Vec::new(),
            yearly_streak: 3,
            monthly_streak: 3,
        }));
        let lines = app.statistics.clone().expect("statistics rendered");
        assert_eq!(lines[0], "As of: 2023-10-03");
        assert!(!app.statistics_pending);
    }
}
