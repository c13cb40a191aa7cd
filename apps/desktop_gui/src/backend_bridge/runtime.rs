//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{ClientSettings, HttpStreakApi, StreakApi};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                drain_unavailable(&cmd_rx, &ui_tx, &format!("backend runtime unavailable: {err}"));
                return;
            }
        };

        let api = match HttpStreakApi::from_settings(&settings) {
            Ok(api) => api,
            Err(err) => {
                tracing::error!("backend worker startup failure: {err}");
                drain_unavailable(&cmd_rx, &ui_tx, &err.to_string());
                return;
            }
        };
        let _ = ui_tx.try_send(UiEvent::Info(format!("Backend: {}", api.base_url())));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend worker picked up command");
                let event = handle_command(&api, cmd).await;
                if ui_tx.send(event).is_err() {
                    break;
                }
            }
        });
        tracing::info!("backend worker stopped");
    });
}

async fn handle_command(api: &HttpStreakApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::Load => UiEvent::Fetched(api.fetch_time().await.map_err(|e| e.to_string())),
        BackendCommand::Submit(request) => {
            UiEvent::Fetched(api.log_session(&request).await.map_err(|e| e.to_string()))
        }
        BackendCommand::FetchStatistics => match api.overall_statistics().await {
            Ok(stats) => UiEvent::StatisticsLoaded(stats),
            Err(err) => UiEvent::StatisticsFailed(err.to_string()),
        },
    }
}

/// Answers every queued command with a failure so the UI never waits on a
/// worker that could not start.
fn drain_unavailable(cmd_rx: &Receiver<BackendCommand>, ui_tx: &Sender<UiEvent>, reason: &str) {
    while let Ok(cmd) = cmd_rx.recv() {
        if ui_tx.send(unavailable(&cmd, reason)).is_err() {
            break;
        }
    }
}

pub fn unavailable(cmd: &BackendCommand, reason: &str) -> UiEvent {
    if cmd.updates_tracker() {
        UiEvent::Fetched(Err(reason.to_string()))
    } else {
        UiEvent::StatisticsFailed(reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::protocol::SessionLogRequest;

    #[test]
    fn unavailable_worker_fails_each_command_kind() {
        assert_eq!(
            unavailable(&BackendCommand::Load, "down"),
            UiEvent::Fetched(Err("down".to_string()))
        );
        assert_eq!(
            unavailable(
                &BackendCommand::Submit(SessionLogRequest {
                    date: "2023-10-01".into(),
                    session_type: "1-hour".into(),
                }),
                "down"
            ),
            UiEvent::Fetched(Err("down".to_string()))
        );
        assert_eq!(
            unavailable(&BackendCommand::FetchStatistics, "down"),
            UiEvent::StatisticsFailed("down".to_string())
        );
    }

    #[test]
    fn bad_server_url_still_answers_queued_commands() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(16);
        cmd_tx.send(BackendCommand::Load).expect("queue load");

        launch(
            ClientSettings {
                server_url: "not a url".to_string(),
                request_timeout_secs: None,
            },
            cmd_rx,
            ui_tx,
        );

        let fetched = ui_rx
            .iter()
            .find(|event| matches!(event, UiEvent::Fetched(_)))
            .expect("worker replies while the command queue is open");
        assert!(matches!(fetched, UiEvent::Fetched(Err(_))));
        drop(cmd_tx);
    }
}
