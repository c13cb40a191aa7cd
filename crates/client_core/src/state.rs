//! Tracker state and its event-driven transitions.

use std::fmt::Display;

use shared::{
    domain::SessionType,
    protocol::{SessionLogRequest, TimeResponse},
};
use tracing::{info, warn};

/// Shown in the time field until the first reply arrives.
pub const LOADING_PLACEHOLDER: &str = "Loading...";
/// Replaces the time field whenever a call fails, whatever the cause.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerState {
    pub current_time: String,
    pub streak: u64,
    pub total_points: u64,
    pub selected_date: String,
    pub selected_session: String,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            current_time: LOADING_PLACEHOLDER.to_string(),
            streak: 0,
            total_points: 0,
            selected_date: String::new(),
            selected_session: SessionType::default().as_str().to_string(),
        }
    }
}

impl TrackerState {
    pub fn apply_snapshot(&mut self, snapshot: TimeResponse) {
        info!(
            streak = snapshot.streak,
            total_points = snapshot.total_points,
            "applied tracker snapshot"
        );
        self.current_time = snapshot.current_time;
        self.streak = snapshot.streak;
        self.total_points = snapshot.total_points;
    }

    /// Streak and points keep their last known values.
    pub fn apply_failure(&mut self) {
        self.current_time = FETCH_ERROR_MESSAGE.to_string();
    }

    pub fn apply_outcome<E: Display>(&mut self, outcome: Result<TimeResponse, E>) {
        match outcome {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(err) => {
                warn!("tracker request failed: {err}");
                self.apply_failure();
            }
        }
    }

    pub fn set_date(&mut self, value: impl Into<String>) {
        self.selected_date = value.into();
    }

    pub fn set_session(&mut self, value: impl Into<String>) {
        self.selected_session = value.into();
    }

    pub fn session_log_request(&self) -> SessionLogRequest {
        SessionLogRequest {
            date: self.selected_date.clone(),
            session_type: self.selected_session.clone(),
        }
    }

    pub fn has_error(&self) -> bool {
        self.current_time == FETCH_ERROR_MESSAGE
    }
}
