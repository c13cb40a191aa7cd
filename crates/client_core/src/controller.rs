use tracing::debug;

use crate::{
    api::StreakApi,
    render::{render, View},
    state::TrackerState,
};

/// Owns the tracker state and drives it from backend replies and user input.
///
/// `load` and `submit` take `&mut self`, so a controller never has more than
/// one request in flight.
pub struct StateController<A: StreakApi> {
    api: A,
    state: TrackerState,
}

impl<A: StreakApi> StateController<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, TrackerState::default())
    }

    pub fn with_state(api: A, state: TrackerState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn load(&mut self) -> &TrackerState {
        debug!("loading tracker state");
        let outcome = self.api.fetch_time().await;
        self.state.apply_outcome(outcome);
        &self.state
    }

    pub fn set_date(&mut self, value: impl Into<String>) {
        self.state.set_date(value);
    }

    pub fn set_session(&mut self, value: impl Into<String>) {
        self.state.set_session(value);
    }

    pub async fn submit(&mut self) -> &TrackerState {
        let request = self.state.session_log_request();
        debug!(
            date = %request.date,
            session_type = %request.session_type,
            "submitting session"
        );
        let outcome = self.api.log_session(&request).await;
        self.state.apply_outcome(outcome);
        &self.state
    }

    pub fn view(&self) -> View {
        render(&self.state)
    }

    pub fn into_state(self) -> TrackerState {
        self.state
    }
}
