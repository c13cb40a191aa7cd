//! Events sent from the backend worker to the UI thread.

use shared::protocol::{StatisticsResponse, TimeResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    /// Reply to a load or submit. The error detail is for the status line
    /// and logs; the tracker only shows its fixed error string.
    Fetched(Result<TimeResponse, String>),
    StatisticsLoaded(StatisticsResponse),
    StatisticsFailed(String),
}
