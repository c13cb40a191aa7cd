//! Backend commands queued from UI to backend worker.

use shared::protocol::SessionLogRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Load,
    Submit(SessionLogRequest),
    FetchStatistics,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Load => "load",
            BackendCommand::Submit(_) => "submit",
            BackendCommand::FetchStatistics => "fetch_statistics",
        }
    }

    /// Load and submit both resolve into a tracker snapshot.
    pub fn updates_tracker(&self) -> bool {
        matches!(self, BackendCommand::Load | BackendCommand::Submit(_))
    }
}
