//! Client core for the session streak tracker: backend API access, the
//! tracker state machine and its renderer.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod state;

pub use api::{HttpStreakApi, StreakApi};
pub use config::{load_settings, ClientSettings};
pub use controller::StateController;
pub use error::ClientError;
pub use render::{render, Action, Field, View, ViewNode};
pub use state::{TrackerState, FETCH_ERROR_MESSAGE, LOADING_PLACEHOLDER};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
