//! UI layer for the desktop tracker window.

pub mod app;

pub use app::TrackerApp;
