//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the front-desk screen for:
//! - Patient intake with optional photo
//! - The waiting list in service order
//! - The patient currently in service

mod app;
mod styles;
pub mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{EncodeProgress, EncodeWorker, EncodeWorkerHandle, PendingAdd};
