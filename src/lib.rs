//! # Waitline
//!
//! Front-desk patient queue with an urgent lane.
//!
//! This crate provides:
//! - A two-tier waiting queue (urgent ahead of normal)
//! - Local persistence that survives restarts
//! - Terminal UI for adding, prioritising and calling patients
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core queue types (Patient, WaitingQueue, QueueState)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitization)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{Command, CurrentPatient, Outcome, Patient, QueueState, UrgentOrder};

/// Result type for Waitline operations
pub type Result<T> = std::result::Result<T, WaitlineError>;

/// Main error type for Waitline
#[derive(Debug, thiserror::Error)]
pub enum WaitlineError {
    #[error(transparent)]
    Queue(#[from] domain::QueueError),

    #[error("Photo encoding failed: {0}")]
    Encoding(#[from] domain::EncodingError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
