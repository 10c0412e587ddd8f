//! Domain layer: Core queue types and logic.
//!
//! Pure Rust types with no I/O apart from reading photo files in `image`.
//! All records are serializable in the persisted JSON layout.

pub mod image;
mod patient;
mod queue;
mod state;

pub use image::{EncodingError, PhotoInfo};
pub use patient::{validate_name, CurrentPatient, Patient};
pub use queue::{UrgentOrder, WaitingQueue};
pub use state::{Command, Outcome, QueueError, QueueState};
