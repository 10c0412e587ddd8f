//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the queue logic and the durable store.

mod storage;

pub use storage::{Storage, CURRENT_PATIENT_KEY, WAITING_PATIENTS_KEY};
