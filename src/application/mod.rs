//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the queue use cases.

mod queue;

pub use queue::{LoadReport, QueueService};
