//! Adapters layer: Concrete implementations of ports.
//!
//! - `sqlite`: SQLite-backed key-value store
//! - `sanitize`: patient data redaction for logs

pub mod sanitize;
pub mod sqlite;

pub use sqlite::StorageError;
