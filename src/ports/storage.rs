//! Storage port: Trait for the durable key-value store.
//!
//! The queue and the in-service patient are mirrored under two independent
//! keys. Values are opaque text to the store; the application layer owns the
//! JSON encoding.

/// Key holding the serialized waiting list.
pub const WAITING_PATIENTS_KEY: &str = "waitingPatients";

/// Key holding the serialized in-service patient.
pub const CURRENT_PATIENT_KEY: &str = "currentPatient";

/// Trait for local key-value persistence.
///
/// All data is stored locally for a single user.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Returns
    /// `None` if the key has never been written or was removed.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn remove_item(&self, key: &str) -> Result<(), Self::Error>;
}
