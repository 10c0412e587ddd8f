//! Queue service: Applies commands and mirrors state to storage.
//!
//! This service coordinates:
//! - Restoring the queue and in-service patient at startup
//! - Applying user commands to `QueueState`
//! - Writing each changed part back under its own key

use std::sync::Arc;

use crate::domain::{
    Command, CurrentPatient, Outcome, Patient, QueueError, QueueState, UrgentOrder, WaitingQueue,
};
use crate::ports::{Storage, CURRENT_PATIENT_KEY, WAITING_PATIENTS_KEY};
use crate::WaitlineError;

/// What `load_state` found in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Patients restored into the waiting queue
    pub waiting: usize,
    /// Whether an in-service patient was restored
    pub current: bool,
    /// Keys whose stored value could not be parsed and were ignored
    pub skipped: Vec<&'static str>,
}

/// Service owning the queue state and its persistence.
pub struct QueueService<S>
where
    S: Storage,
{
    storage: Arc<S>,
    state: QueueState,
}

impl<S> QueueService<S>
where
    S: Storage,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a service with an empty queue.
    pub fn new(storage: Arc<S>, urgent_order: UrgentOrder) -> Self {
        Self {
            storage,
            state: QueueState::new(urgent_order),
        }
    }

    /// Current state, for rendering.
    #[must_use]
    pub fn state(&self) -> &QueueState {
        &self.state
    }

    /// Restore the queue and in-service patient from storage.
    ///
    /// Missing keys leave the corresponding part empty. A value that does not
    /// parse is logged, ignored and listed in `LoadReport::skipped`; the stored
    /// value is left as is until the next write replaces it.
    ///
    /// # Errors
    /// Returns error if the storage backend itself fails.
    pub fn load_state(&mut self) -> Result<LoadReport, WaitlineError> {
        let mut report = LoadReport::default();
        let urgent_order = self.state.waiting.urgent_order();

        let stored_waiting = self.read::<Vec<Patient>>(WAITING_PATIENTS_KEY, &mut report)?;
        if let Some(patients) = stored_waiting {
            report.waiting = patients.len();
            self.state.waiting = WaitingQueue::from_patients(patients, urgent_order);
        }

        let stored_current = self.read::<CurrentPatient>(CURRENT_PATIENT_KEY, &mut report)?;
        report.current = stored_current.is_some();
        self.state.current = stored_current;

        tracing::info!(
            waiting = report.waiting,
            urgent = self.state.waiting.urgent_len(),
            in_service = report.current,
            skipped = report.skipped.len(),
            "Restored queue state"
        );

        Ok(report)
    }

    /// Apply a command and persist whatever it changed.
    ///
    /// The command runs against a copy of the state, which replaces the live
    /// state only once every write has succeeded. A failed write leaves memory
    /// as it was before the command.
    ///
    /// # Errors
    /// - `WaitlineError::Queue(Validation)` for a blank name; nothing changes.
    /// - `WaitlineError::Queue(NotFound)` when advancing an empty queue; the
    ///   stored in-service record has already been removed.
    /// - `WaitlineError::Storage` / `Serialization` if persisting fails.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, WaitlineError> {
        let mut next = self.state.clone();
        let result = next.apply(command);

        match &result {
            Ok(Outcome::Added { position, urgent }) => {
                self.save_waiting(&next)?;
                tracing::info!(
                    urgent = *urgent,
                    position = *position,
                    waiting = next.waiting.len(),
                    "Patient added"
                );
            }
            Ok(Outcome::Advanced { remaining }) => {
                self.save_current(&next)?;
                if let Err(e) = self.save_waiting(&next) {
                    // Put the previous in-service record back so both keys
                    // still describe the same state.
                    if let Err(restore) = self.save_current(&self.state) {
                        tracing::error!("Could not restore in-service record: {restore}");
                    }
                    return Err(e);
                }
                tracing::info!(remaining = *remaining, "Patient called into service");
            }
            Ok(Outcome::Cleared) => {
                self.remove_current()?;
                tracing::info!("In-service slot cleared");
            }
            Err(QueueError::NotFound(_)) => {
                self.remove_current()?;
                tracing::info!("Advance requested with no patients waiting");
            }
            Err(QueueError::Validation(_)) => {
                tracing::debug!("Rejected patient without a name");
            }
        }

        self.state = next;
        result.map_err(WaitlineError::from)
    }

    /// Check that the stored queue matches the in-memory queue.
    #[cfg(test)]
    pub(crate) fn is_mirrored(&self) -> Result<bool, WaitlineError> {
        let stored = self
            .storage
            .get_item(WAITING_PATIENTS_KEY)
            .map_err(|e| WaitlineError::Storage(e.into()))?;

        let stored: Vec<Patient> = match stored {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        Ok(stored == self.state.waiting.to_vec())
    }

    fn read<T>(
        &self,
        key: &'static str,
        report: &mut LoadReport,
    ) -> Result<Option<T>, WaitlineError>
    where
        T: serde::de::DeserializeOwned,
    {
        let Some(json) = self
            .storage
            .get_item(key)
            .map_err(|e| WaitlineError::Storage(e.into()))?
        else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unreadable stored value");
                report.skipped.push(key);
                Ok(None)
            }
        }
    }

    fn save_waiting(&self, state: &QueueState) -> Result<(), WaitlineError> {
        let json = serde_json::to_string(&state.waiting.to_vec())?;
        self.storage
            .set_item(WAITING_PATIENTS_KEY, &json)
            .map_err(|e| WaitlineError::Storage(e.into()))
    }

    fn save_current(&self, state: &QueueState) -> Result<(), WaitlineError> {
        match &state.current {
            Some(current) => {
                let json = serde_json::to_string(current)?;
                self.storage
                    .set_item(CURRENT_PATIENT_KEY, &json)
                    .map_err(|e| WaitlineError::Storage(e.into()))
            }
            None => self.remove_current(),
        }
    }

    fn remove_current(&self) -> Result<(), WaitlineError> {
        self.storage
            .remove_item(CURRENT_PATIENT_KEY)
            .map_err(|e| WaitlineError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;

    fn create_test_service() -> (QueueService<SqliteStorage>, Arc<SqliteStorage>) {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        (QueueService::new(storage.clone(), UrgentOrder::Lifo), storage)
    }

    fn add(name: &str, urgent: bool) -> Command {
        Command::AddPatient {
            name: name.to_string(),
            image: None,
            urgent,
        }
    }

    fn waiting_names(service: &QueueService<SqliteStorage>) -> Vec<String> {
        service.state().waiting.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_add_persists_queue() {
        let (mut service, storage) = create_test_service();

        service.dispatch(add("Ana", false)).expect("Should add");
        service.dispatch(add("Bruno", true)).expect("Should add");

        let stored = storage
            .get_item(WAITING_PATIENTS_KEY)
            .expect("Should read")
            .expect("Should exist");
        let stored: Vec<Patient> = serde_json::from_str(&stored).expect("Should parse");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "Bruno");
        assert!(stored[0].urgent);
        assert!(service.is_mirrored().expect("Should compare"));
    }

    #[test]
    fn test_validation_error_changes_nothing() {
        let (mut service, storage) = create_test_service();

        let result = service.dispatch(add("   ", false));
        assert!(matches!(
            result,
            Err(WaitlineError::Queue(QueueError::Validation(_)))
        ));
        assert!(service.state().waiting.is_empty());
        assert!(storage.get_item(WAITING_PATIENTS_KEY).expect("Should read").is_none());
    }

    #[test]
    fn test_advance_persists_both_keys() {
        let (mut service, storage) = create_test_service();
        service.dispatch(add("Ana", false)).expect("Should add");

        service.dispatch(Command::Advance).expect("Should advance");

        let current = storage
            .get_item(CURRENT_PATIENT_KEY)
            .expect("Should read")
            .expect("Should exist");
        let current: CurrentPatient = serde_json::from_str(&current).expect("Should parse");
        assert_eq!(current.name, "Ana");
        assert!(service.state().waiting.is_empty());
        assert!(service.is_mirrored().expect("Should compare"));
    }

    #[test]
    fn test_advance_on_empty_removes_current_record() {
        let (mut service, storage) = create_test_service();
        service.dispatch(add("Ana", false)).expect("Should add");
        service.dispatch(Command::Advance).expect("Should advance");
        assert!(storage.get_item(CURRENT_PATIENT_KEY).expect("Should read").is_some());

        let result = service.dispatch(Command::Advance);
        assert!(matches!(
            result,
            Err(WaitlineError::Queue(QueueError::NotFound(_)))
        ));
        assert!(service.state().current.is_none());
        assert!(storage.get_item(CURRENT_PATIENT_KEY).expect("Should read").is_none());
    }

    #[test]
    fn test_clear_current_removes_record() {
        let (mut service, storage) = create_test_service();
        service.dispatch(add("Ana", false)).expect("Should add");
        service.dispatch(Command::Advance).expect("Should advance");

        service.dispatch(Command::ClearCurrent).expect("Should clear");
        assert!(service.state().current.is_none());
        assert!(storage.get_item(CURRENT_PATIENT_KEY).expect("Should read").is_none());
    }

    #[test]
    fn test_reload_reproduces_queue() {
        let (mut service, storage) = create_test_service();
        service
            .dispatch(Command::AddPatient {
                name: "Ana".into(),
                image: Some("data:image/png;base64,AAAA".into()),
                urgent: false,
            })
            .expect("Should add");
        service.dispatch(add("Bruno", true)).expect("Should add");
        service.dispatch(add("Caio", false)).expect("Should add");
        service.dispatch(add("Duda", true)).expect("Should add");
        service.dispatch(Command::Advance).expect("Should advance");

        let mut restarted = QueueService::new(storage, UrgentOrder::Lifo);
        let report = restarted.load_state().expect("Should load");

        assert_eq!(report.waiting, 3);
        assert!(report.current);
        assert!(report.skipped.is_empty());
        assert_eq!(restarted.state().waiting.to_vec(), service.state().waiting.to_vec());
        assert_eq!(restarted.state().current, service.state().current);
        assert_eq!(waiting_names(&restarted), ["Bruno", "Ana", "Caio"]);
    }

    #[test]
    fn test_load_from_empty_storage() {
        let (mut service, _storage) = create_test_service();
        let report = service.load_state().expect("Should load");

        assert_eq!(report, LoadReport::default());
        assert!(service.state().waiting.is_empty());
        assert!(service.state().current.is_none());
    }

    #[test]
    fn test_corrupted_entries_are_skipped() {
        let (mut service, storage) = create_test_service();
        storage
            .set_item(WAITING_PATIENTS_KEY, "[{not json")
            .expect("Should write");
        storage
            .set_item(CURRENT_PATIENT_KEY, r#"{"name":"Ana","imageBase64":null}"#)
            .expect("Should write");

        let report = service.load_state().expect("Should load");

        assert_eq!(report.skipped, vec![WAITING_PATIENTS_KEY]);
        assert!(report.current);
        assert!(service.state().waiting.is_empty());

        service.dispatch(add("Bia", false)).expect("Should add");
        assert!(service.is_mirrored().expect("Should compare"));
    }

    /// SQLite store that rejects writes to one key while `failing` is set.
    struct FailingWrites {
        inner: SqliteStorage,
        failing: std::sync::Mutex<Option<&'static str>>,
    }

    impl FailingWrites {
        fn new() -> Self {
            Self {
                inner: SqliteStorage::in_memory().expect("Should create db"),
                failing: std::sync::Mutex::new(None),
            }
        }

        fn fail_writes_to(&self, key: Option<&'static str>) {
            *self.failing.lock().expect("Lock failed") = key;
        }
    }

    impl Storage for FailingWrites {
        type Error = crate::adapters::StorageError;

        fn get_item(&self, key: &str) -> Result<Option<String>, Self::Error> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            if *self.failing.lock().expect("Lock failed") == Some(key) {
                return Err(rusqlite::Error::InvalidQuery.into());
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), Self::Error> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_failed_save_keeps_memory_unchanged() {
        let storage = Arc::new(FailingWrites::new());
        let mut service = QueueService::new(storage.clone(), UrgentOrder::Lifo);
        service.dispatch(add("Ana", false)).expect("Should add");

        storage.fail_writes_to(Some(WAITING_PATIENTS_KEY));
        let result = service.dispatch(add("Bruno", false));
        assert!(matches!(result, Err(WaitlineError::Storage(_))));
        assert_eq!(service.state().waiting.len(), 1);
        assert!(service.is_mirrored().expect("Should compare"));

        // Retrying once the store recovers queues the patient exactly once.
        storage.fail_writes_to(None);
        service.dispatch(add("Bruno", false)).expect("Should add");
        let names: Vec<&str> = service
            .state()
            .waiting
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Ana", "Bruno"]);
        assert!(service.is_mirrored().expect("Should compare"));
    }

    #[test]
    fn test_failed_advance_restores_current_record() {
        let storage = Arc::new(FailingWrites::new());
        let mut service = QueueService::new(storage.clone(), UrgentOrder::Lifo);
        service.dispatch(add("Ana", false)).expect("Should add");

        storage.fail_writes_to(Some(WAITING_PATIENTS_KEY));
        let result = service.dispatch(Command::Advance);
        assert!(matches!(result, Err(WaitlineError::Storage(_))));

        assert!(service.state().current.is_none());
        assert_eq!(service.state().waiting.len(), 1);
        assert!(storage.get_item(CURRENT_PATIENT_KEY).expect("Should read").is_none());
        assert!(service.is_mirrored().expect("Should compare"));
    }
}
