//! Queue state survives a process restart against a file-backed database.

use std::sync::Arc;

use waitline::adapters::sqlite::SqliteStorage;
use waitline::application::QueueService;
use waitline::domain::QueueError;
use waitline::{Command, UrgentOrder, WaitlineError};

fn add(name: &str, urgent: bool) -> Command {
    Command::AddPatient {
        name: name.to_string(),
        image: None,
        urgent,
    }
}

fn open(path: &std::path::Path, order: UrgentOrder) -> QueueService<SqliteStorage> {
    let storage = Arc::new(SqliteStorage::new(path).expect("Should open db"));
    let mut service = QueueService::new(storage, order);
    service.load_state().expect("Should load");
    service
}

fn names(service: &QueueService<SqliteStorage>) -> Vec<String> {
    service.state().waiting.iter().map(|p| p.name.clone()).collect()
}

#[test]
fn test_queue_survives_restart() {
    let dir = tempfile::tempdir().expect("Should create dir");
    let db = dir.path().join("queue.db");

    {
        let mut service = open(&db, UrgentOrder::Lifo);
        service.dispatch(add("A", false)).expect("Should add");
        service.dispatch(add("B", true)).expect("Should add");
        service.dispatch(add("C", false)).expect("Should add");
        service.dispatch(add("D", true)).expect("Should add");
        assert_eq!(names(&service), ["D", "B", "A", "C"]);
        service.dispatch(Command::Advance).expect("Should advance");
    }

    let mut service = open(&db, UrgentOrder::Lifo);
    assert_eq!(
        service.state().current.as_ref().map(|c| c.name.as_str()),
        Some("D")
    );
    assert_eq!(names(&service), ["B", "A", "C"]);

    // Order keeps holding after more work on the reloaded queue.
    service.dispatch(add("E", true)).expect("Should add");
    assert_eq!(names(&service), ["E", "B", "A", "C"]);
}

#[test]
fn test_draining_queue_clears_service_after_restart() {
    let dir = tempfile::tempdir().expect("Should create dir");
    let db = dir.path().join("queue.db");

    {
        let mut service = open(&db, UrgentOrder::Lifo);
        service.dispatch(add("A", false)).expect("Should add");
        service.dispatch(Command::Advance).expect("Should advance");
        let result = service.dispatch(Command::Advance);
        assert!(matches!(
            result,
            Err(WaitlineError::Queue(QueueError::NotFound(_)))
        ));
    }

    let service = open(&db, UrgentOrder::Lifo);
    assert!(service.state().current.is_none());
    assert!(service.state().waiting.is_empty());
}

#[test]
fn test_fifo_urgent_order_on_reload() {
    let dir = tempfile::tempdir().expect("Should create dir");
    let db = dir.path().join("queue.db");

    {
        let mut service = open(&db, UrgentOrder::Fifo);
        service.dispatch(add("A", false)).expect("Should add");
        service.dispatch(add("B", true)).expect("Should add");
        service.dispatch(add("D", true)).expect("Should add");
        assert_eq!(names(&service), ["B", "D", "A"]);
    }

    let service = open(&db, UrgentOrder::Fifo);
    assert_eq!(names(&service), ["B", "D", "A"]);
}
