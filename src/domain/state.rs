//! Queue state and the commands that change it.
//!
//! Every user action becomes one `Command`; `QueueState::apply` is the single
//! place where the queue and the in-service slot change. It performs no I/O.
//! Persisting the result is the caller's job, guided by `Outcome`.

use super::{CurrentPatient, Patient, UrgentOrder, WaitingQueue};

/// Errors raised by queue commands. Both are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid patient: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// A user intent against the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a patient; `image` is an already-encoded data URL.
    AddPatient {
        name: String,
        image: Option<String>,
        urgent: bool,
    },
    /// Move the next waiting patient into service.
    Advance,
    /// Empty the in-service slot without touching the queue.
    ClearCurrent,
}

/// What changed after a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A patient joined the queue at `position` (0 = next to be called).
    Added { position: usize, urgent: bool },
    /// The head of the queue is now in service.
    Advanced { remaining: usize },
    /// The in-service slot was emptied.
    Cleared,
}

/// Authoritative in-memory state.
#[derive(Debug, Clone, Default)]
pub struct QueueState {
    pub waiting: WaitingQueue,
    pub current: Option<CurrentPatient>,
}

impl QueueState {
    #[must_use]
    pub fn new(urgent_order: UrgentOrder) -> Self {
        Self {
            waiting: WaitingQueue::new(urgent_order),
            current: None,
        }
    }

    /// Apply a command.
    ///
    /// # Errors
    /// - `QueueError::Validation` if an added name is blank; nothing changes.
    /// - `QueueError::NotFound` if advancing an empty queue; the in-service
    ///   slot is still emptied.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, QueueError> {
        match command {
            Command::AddPatient { name, image, urgent } => {
                let patient = Patient::new(&name, image, urgent)?;
                self.waiting.enqueue(patient);

                let position = if urgent {
                    match self.waiting.urgent_order() {
                        UrgentOrder::Lifo => 0,
                        UrgentOrder::Fifo => self.waiting.urgent_len() - 1,
                    }
                } else {
                    self.waiting.len() - 1
                };

                Ok(Outcome::Added { position, urgent })
            }
            Command::Advance => match self.waiting.pop_next() {
                Some(patient) => {
                    self.current = Some(patient.into());
                    Ok(Outcome::Advanced {
                        remaining: self.waiting.len(),
                    })
                }
                None => {
                    self.current = None;
                    Err(QueueError::NotFound(
                        "No patients waiting to be attended".to_string(),
                    ))
                }
            },
            Command::ClearCurrent => {
                self.current = None;
                Ok(Outcome::Cleared)
            }
        }
    }
}
