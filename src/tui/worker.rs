//! Background photo encoding.
//!
//! Reading and base64-encoding a photo runs on its own thread so the TUI main
//! loop keeps drawing. The patient is only built once the encode resolves, so
//! the queue never sees a half-constructed entry. Several encodes may be in
//! flight at once and complete in any order.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::domain::image;

/// Result reported by an encode worker.
#[derive(Debug, Clone)]
pub enum EncodeProgress {
    /// Photo encoded as a data URL
    Complete(String),
    /// Photo could not be read
    Error(String),
}

/// The add request waiting on a photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdd {
    pub name: String,
    pub urgent: bool,
    pub photo_path: PathBuf,
}

/// Handle to a running encode worker.
pub struct EncodeWorkerHandle {
    /// The request to complete once the photo is ready
    pub request: PendingAdd,
    progress_rx: Receiver<EncodeProgress>,
    _handle: JoinHandle<()>,
}

impl EncodeWorkerHandle {
    /// Try to receive the result (non-blocking).
    ///
    /// A worker that exits without reporting is surfaced as an error.
    #[must_use]
    pub fn try_recv(&self) -> Option<EncodeProgress> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Some(progress),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(EncodeProgress::Error(
                "Photo encoding stopped unexpectedly".to_string(),
            )),
        }
    }
}

/// Worker that encodes a photo in the background.
pub struct EncodeWorker;

impl EncodeWorker {
    /// Spawn a background encode for `request.photo_path`.
    pub fn spawn(request: PendingAdd) -> EncodeWorkerHandle {
        let (tx, rx) = mpsc::channel();
        let path = request.photo_path.clone();

        let handle = thread::spawn(move || {
            Self::encode_and_report(path, tx);
        });

        EncodeWorkerHandle {
            request,
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn encode_and_report(path: PathBuf, tx: Sender<EncodeProgress>) {
        let progress = match image::encode_file(&path) {
            Ok(data_url) => {
                tracing::debug!(bytes = data_url.len(), "Photo encoded");
                EncodeProgress::Complete(data_url)
            }
            Err(e) => {
                tracing::warn!("Photo encoding failed: {e}");
                EncodeProgress::Error(e.to_string())
            }
        };
        let _ = tx.send(progress);
    }
}
