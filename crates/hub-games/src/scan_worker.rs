//! Single background scan worker.
//!
//! Scan requests are processed strictly one after another, so results
//! arrive in request order and the latest request is always the last one
//! reported. In-flight scans are never cancelled.

use gamehub_library::{EntryRef, GameRecord, LibraryError, scan_folder};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Outcome of one folder scan.
#[derive(Debug)]
pub struct ScanFinished {
    pub folder: EntryRef,
    pub outcome: Result<Vec<GameRecord>, LibraryError>,
}

/// Spawns the worker and returns its request queue.
///
/// The worker exits when the request sender or the event receiver is
/// dropped. Must be called from within a tokio runtime.
pub fn spawn<E>(events_tx: mpsc::Sender<E>) -> mpsc::Sender<EntryRef>
where
    E: From<ScanFinished> + Send + 'static,
{
    let (requests_tx, mut requests_rx) = mpsc::channel::<EntryRef>(16);

    tokio::spawn(async move {
        while let Some(folder) = requests_rx.recv().await {
            debug!(folder = %folder, "scanning games folder");
            let path = folder.path().to_path_buf();
            let outcome = match tokio::task::spawn_blocking(move || scan_folder(&path)).await {
                Ok(outcome) => outcome,
                Err(e) => Err(LibraryError::inaccessible(
                    folder.path(),
                    std::io::Error::other(e),
                )),
            };

            if events_tx
                .send(E::from(ScanFinished { folder, outcome }))
                .await
                .is_err()
            {
                break;
            }
        }
        trace!("scan worker stopped");
    });

    requests_tx
}
