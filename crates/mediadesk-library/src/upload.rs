//! Single-flight batch uploads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_entity::{MediaFile, UploadBatch};

use crate::api::{MediaApi, ProgressReporter};

/// Runs at most one upload batch at a time and exposes its progress.
///
/// A batch is one request: it either commits every file or none of them.
#[derive(Debug, Default)]
pub struct UploadCoordinator {
    in_flight: AtomicBool,
    progress: ProgressReporter,
    timeout: Option<Duration>,
}

/// Clears the in-flight flag when the upload future finishes or is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadCoordinator {
    /// Create an idle coordinator without a timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail uploads that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a batch is outstanding.
    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Current progress percentage.
    pub fn progress(&self) -> u8 {
        self.progress.current()
    }

    /// Watch progress changes.
    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    /// Return progress to 0 after the caller has seen a completed batch.
    ///
    /// Ignored while a batch is outstanding.
    pub fn acknowledge(&self) {
        if !self.is_uploading() {
            self.progress.reset();
        }
    }

    /// Send `batch` through `api`.
    ///
    /// Rejected with [`ErrorKind::Conflict`] while another batch is
    /// outstanding and with [`ErrorKind::Validation`] for an empty batch,
    /// before any request. Every failure of the request itself comes back
    /// as [`ErrorKind::Upload`] wrapping the original error. The
    /// coordinator never retries.
    pub async fn upload<A>(&self, api: &A, batch: UploadBatch) -> AppResult<Vec<MediaFile>>
    where
        A: MediaApi + ?Sized,
    {
        if batch.is_empty() {
            return Err(AppError::validation("No files selected for upload"));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::conflict("An upload is already in progress"));
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.progress.reset();
        let count = batch.files.len();
        let bytes = batch.total_size();
        let folder_id = batch.folder_id;
        info!(folder_id = ?folder_id, count, bytes, "Upload started");

        let request = api.upload(batch, self.progress.clone());
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AppError::upload(format!(
                    "Upload timed out after {}s",
                    limit.as_secs()
                ))),
            },
            None => request.await,
        };

        match outcome {
            Ok(created) => {
                self.progress.complete();
                info!(folder_id = ?folder_id, count = created.len(), "Upload finished");
                Ok(created)
            }
            Err(err) => {
                self.progress.reset();
                warn!(folder_id = ?folder_id, error = %err, "Upload failed");
                Err(into_upload_error(err))
            }
        }
    }
}

/// Fold any failure of a sent batch into one aggregate upload error.
fn into_upload_error(err: AppError) -> AppError {
    if err.kind == ErrorKind::Upload {
        return err;
    }
    let message = format!("Upload failed: {}", err.message);
    AppError::with_source(ErrorKind::Upload, message, err)
}
