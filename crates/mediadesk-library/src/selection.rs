//! File selection and best-effort bulk delete.

use std::collections::BTreeSet;

use futures::future::join_all;
use tracing::{info, warn};

use mediadesk_core::error::AppError;
use mediadesk_core::types::FileId;

use crate::api::MediaApi;

/// Set of selected file ids in the current listing.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: BTreeSet<FileId>,
}

impl SelectionManager {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: FileId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Replace the selection with `visible`.
    pub fn select_all(&mut self, visible: impl IntoIterator<Item = FileId>) {
        self.selected = visible.into_iter().collect();
    }

    /// Deselect one file. Returns whether it was selected.
    pub fn remove(&mut self, id: FileId) -> bool {
        self.selected.remove(&id)
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: FileId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected files.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected ids in stable order.
    pub fn snapshot(&self) -> Vec<FileId> {
        self.selected.iter().copied().collect()
    }

    /// Drop ids that are no longer listed.
    pub fn retain_visible(&mut self, visible: &BTreeSet<FileId>) {
        self.selected.retain(|id| visible.contains(id));
    }
}

/// One delete that did not go through.
#[derive(Debug, Clone)]
pub struct BulkFailure {
    /// The file that failed.
    pub id: FileId,
    /// Why.
    pub error: AppError,
}

/// Outcome of a bulk delete.
#[derive(Debug, Clone, Default)]
pub struct BulkDeleteSummary {
    /// Files that were deleted.
    pub succeeded: Vec<FileId>,
    /// Files that were not.
    pub failed: Vec<BulkFailure>,
}

impl BulkDeleteSummary {
    /// Number of deleted files.
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of failed deletes.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Whether every delete went through.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Short human-readable outcome.
    pub fn describe(&self) -> String {
        if self.failed.is_empty() {
            format!("Deleted {} file(s)", self.succeeded.len())
        } else {
            format!(
                "Deleted {} file(s), {} failed",
                self.succeeded.len(),
                self.failed.len()
            )
        }
    }
}

/// Issue one delete per id concurrently and collect every outcome.
///
/// A failure never cancels the other requests.
pub async fn delete_all<A>(api: &A, ids: Vec<FileId>) -> BulkDeleteSummary
where
    A: MediaApi + ?Sized,
{
    let outcomes = join_all(ids.into_iter().map(|id| async move {
        (id, api.delete_file(id).await)
    }))
    .await;

    let mut summary = BulkDeleteSummary::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(()) => summary.succeeded.push(id),
            Err(error) => {
                warn!(file_id = %id, error = %error, "Bulk delete item failed");
                summary.failed.push(BulkFailure { id, error });
            }
        }
    }

    info!(
        succeeded = summary.succeeded_count(),
        failed = summary.failed_count(),
        "Bulk delete finished"
    );
    summary
}
