//! The media library orchestrator.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{
    FileFilter, Folder, FolderNode, MediaFile, StatsSnapshot, UpdateFileMetadata, UploadBatch,
    UploadBlob,
};

use crate::api::MediaApi;
use crate::context::LibraryContext;
use crate::file_registry::FileRegistry;
use crate::folder_tree::{Crumb, FolderTreeStore};
use crate::notification::Notification;
use crate::selection::{self, BulkDeleteSummary, SelectionManager};
use crate::upload::UploadCoordinator;

/// Everything the library shows.
#[derive(Debug, Default)]
struct ViewState {
    current: Option<FolderId>,
    folders: FolderTreeStore,
    files: FileRegistry,
    filter: FileFilter,
    selection: SelectionManager,
    stats: Option<StatsSnapshot>,
}

/// Client-side media library over a [`MediaApi`].
///
/// View state is never locked across a request. Each navigation takes a new
/// generation number and a listing that arrives for an older generation is
/// discarded.
pub struct MediaLibrary<A: MediaApi + ?Sized> {
    api: Arc<A>,
    ctx: LibraryContext,
    view: RwLock<ViewState>,
    generation: AtomicU64,
    uploads: UploadCoordinator,
}

impl<A: MediaApi + ?Sized> MediaLibrary<A> {
    /// Create a library at root with nothing loaded.
    pub fn new(api: Arc<A>, ctx: LibraryContext) -> Self {
        Self {
            api,
            ctx,
            view: RwLock::new(ViewState::default()),
            generation: AtomicU64::new(0),
            uploads: UploadCoordinator::new(),
        }
    }

    /// Fail uploads that take longer than `timeout`.
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.uploads = UploadCoordinator::new().with_timeout(timeout);
        self
    }

    /// The collaborator.
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// The context the library reports to.
    pub fn context(&self) -> &LibraryContext {
        &self.ctx
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Load folders, the current listing and stats.
    pub async fn open(&self) -> AppResult<()> {
        self.refresh().await
    }

    /// Reload folders, the current listing and stats.
    pub async fn refresh(&self) -> AppResult<()> {
        let folders = self.api.list_folders().await.map_err(|e| self.fail(e))?;
        if self.apply_folder_listing(folders).await {
            self.navigate(None).await?;
        } else {
            let (folder_id, generation) = self.current_generation().await;
            self.load_files(folder_id, generation)
                .await
                .map_err(|e| self.fail(e))?;
        }
        self.refresh_stats_quietly().await;
        Ok(())
    }

    /// Fetch fresh stats.
    pub async fn refresh_stats(&self) -> AppResult<StatsSnapshot> {
        let stats = self.api.get_stats().await.map_err(|e| self.fail(e))?;
        self.view.write().await.stats = Some(stats);
        Ok(stats)
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Switch to `folder_id` (None for root) and load its files.
    ///
    /// Clears the selection. Returns `false` when a later navigation
    /// overtook this one and its listing was discarded.
    pub async fn navigate(&self, folder_id: Option<FolderId>) -> AppResult<bool> {
        if let Some(id) = folder_id
            && self.folder(id).await.is_none()
        {
            debug!(folder_id = %id, "Folder unknown locally, reloading folders");
            self.reload_folders_quietly().await;
        }

        let generation = {
            let mut view = self.view.write().await;
            if let Some(id) = folder_id
                && !view.folders.contains(id)
            {
                drop(view);
                return Err(self.fail(AppError::not_found("Folder not found")));
            }
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            view.current = folder_id;
            view.selection.clear();
            view.files.replace(folder_id, Vec::new());
            generation
        };
        debug!(folder_id = ?folder_id, generation, "Navigating");

        match self.load_files(folder_id, generation).await {
            Ok(applied) => Ok(applied),
            Err(err) => {
                if self.generation.load(Ordering::Acquire) == generation {
                    Err(self.fail(err))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Go to the parent of the current folder. At root this is a no-op.
    pub async fn navigate_up(&self) -> AppResult<bool> {
        let parent = {
            let view = self.view.read().await;
            match view.current {
                None => return Ok(false),
                Some(id) => view.folders.get(id).and_then(|f| f.parent_id),
            }
        };
        self.navigate(parent).await
    }

    // ── View queries ─────────────────────────────────────────────────

    /// The active folder (None for root).
    pub async fn current_folder(&self) -> Option<FolderId> {
        self.view.read().await.current
    }

    /// Ancestors of the active folder, root-first, ending with it.
    pub async fn breadcrumbs(&self) -> Vec<Folder> {
        let view = self.view.read().await;
        match view.current {
            Some(id) => view.folders.breadcrumb_path(id),
            None => Vec::new(),
        }
    }

    /// Breadcrumb trail of `folder_id`, starting at root.
    pub async fn trail(&self, folder_id: Option<FolderId>) -> Vec<Crumb> {
        self.view.read().await.folders.trail(folder_id)
    }

    /// Sub-folders of the active folder.
    pub async fn child_folders(&self) -> Vec<Folder> {
        let view = self.view.read().await;
        view.folders.list_children(view.current)
    }

    /// Every known folder, sorted by name.
    pub async fn folders(&self) -> Vec<Folder> {
        self.view.read().await.folders.all()
    }

    /// Look up a known folder.
    pub async fn folder(&self, id: FolderId) -> Option<Folder> {
        self.view.read().await.folders.get(id).cloned()
    }

    /// Nested view of every folder.
    pub async fn folder_forest(&self) -> Vec<FolderNode> {
        self.view.read().await.folders.forest()
    }

    /// Files of the active folder passing the active filter.
    pub async fn visible_files(&self) -> Vec<MediaFile> {
        let view = self.view.read().await;
        view.files.list(view.current, &view.filter)
    }

    /// Change the listing filter. Selected files that drop out of view are
    /// deselected.
    pub async fn set_filter(&self, filter: FileFilter) {
        let mut view = self.view.write().await;
        view.filter = filter;
        let visible: BTreeSet<FileId> = view
            .files
            .list(view.current, &view.filter)
            .into_iter()
            .map(|f| f.id)
            .collect();
        view.selection.retain_visible(&visible);
    }

    /// The active filter.
    pub async fn filter(&self) -> FileFilter {
        self.view.read().await.filter.clone()
    }

    /// Last stats fetched from the collaborator.
    pub async fn stats(&self) -> Option<StatsSnapshot> {
        self.view.read().await.stats
    }

    /// Stats over the loaded listing only.
    pub async fn listing_stats(&self) -> StatsSnapshot {
        self.view.read().await.files.compute_stats()
    }

    // ── Folder mutations ─────────────────────────────────────────────

    /// Create a folder under `parent_id` (None for root).
    pub async fn create_folder(&self, name: &str, parent_id: Option<FolderId>) -> AppResult<Folder> {
        let req = self
            .check_folders(|folders| folders.prepare_create(name, parent_id))
            .await
            .map_err(|e| self.fail(e))?;

        match self.api.create_folder(req).await {
            Ok(folder) => {
                self.view.write().await.folders.upsert(folder.clone());
                info!(
                    user_id = ?self.ctx.user_id,
                    folder_id = %folder.id,
                    parent_id = ?folder.parent_id,
                    "Folder created"
                );
                self.ctx
                    .notify(Notification::success(format!("Folder '{}' created", folder.name)));
                Ok(folder)
            }
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_folders_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    /// Delete a folder with everything below it, after confirmation.
    ///
    /// Returns `false` when the confirmation was declined.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let Some(folder) = self.folder(id).await else {
            self.refresh_folders_quietly().await;
            return Err(self.fail(AppError::not_found("Folder not found")));
        };

        let prompt = format!(
            "Delete folder '{}' with all of its files and subfolders?",
            folder.name
        );
        if !self.ctx.confirm(&prompt) {
            debug!(folder_id = %id, "Folder delete declined");
            return Ok(false);
        }

        match self.api.delete_folder(id).await {
            Ok(()) => {
                let current_removed = {
                    let mut view = self.view.write().await;
                    let removed = view.folders.remove_subtree(id);
                    view.current.is_some_and(|current| removed.contains(&current))
                };
                info!(user_id = ?self.ctx.user_id, folder_id = %id, "Folder deleted");
                self.ctx
                    .notify(Notification::success(format!("Folder '{}' deleted", folder.name)));

                if current_removed
                    && let Err(err) = self.navigate(folder.parent_id).await
                {
                    warn!(error = %err, "Could not leave deleted folder");
                }
                self.refresh_stats_quietly().await;
                Ok(true)
            }
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_folders_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    /// Reparent a folder (None for root).
    ///
    /// The ancestor check runs locally before any request is issued.
    pub async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        self.check_folders(|folders| folders.validate_parent(id, parent_id))
            .await
            .map_err(|e| self.fail(e))?;

        match self.api.move_folder(id, parent_id).await {
            Ok(folder) => {
                self.view.write().await.folders.upsert(folder.clone());
                info!(
                    user_id = ?self.ctx.user_id,
                    folder_id = %id,
                    new_parent = ?parent_id,
                    "Folder moved"
                );
                self.ctx
                    .notify(Notification::success(format!("Folder '{}' moved", folder.name)));
                Ok(folder)
            }
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_folders_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    // ── File mutations ───────────────────────────────────────────────

    /// Edit file metadata.
    pub async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        update.validate().map_err(|e| self.fail(e))?;

        match self.api.update_file(id, update).await {
            Ok(updated) => {
                if self
                    .view
                    .write()
                    .await
                    .files
                    .replace_file(updated.clone())
                    .is_err()
                {
                    debug!(file_id = %id, "Updated file is not in the loaded listing");
                }
                info!(user_id = ?self.ctx.user_id, file_id = %id, "File updated");
                self.ctx
                    .notify(Notification::success(format!("File '{}' updated", updated.name)));
                Ok(updated)
            }
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_files_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    /// Delete one file, after confirmation.
    ///
    /// Returns `false` when the confirmation was declined.
    pub async fn delete_file(&self, id: FileId) -> AppResult<bool> {
        let known = self.view.read().await.files.get(id).cloned();
        let label = known
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_else(|| id.to_string());

        if !self.ctx.confirm(&format!("Delete file '{label}'?")) {
            debug!(file_id = %id, "File delete declined");
            return Ok(false);
        }

        match self.api.delete_file(id).await {
            Ok(()) => {
                {
                    let mut view = self.view.write().await;
                    view.selection.remove(id);
                    if let Ok(removed) = view.files.delete(id)
                        && let Some(folder_id) = removed.folder_id
                    {
                        view.folders.adjust_file_count(folder_id, -1);
                    }
                }
                if known.is_none() {
                    self.refresh_folders_quietly().await;
                }
                info!(user_id = ?self.ctx.user_id, file_id = %id, "File deleted");
                self.ctx
                    .notify(Notification::success(format!("File '{label}' deleted")));
                self.refresh_stats_quietly().await;
                Ok(true)
            }
            Err(err) => {
                if err.is_not_found() {
                    self.refresh_files_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    /// Upload into the active folder.
    pub async fn upload(&self, files: Vec<UploadBlob>) -> AppResult<Vec<MediaFile>> {
        let folder_id = self.current_folder().await;
        self.upload_to(folder_id, files).await
    }

    /// Upload into `folder_id` (None for root) as one all-or-nothing batch.
    ///
    /// Rejected while another batch is outstanding.
    pub async fn upload_to(
        &self,
        folder_id: Option<FolderId>,
        files: Vec<UploadBlob>,
    ) -> AppResult<Vec<MediaFile>> {
        let batch = UploadBatch::new(folder_id, files);

        match self.uploads.upload(self.api.as_ref(), batch).await {
            Ok(created) => {
                {
                    let mut view = self.view.write().await;
                    view.files.insert_batch(created.clone());
                    if let Some(folder_id) = folder_id {
                        view.folders
                            .adjust_file_count(folder_id, created.len() as i64);
                    }
                }
                info!(
                    user_id = ?self.ctx.user_id,
                    folder_id = ?folder_id,
                    count = created.len(),
                    "Files uploaded"
                );
                let message = match created.as_slice() {
                    [single] => format!("Uploaded '{}'", single.name),
                    many => format!("Uploaded {} files", many.len()),
                };
                self.ctx.notify(Notification::success(message));
                self.refresh_stats_quietly().await;
                Ok(created)
            }
            Err(err) => {
                if err.has_kind(ErrorKind::NotFound) {
                    self.refresh_folders_quietly().await;
                }
                Err(self.fail(err))
            }
        }
    }

    /// Whether an upload batch is outstanding.
    pub fn is_uploading(&self) -> bool {
        self.uploads.is_uploading()
    }

    /// Progress of the current or last upload.
    pub fn upload_progress(&self) -> u8 {
        self.uploads.progress()
    }

    /// Watch upload progress.
    pub fn subscribe_upload_progress(&self) -> watch::Receiver<u8> {
        self.uploads.subscribe()
    }

    /// Reset upload progress once the caller has seen the result.
    pub fn acknowledge_upload(&self) {
        self.uploads.acknowledge();
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Toggle a listed file. Returns whether it is now selected.
    pub async fn toggle_selection(&self, id: FileId) -> AppResult<bool> {
        let mut view = self.view.write().await;
        if !view.files.contains(id) {
            drop(view);
            return Err(self.fail(AppError::not_found("File is not in the current listing")));
        }
        Ok(view.selection.toggle(id))
    }

    /// Select every visible file. Returns how many are selected.
    pub async fn select_all_visible(&self) -> usize {
        let mut view = self.view.write().await;
        let visible: Vec<FileId> = view
            .files
            .list(view.current, &view.filter)
            .into_iter()
            .map(|f| f.id)
            .collect();
        view.selection.select_all(visible);
        view.selection.len()
    }

    /// Deselect everything.
    pub async fn clear_selection(&self) {
        self.view.write().await.selection.clear();
    }

    /// Selected file ids.
    pub async fn selection(&self) -> Vec<FileId> {
        self.view.read().await.selection.snapshot()
    }

    /// Delete every selected file, after confirmation.
    ///
    /// Each delete is an independent request and failures do not stop the
    /// others. The selection is cleared afterwards either way. Returns
    /// `None` when nothing was selected or the confirmation was declined.
    pub async fn delete_selected(&self) -> Option<BulkDeleteSummary> {
        let ids = self.selection().await;
        if ids.is_empty() {
            return None;
        }
        if !self
            .ctx
            .confirm(&format!("Delete {} selected file(s)?", ids.len()))
        {
            debug!(count = ids.len(), "Bulk delete declined");
            return None;
        }

        let summary = selection::delete_all(self.api.as_ref(), ids).await;

        let stale = {
            let mut view = self.view.write().await;
            view.selection.clear();

            let gone = summary.succeeded.iter().copied().chain(
                summary
                    .failed
                    .iter()
                    .filter(|f| f.error.is_not_found())
                    .map(|f| f.id),
            );
            let mut removed = 0i64;
            for id in gone {
                if view.files.delete(id).is_ok() {
                    removed += 1;
                }
            }
            if let Some(folder_id) = view.files.scope() {
                view.folders.adjust_file_count(folder_id, -removed);
            }
            summary.failed.iter().any(|f| f.error.is_not_found())
        };

        if stale {
            self.refresh_files_quietly().await;
        }
        self.refresh_stats_quietly().await;

        info!(
            user_id = ?self.ctx.user_id,
            succeeded = summary.succeeded_count(),
            failed = summary.failed_count(),
            "Bulk delete applied"
        );
        let notification = if summary.is_complete() {
            Notification::success(summary.describe())
        } else {
            Notification::error(summary.describe())
        };
        self.ctx.notify(notification);
        Some(summary)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Report `err` to the notifier and hand it back.
    fn fail(&self, err: AppError) -> AppError {
        self.ctx.notify(Notification::error(err.message.clone()));
        err
    }

    /// Run `check` against the local folder tree. A NotFound answer reloads
    /// the folders once and checks again before giving up.
    async fn check_folders<T>(
        &self,
        check: impl Fn(&FolderTreeStore) -> AppResult<T>,
    ) -> AppResult<T> {
        let first = {
            let view = self.view.read().await;
            check(&view.folders)
        };
        match first {
            Err(err) if err.is_not_found() => {
                debug!(error = %err, "Folder unknown locally, reloading folders");
                self.refresh_folders_quietly().await;
                let view = self.view.read().await;
                check(&view.folders)
            }
            other => other,
        }
    }

    async fn current_generation(&self) -> (Option<FolderId>, u64) {
        let view = self.view.read().await;
        (view.current, self.generation.load(Ordering::Acquire))
    }

    /// Fetch the listing of `folder_id` and apply it if `generation` is
    /// still the latest.
    async fn load_files(&self, folder_id: Option<FolderId>, generation: u64) -> AppResult<bool> {
        let files = self.api.list_files(folder_id).await?;

        let mut view = self.view.write().await;
        let latest = self.generation.load(Ordering::Acquire);
        if latest != generation {
            debug!(folder_id = ?folder_id, generation, latest, "Discarding stale listing");
            return Ok(false);
        }

        view.files.replace(folder_id, files);
        let listed: BTreeSet<FileId> = view.files.all().iter().map(|f| f.id).collect();
        view.selection.retain_visible(&listed);
        Ok(true)
    }

    /// Replace the folder set. Returns whether the active folder vanished.
    async fn apply_folder_listing(&self, folders: Vec<Folder>) -> bool {
        let mut view = self.view.write().await;
        view.folders.replace_all(folders);
        view.current.is_some_and(|id| !view.folders.contains(id))
    }

    /// Reload the folder set without moving. Returns whether the active
    /// folder vanished.
    async fn reload_folders_quietly(&self) -> bool {
        match self.api.list_folders().await {
            Ok(folders) => self.apply_folder_listing(folders).await,
            Err(err) => {
                warn!(error = %err, "Folder refresh failed");
                false
            }
        }
    }

    /// Reload the folder set and leave the active folder if it vanished.
    async fn refresh_folders_quietly(&self) {
        if self.reload_folders_quietly().await
            && let Err(err) = self.navigate(None).await
        {
            warn!(error = %err, "Could not return to root");
        }
    }

    async fn refresh_files_quietly(&self) {
        let (folder_id, generation) = self.current_generation().await;
        if let Err(err) = self.load_files(folder_id, generation).await {
            warn!(folder_id = ?folder_id, error = %err, "File refresh failed");
        }
    }

    async fn refresh_stats_quietly(&self) {
        match self.api.get_stats().await {
            Ok(stats) => self.view.write().await.stats = Some(stats),
            Err(err) => warn!(error = %err, "Stats refresh failed"),
        }
    }
}

impl<A: MediaApi + ?Sized> std::fmt::Debug for MediaLibrary<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaLibrary")
            .field("ctx", &self.ctx)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("uploads", &self.uploads)
            .finish_non_exhaustive()
    }
}
