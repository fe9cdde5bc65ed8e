//! Integration tests for the media library over an in-process store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use mediadesk_core::error::ErrorKind;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId};
use mediadesk_entity::{
    CreateFolder, FileFilter, FileType, Folder, MediaFile, StatsSnapshot, UpdateFileMetadata,
    UploadBatch, UploadBlob,
};
use mediadesk_library::{
    AutoConfirm, LibraryContext, LocalMediaApi, MediaApi, MediaLibrary, NotificationLevel,
    ProgressReporter, RecordingNotifier,
};
use mediadesk_store::MemoryMediaStore;

struct Harness {
    library: Arc<MediaLibrary<LocalMediaApi>>,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    async fn new() -> Self {
        Self::with_confirmer(AutoConfirm::yes()).await
    }

    async fn with_confirmer(confirmer: AutoConfirm) -> Self {
        let api = Arc::new(LocalMediaApi::new(MemoryMediaStore::default()));
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = LibraryContext::new(notifier.clone(), Arc::new(confirmer));
        let library = Arc::new(MediaLibrary::new(api, ctx));
        library.open().await.unwrap();
        Self { library, notifier }
    }

    fn store(&self) -> &MemoryMediaStore {
        self.library.api().store()
    }
}

fn png(name: &str, size: usize) -> UploadBlob {
    UploadBlob::new(name, "image/png", vec![0u8; size])
}

#[tokio::test]
async fn test_breadcrumbs_follow_ancestor_chain() {
    let h = Harness::new().await;
    let p2 = h.library.create_folder("Projects", None).await.unwrap();
    let p1 = h.library.create_folder("Riverside", Some(p2.id)).await.unwrap();
    let f = h.library.create_folder("Photos", Some(p1.id)).await.unwrap();

    assert!(h.library.navigate(Some(f.id)).await.unwrap());

    let crumbs: Vec<FolderId> = h.library.breadcrumbs().await.iter().map(|f| f.id).collect();
    assert_eq!(crumbs, vec![p2.id, p1.id, f.id]);

    let trail: Vec<Option<FolderId>> = h
        .library
        .trail(Some(f.id))
        .await
        .iter()
        .map(|c| c.target())
        .collect();
    assert_eq!(trail, vec![None, Some(p2.id), Some(p1.id), Some(f.id)]);

    assert!(h.library.navigate_up().await.unwrap());
    assert_eq!(h.library.current_folder().await, Some(p1.id));
}

#[tokio::test]
async fn test_navigation_clears_selection() {
    let h = Harness::new().await;
    let x = h.library.create_folder("X", None).await.unwrap();
    let y = h.library.create_folder("Y", None).await.unwrap();

    h.library.navigate(Some(x.id)).await.unwrap();
    let files = h
        .library
        .upload(vec![png("a.png", 10), png("b.png", 10)])
        .await
        .unwrap();
    for file in &files {
        assert!(h.library.toggle_selection(file.id).await.unwrap());
    }
    assert_eq!(h.library.selection().await.len(), 2);

    h.library.navigate(Some(y.id)).await.unwrap();
    assert!(h.library.selection().await.is_empty());
}

#[tokio::test]
async fn test_bulk_delete_is_best_effort() {
    let h = Harness::new().await;
    let files = h
        .library
        .upload(vec![png("a.png", 1), png("b.png", 1), png("c.png", 1)])
        .await
        .unwrap();
    assert_eq!(h.library.select_all_visible().await, 3);

    // Someone else removes one file first.
    h.store().delete_file(files[1].id).await.unwrap();

    let summary = h.library.delete_selected().await.unwrap();
    assert_eq!(summary.succeeded_count(), 2);
    assert_eq!(summary.failed_count(), 1);
    assert_eq!(summary.failed[0].id, files[1].id);
    assert!(summary.failed[0].error.is_not_found());

    assert!(h.library.selection().await.is_empty());
    assert!(h.library.visible_files().await.is_empty());
    assert!(h.store().list_files(None, &FileFilter::all()).await.unwrap().is_empty());

    let last = h.notifier.all().pop().unwrap();
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, "Deleted 2 file(s), 1 failed");
}

#[tokio::test]
async fn test_rename_round_trip() {
    let h = Harness::new().await;
    let original = h.library.upload(vec![png("old.png", 5)]).await.unwrap().remove(0);

    h.library
        .update_file(original.id, &UpdateFileMetadata::rename("new.png"))
        .await
        .unwrap();

    let listed = h.library.visible_files().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(
        MediaFile {
            updated_at: original.updated_at,
            ..listed[0].clone()
        },
        MediaFile {
            name: "new.png".into(),
            ..original
        }
    );
}

#[tokio::test]
async fn test_stats_after_upload() {
    let h = Harness::new().await;
    h.library
        .upload(vec![png("a.png", 100), png("b.png", 200)])
        .await
        .unwrap();

    for stats in [h.library.stats().await.unwrap(), h.library.listing_stats().await] {
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_size, 300);
        assert_eq!(stats.files_by_type.image, 2);
    }
    assert_eq!(h.library.upload_progress(), 100);
    h.library.acknowledge_upload();
    assert_eq!(h.library.upload_progress(), 0);
}

#[tokio::test]
async fn test_filter_applies_to_visible_files() {
    let h = Harness::new().await;
    h.library
        .upload(vec![
            png("logo.png", 1),
            UploadBlob::guessed("logo.pdf", vec![1u8]),
            png("banner.png", 1),
        ])
        .await
        .unwrap();

    h.library
        .set_filter(FileFilter::all().with_search("LOGO").with_type(FileType::Image))
        .await;
    let names: Vec<String> = h.library.visible_files().await.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["logo.png".to_string()]);
}

#[tokio::test]
async fn test_declined_confirmation_issues_nothing() {
    let h = Harness::with_confirmer(AutoConfirm::no()).await;
    let folder = h.library.create_folder("Keep", None).await.unwrap();
    let file = h.library.upload(vec![png("keep.png", 1)]).await.unwrap().remove(0);

    assert!(!h.library.delete_file(file.id).await.unwrap());
    assert!(!h.library.delete_folder(folder.id).await.unwrap());
    h.library.toggle_selection(file.id).await.unwrap();
    assert!(h.library.delete_selected().await.is_none());

    assert!(h.store().find_file(file.id).await.unwrap().is_some());
    assert!(h.store().find_folder(folder.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_move_into_descendant_is_rejected_locally() {
    let h = Harness::new().await;
    let a = h.library.create_folder("a", None).await.unwrap();
    let b = h.library.create_folder("b", Some(a.id)).await.unwrap();

    let err = h.library.move_folder(a.id, Some(b.id)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(h.store().find_folder(a.id).await.unwrap().unwrap().parent_id, None);
    assert_eq!(h.notifier.errors().len(), 1);

    let moved = h.library.move_folder(b.id, None).await.unwrap();
    assert_eq!(moved.parent_id, None);
}

#[tokio::test]
async fn test_empty_folder_name_never_reaches_store() {
    let h = Harness::new().await;
    let err = h.library.create_folder("   ", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(h.store().list_folders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_ancestor_of_current_folder_leaves_it() {
    let h = Harness::new().await;
    let top = h.library.create_folder("top", None).await.unwrap();
    let inner = h.library.create_folder("inner", Some(top.id)).await.unwrap();
    h.library.navigate(Some(inner.id)).await.unwrap();
    h.library.upload(vec![png("x.png", 1)]).await.unwrap();

    assert!(h.library.delete_folder(top.id).await.unwrap());
    assert_eq!(h.library.current_folder().await, None);
    assert!(h.library.folders().await.is_empty());
    assert_eq!(h.library.stats().await.unwrap().total_files, 0);
}

#[tokio::test]
async fn test_not_found_refreshes_listing() {
    let h = Harness::new().await;
    let file = h.library.upload(vec![png("gone.png", 1)]).await.unwrap().remove(0);
    h.store().delete_file(file.id).await.unwrap();

    let err = h
        .library
        .update_file(file.id, &UpdateFileMetadata::rename("x.png"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(h.library.visible_files().await.is_empty());
    assert_eq!(h.notifier.errors(), vec!["File not found".to_string()]);
}

#[tokio::test]
async fn test_folders_created_elsewhere_are_picked_up() {
    let h = Harness::new().await;
    let remote = |name: &str, parent_id| CreateFolder {
        name: name.to_string(),
        parent_id,
    };
    let outside = h.store().create_folder(remote("Remote", None), None).await.unwrap();
    assert!(h.library.folder(outside.id).await.is_none());

    assert!(h.library.navigate(Some(outside.id)).await.unwrap());
    assert_eq!(h.library.current_folder().await, Some(outside.id));
    assert!(h.library.folder(outside.id).await.is_some());

    let parent = h.store().create_folder(remote("Archive", None), None).await.unwrap();
    let child = h
        .library
        .create_folder("2024", Some(parent.id))
        .await
        .unwrap();
    assert_eq!(child.parent_id, Some(parent.id));

    let loose = h.store().create_folder(remote("Loose", None), None).await.unwrap();
    let moved = h.library.move_folder(loose.id, Some(parent.id)).await.unwrap();
    assert_eq!(moved.parent_id, Some(parent.id));
    assert!(h.notifier.errors().is_empty());

    let err = h.library.navigate(Some(FolderId::new())).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_rejected_batch_is_upload_error() {
    let api = Arc::new(LocalMediaApi::new(MemoryMediaStore::new(
        mediadesk_core::config::UploadConfig {
            max_upload_size_bytes: 10,
            ..Default::default()
        },
    )));
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = LibraryContext::new(notifier.clone(), Arc::new(AutoConfirm::yes()));
    let library = MediaLibrary::new(api, ctx);
    library.open().await.unwrap();

    let err = library.upload(vec![png("poster.png", 100)]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Upload);
    assert!(err.has_kind(ErrorKind::Validation));
    assert_eq!(notifier.errors(), vec![err.message.clone()]);
    assert!(!library.is_uploading());
    assert!(library.visible_files().await.is_empty());
}

#[tokio::test]
async fn test_mutations_notify_success() {
    let h = Harness::new().await;
    h.notifier.take();
    let folder = h.library.create_folder("Brand", None).await.unwrap();
    h.library.upload_to(Some(folder.id), vec![png("logo.png", 1)]).await.unwrap();

    let messages: Vec<String> = h.notifier.take().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec!["Folder 'Brand' created".to_string(), "Uploaded 'logo.png'".to_string()]
    );
    assert_eq!(h.library.folder(folder.id).await.unwrap().file_count, 1);
}

/// Holds `list_files` for one folder until released.
struct SlowListingApi {
    inner: LocalMediaApi,
    slow_folder: Mutex<Option<FolderId>>,
    started: Notify,
    release: Notify,
}

#[async_trait]
impl MediaApi for SlowListingApi {
    async fn list_files(&self, folder_id: Option<FolderId>) -> AppResult<Vec<MediaFile>> {
        let slow = *self.slow_folder.lock().unwrap();
        if folder_id.is_some() && folder_id == slow {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.inner.list_files(folder_id).await
    }

    async fn list_folders(&self) -> AppResult<Vec<Folder>> {
        self.inner.list_folders().await
    }

    async fn get_stats(&self) -> AppResult<StatsSnapshot> {
        self.inner.get_stats().await
    }

    async fn upload(&self, batch: UploadBatch, progress: ProgressReporter) -> AppResult<Vec<MediaFile>> {
        self.inner.upload(batch, progress).await
    }

    async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder> {
        self.inner.create_folder(req).await
    }

    async fn move_folder(&self, id: FolderId, parent_id: Option<FolderId>) -> AppResult<Folder> {
        self.inner.move_folder(id, parent_id).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        self.inner.delete_folder(id).await
    }

    async fn delete_file(&self, id: FileId) -> AppResult<()> {
        self.inner.delete_file(id).await
    }

    async fn update_file(&self, id: FileId, update: &UpdateFileMetadata) -> AppResult<MediaFile> {
        self.inner.update_file(id, update).await
    }
}

#[tokio::test]
async fn test_stale_listing_is_discarded() {
    let api = Arc::new(SlowListingApi {
        inner: LocalMediaApi::new(MemoryMediaStore::default()),
        slow_folder: Mutex::new(None),
        started: Notify::new(),
        release: Notify::new(),
    });
    let library = Arc::new(MediaLibrary::new(api.clone(), LibraryContext::unattended()));
    library.open().await.unwrap();

    let x = library.create_folder("X", None).await.unwrap();
    let y = library.create_folder("Y", None).await.unwrap();
    library.upload_to(Some(x.id), vec![png("x.png", 1)]).await.unwrap();
    library.upload_to(Some(y.id), vec![png("y.png", 1)]).await.unwrap();
    *api.slow_folder.lock().unwrap() = Some(x.id);

    let slow = tokio::spawn({
        let library = library.clone();
        async move { library.navigate(Some(x.id)).await }
    });
    api.started.notified().await;

    assert!(library.navigate(Some(y.id)).await.unwrap());
    api.release.notify_one();
    assert!(!slow.await.unwrap().unwrap());

    assert_eq!(library.current_folder().await, Some(y.id));
    let names: Vec<String> = library.visible_files().await.into_iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["y.png".to_string()]);
}
