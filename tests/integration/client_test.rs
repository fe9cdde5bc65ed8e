//! Integration tests for the HTTP client and the library over a live server.

mod helpers;

use std::sync::Arc;

use mediadesk_client::HttpMediaApi;
use mediadesk_core::error::ErrorKind;
use mediadesk_core::types::{FileId, UserId};
use mediadesk_entity::{FileFilter, FileType, UpdateFileMetadata, UploadBatch, UploadBlob};
use mediadesk_library::{
    AutoConfirm, LibraryContext, MediaApi, MediaLibrary, ProgressReporter, RecordingNotifier,
};

fn client(server: &helpers::LiveServer) -> HttpMediaApi {
    HttpMediaApi::new(&server.client).unwrap()
}

#[tokio::test]
async fn test_health_over_the_wire() {
    let server = helpers::LiveServer::start().await;

    let health = client(&server).health().await.unwrap();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_folder_round_trip() {
    let server = helpers::LiveServer::start().await;
    let api = client(&server);

    let brand = api
        .create_folder(mediadesk_entity::CreateFolder {
            name: "Brand".into(),
            parent_id: None,
        })
        .await
        .unwrap();
    let logos = api
        .create_folder(mediadesk_entity::CreateFolder {
            name: "Logos".into(),
            parent_id: Some(brand.id),
        })
        .await
        .unwrap();

    let folders = api.list_folders().await.unwrap();
    assert_eq!(folders.len(), 2);

    let err = api.move_folder(brand.id, Some(logos.id)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    api.delete_folder(brand.id).await.unwrap();
    assert!(api.list_folders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_not_found_survives_the_wire() {
    let server = helpers::LiveServer::start().await;
    let api = client(&server);

    let err = api.delete_file(FileId::new()).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "File not found");
}

#[tokio::test]
async fn test_upload_reports_progress_and_content_downloads() {
    let server = helpers::LiveServer::start().await;
    let user = UserId::new();
    let api = client(&server).with_user(user);
    let progress = ProgressReporter::new();

    let data = vec![7u8; 200 * 1024];
    let batch = UploadBatch::new(
        None,
        vec![
            UploadBlob::guessed("hero.jpg", data.clone()),
            UploadBlob::new("notes.txt", "text/plain", "hello"),
        ],
    );
    let created = api.upload(batch, progress.clone()).await.unwrap();

    assert_eq!(created.len(), 2);
    assert!(progress.current() >= 90);
    let hero = created.iter().find(|f| f.name == "hero.jpg").unwrap();
    assert_eq!(hero.file_type, FileType::Image);
    assert_eq!(hero.uploaded_by, Some(user));

    let content = api.fetch_content(hero.id).await.unwrap();
    assert_eq!(content.mime_type, "image/jpeg");
    assert_eq!(content.data.len(), data.len());

    let images = api
        .list_files_filtered(None, &FileFilter::all().with_type(FileType::Image))
        .await
        .unwrap();
    assert_eq!(images.len(), 1);

    let stats = api.get_stats().await.unwrap();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_size, data.len() as u64 + 5);
}

#[tokio::test]
async fn test_update_validation_error_keeps_kind() {
    let server = helpers::LiveServer::start().await;
    let api = client(&server);
    let created = api
        .upload(
            UploadBatch::new(None, vec![UploadBlob::guessed("a.png", "png")]),
            ProgressReporter::new(),
        )
        .await
        .unwrap();

    let err = api
        .update_file(created[0].id, &UpdateFileMetadata::rename("x".repeat(300)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpMediaApi::new(&mediadesk_core::config::ClientConfig {
        base_url: format!("http://{addr}"),
        ..Default::default()
    })
    .unwrap();

    let err = api.list_folders().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}

#[tokio::test]
async fn test_library_over_http() {
    let server = helpers::LiveServer::start().await;
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = LibraryContext::new(notifier.clone(), Arc::new(AutoConfirm::yes()));
    let library = MediaLibrary::new(Arc::new(client(&server)), ctx);
    library.open().await.unwrap();

    let brand = library.create_folder("Brand", None).await.unwrap();
    assert!(library.navigate(Some(brand.id)).await.unwrap());

    let created = library
        .upload(vec![
            UploadBlob::guessed("one.png", "1"),
            UploadBlob::guessed("two.png", "22"),
            UploadBlob::guessed("three.pdf", "333"),
        ])
        .await
        .unwrap();
    assert_eq!(created.len(), 3);
    assert_eq!(library.upload_progress(), 100);
    assert_eq!(library.folder(brand.id).await.unwrap().file_count, 3);

    library.select_all_visible().await;
    let summary = library.delete_selected().await.unwrap();
    assert_eq!(summary.succeeded_count(), 3);
    assert!(library.visible_files().await.is_empty());
    assert!(library.selection().await.is_empty());

    let stats = library.refresh_stats().await.unwrap();
    assert_eq!(stats.total_files, 0);

    let messages: Vec<String> = notifier.all().into_iter().map(|n| n.message).collect();
    assert!(messages.contains(&"Uploaded 3 files".to_string()));
    assert!(messages.contains(&"Deleted 3 file(s)".to_string()));
}

#[tokio::test]
async fn test_library_refreshes_after_remote_delete() {
    let server = helpers::LiveServer::start().await;
    let api = Arc::new(client(&server));
    let uploaded = api
        .upload(
            UploadBatch::new(
                None,
                vec![UploadBlob::guessed("a.png", "a"), UploadBlob::guessed("b.png", "b")],
            ),
            ProgressReporter::new(),
        )
        .await
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = LibraryContext::new(notifier.clone(), Arc::new(AutoConfirm::yes()));
    let library = MediaLibrary::new(Arc::clone(&api), ctx);
    library.open().await.unwrap();
    assert_eq!(library.visible_files().await.len(), 2);

    // Someone else removes the file behind the library's back.
    api.delete_file(uploaded[0].id).await.unwrap();

    let err = library
        .update_file(uploaded[0].id, &UpdateFileMetadata::rename("renamed.png"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(library.visible_files().await.len(), 1);
    assert_eq!(notifier.errors(), ["File not found"]);
}
