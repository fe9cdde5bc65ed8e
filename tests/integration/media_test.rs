//! Integration tests for the media REST surface.

mod helpers;

use http::StatusCode;
use serde_json::json;

use mediadesk_core::config::AppConfig;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = helpers::TestApp::new();
    let brand = app.create_folder("Brand", None).await;
    app.create_folder("Logos", Some(&brand)).await;

    let response = app.request("GET", "/api/media/folders", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let folders = response.data().as_array().unwrap();
    assert_eq!(folders.len(), 2);
    let logos = folders.iter().find(|f| f["name"] == "Logos").unwrap();
    assert_eq!(logos["parent_id"], brand.as_str());
}

#[tokio::test]
async fn test_create_folder_records_acting_user() {
    let app = helpers::TestApp::new();
    let user = "0190a7c4-1b2c-7d3e-8f40-123456789abc";

    let response = app
        .request_as("POST", "/api/media/folders", Some(json!({ "name": "Press" })), Some(user))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["created_by"], user);
}

#[tokio::test]
async fn test_invalid_user_header_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request_as("POST", "/api/media/folders", Some(json!({ "name": "Press" })), Some("admin"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_duplicate_sibling_name_conflicts() {
    let app = helpers::TestApp::new();
    app.create_folder("Brand", None).await;

    let response = app
        .request("POST", "/api/media/folders", Some(json!({ "name": "brand" })))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_blank_folder_name_rejected() {
    let app = helpers::TestApp::new();

    for name in ["", "   "] {
        let response = app
            .request("POST", "/api/media/folders", Some(json!({ "name": name })))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "name {name:?}");
    }
}

#[tokio::test]
async fn test_missing_parent_is_not_found() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/media/folders",
            Some(json!({ "name": "Orphan", "parent_id": "0190a7c4-0000-7000-8000-000000000000" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Parent folder not found");
}

#[tokio::test]
async fn test_upload_and_list_files() {
    let app = helpers::TestApp::new();
    let brand = app.create_folder("Brand", None).await;

    let response = app
        .upload(
            &brand,
            &[
                ("logo.png", "image/png", b"png-bytes"),
                ("guide.pdf", "application/octet-stream", b"%PDF-1.7"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let created = response.data().as_array().unwrap();
    assert_eq!(created.len(), 2);
    let guide = created.iter().find(|f| f["name"] == "guide.pdf").unwrap();
    assert_eq!(guide["mime_type"], "application/pdf");
    assert_eq!(guide["file_type"], "document");

    let listed = app
        .request("GET", &format!("/api/media/files?folder_id={brand}"), None)
        .await;
    assert_eq!(listed.data().as_array().unwrap().len(), 2);

    let root = app.request("GET", "/api/media/files?folder_id=root", None).await;
    assert!(root.data().as_array().unwrap().is_empty());

    let folders = app.request("GET", "/api/media/folders", None).await;
    assert_eq!(folders.data()[0]["file_count"], 2);
}

#[tokio::test]
async fn test_list_files_filters() {
    let app = helpers::TestApp::new();
    app.upload(
        "root",
        &[
            ("Hero Banner.jpg", "image/jpeg", b"a"),
            ("banner-intro.mp4", "video/mp4", b"b"),
            ("notes.txt", "text/plain", b"c"),
        ],
    )
    .await;

    let by_type = app.request("GET", "/api/media/files?type=image", None).await;
    let names: Vec<&str> = by_type
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Hero Banner.jpg"]);

    let by_search = app.request("GET", "/api/media/files?search=BANNER", None).await;
    assert_eq!(by_search.data().as_array().unwrap().len(), 2);

    let both = app
        .request("GET", "/api/media/files?search=banner&type=video", None)
        .await;
    assert_eq!(both.data()[0]["name"], "banner-intro.mp4");

    let bad = app.request("GET", "/api/media/files?type=spreadsheet", None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_batch_is_all_or_nothing() {
    let mut config = AppConfig::default();
    config.upload.max_upload_size_bytes = 4;
    let app = helpers::TestApp::with_config(config);

    let response = app
        .upload(
            "root",
            &[("ok.png", "image/png", b"1234"), ("big.png", "image/png", b"12345")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let listed = app.request("GET", "/api/media/files", None).await;
    assert!(listed.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_into_missing_folder() {
    let app = helpers::TestApp::new();

    let response = app
        .upload(
            "0190a7c4-0000-7000-8000-000000000000",
            &[("logo.png", "image/png", b"png")],
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Target folder not found");
}

#[tokio::test]
async fn test_update_file_metadata() {
    let app = helpers::TestApp::new();
    let uploaded = app.upload("root", &[("logo.png", "image/png", b"png")]).await;
    let id = uploaded.data()[0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/media/files/{id}"),
            Some(json!({ "name": "Logo (dark)", "alt_text": "Company logo" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Logo (dark)");
    assert_eq!(response.data()["original_name"], "logo.png");
    assert_eq!(response.data()["alt_text"], "Company logo");

    let too_long = app
        .request(
            "PUT",
            &format!("/api/media/files/{id}"),
            Some(json!({ "alt_text": "x".repeat(1001) })),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_file_content_and_delete() {
    let app = helpers::TestApp::new();
    let uploaded = app.upload("root", &[("clip.mp4", "video/mp4", b"\x00\x01video")]).await;
    let id = uploaded.data()[0]["id"].as_str().unwrap().to_string();

    let content = app
        .request("GET", &format!("/api/media/files/{id}/content"), None)
        .await;
    assert_eq!(content.status, StatusCode::OK);
    assert_eq!(content.content_type.as_deref(), Some("video/mp4"));
    assert_eq!(&content.raw[..], b"\x00\x01video");

    let deleted = app
        .request("DELETE", &format!("/api/media/files/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/api/media/files/{id}"), None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], "NOT_FOUND");
    assert_eq!(again.body["message"], "File not found");

    let gone = app
        .request("GET", &format!("/api/media/files/{id}/content"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = helpers::TestApp::new();

    let response = app.request("DELETE", "/api/media/files/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats() {
    let app = helpers::TestApp::new();
    app.upload(
        "root",
        &[
            ("a.png", "image/png", &[0u8; 100]),
            ("b.txt", "text/plain", &[0u8; 200]),
        ],
    )
    .await;

    let response = app.request("GET", "/api/media/stats", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_files"], 2);
    assert_eq!(response.data()["total_size"], 300);
    assert_eq!(response.data()["files_by_type"]["image"], 1);
    assert_eq!(response.data()["files_by_type"]["document"], 1);
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let app = helpers::TestApp::new();
    let brand = app.create_folder("Brand", None).await;
    let logos = app.create_folder("Logos", Some(&brand)).await;
    app.create_folder("Press", None).await;
    app.upload(&logos, &[("logo.png", "image/png", b"png")]).await;
    app.upload(&brand, &[("guide.pdf", "application/pdf", b"pdf")]).await;

    let response = app
        .request("DELETE", &format!("/api/media/folders/{brand}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Folder deleted with 2 file(s)");

    let folders = app.request("GET", "/api/media/folders", None).await;
    let folders = folders.data().as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "Press");

    let stats = app.request("GET", "/api/media/stats", None).await;
    assert_eq!(stats.data()["total_files"], 0);
}

#[tokio::test]
async fn test_move_folder() {
    let app = helpers::TestApp::new();
    let brand = app.create_folder("Brand", None).await;
    let logos = app.create_folder("Logos", Some(&brand)).await;
    let archive = app.create_folder("Archive", None).await;

    let moved = app
        .request(
            "PUT",
            &format!("/api/media/folders/{logos}/move"),
            Some(json!({ "parent_id": archive })),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.data()["parent_id"], archive.as_str());

    let to_root = app
        .request(
            "PUT",
            &format!("/api/media/folders/{logos}/move"),
            Some(json!({ "parent_id": null })),
        )
        .await;
    assert_eq!(to_root.status, StatusCode::OK);
    assert!(to_root.data()["parent_id"].is_null());
}

#[tokio::test]
async fn test_move_folder_into_descendant_conflicts() {
    let app = helpers::TestApp::new();
    let brand = app.create_folder("Brand", None).await;
    let logos = app.create_folder("Logos", Some(&brand)).await;
    let dark = app.create_folder("Dark", Some(&logos)).await;

    for target in [&brand, &dark] {
        let response = app
            .request(
                "PUT",
                &format!("/api/media/folders/{brand}/move"),
                Some(json!({ "parent_id": target })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/media/albums", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
