//! Note and observatory endpoints.

mod common;

use axum::http::StatusCode;

use common::{json_body, TestApp, TestUser};
use stellaris_core::mock::MockStarCatalog;

#[tokio::test]
async fn test_save_note_marks_favorite() {
    let app = TestApp::new(MockStarCatalog::new());
    let user = TestUser::new("ada");

    let response = app
        .send(user.post_json(
            "/api/v1/notes",
            serde_json::json!({ "star_name": "Deneb", "story_chapter": "tail of the swan" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let note = json_body(response).await;
    assert_eq!(note["is_favorite"], true);
    assert_eq!(note["story_chapter"], "tail of the swan");

    let listed = json_body(app.send(user.get("/api/v1/notes")).await).await;
    assert_eq!(listed["records"].as_array().unwrap().len(), 1);
    assert_eq!(listed["by_name"]["Deneb"]["story_chapter"], "tail of the swan");
}

#[tokio::test]
async fn test_save_note_without_text_stores_empty_narrative() {
    let app = TestApp::new(MockStarCatalog::new());
    let user = TestUser::new("ada");

    let note = json_body(
        app.send(user.post_json("/api/v1/notes", serde_json::json!({ "star_name": "Mira" })))
            .await,
    )
    .await;
    assert_eq!(note["story_chapter"], "");
}

#[tokio::test]
async fn test_delete_note_is_idempotent() {
    let app = TestApp::new(MockStarCatalog::new());
    let user = TestUser::new("ada");

    app.send(user.post_json("/api/v1/notes", serde_json::json!({ "star_name": "Altair" })))
        .await;

    let response = app.send(user.delete("/api/v1/notes/Altair")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.notes.is_empty());

    let response = app.send(user.delete("/api/v1/notes/Altair")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_note_with_encoded_name() {
    let app = TestApp::new(MockStarCatalog::new());
    let user = TestUser::new("ada");

    app.send(user.post_json(
        "/api/v1/notes",
        serde_json::json!({ "star_name": "Sirius A, B" }),
    ))
    .await;
    let response = app.send(user.delete("/api/v1/notes/Sirius%20A%2C%20B")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.notes.is_empty());
}

#[tokio::test]
async fn test_observatory_lists_most_recent_first() {
    let app = TestApp::new(MockStarCatalog::new());
    let user = TestUser::new("ada");

    for name in ["Antares", "Spica"] {
        app.send(user.post_json("/api/v1/stars/favorite", serde_json::json!({ "star_name": name })))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    app.send(user.post_json(
        "/api/v1/notes",
        serde_json::json!({ "star_name": "Antares", "story_chapter": "heart of the scorpion" }),
    ))
    .await;

    let notes = json_body(app.send(user.get("/api/v1/observatory")).await).await;
    let names: Vec<_> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["star_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Antares", "Spica"]);
}

#[tokio::test]
async fn test_notes_are_private_per_user() {
    let app = TestApp::new(MockStarCatalog::new());
    let ada = TestUser::new("ada");
    let grace = TestUser::new("grace");

    app.send(ada.post_json("/api/v1/notes", serde_json::json!({ "star_name": "Vega" })))
        .await;

    let listed = json_body(app.send(grace.get("/api/v1/notes")).await).await;
    assert!(listed["records"].as_array().unwrap().is_empty());
}
