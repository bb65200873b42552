//! Integration tests for star note upserts.
//!
//! Require a running PostgreSQL; run with `cargo test -- --ignored`.

use stellaris_db::test_fixtures::TestDatabase;
use stellaris_db::StarNoteRepository;

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_toggle_creates_then_flips() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await.expect("test database");
    let notes = &test_db.db.notes;

    let created = notes.toggle_favorite(test_db.user_id, "Vega").await.unwrap();
    assert!(created.is_favorite);
    assert_eq!(created.story_chapter, "");

    let flipped = notes.toggle_favorite(test_db.user_id, "Vega").await.unwrap();
    assert!(!flipped.is_favorite);
    assert_eq!(flipped.created_at, created.created_at);

    test_db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_save_overwrites_and_forces_favorite() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await.expect("test database");
    let notes = &test_db.db.notes;

    notes.toggle_favorite(test_db.user_id, "Deneb").await.unwrap();
    notes.toggle_favorite(test_db.user_id, "Deneb").await.unwrap();
    notes
        .save(test_db.user_id, "Deneb", "tail of the swan")
        .await
        .unwrap();

    let listed = notes.list_for_user(test_db.user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].is_favorite);
    assert_eq!(listed[0].story_chapter, "tail of the swan");

    test_db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_missing_is_noop() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await.expect("test database");
    let notes = &test_db.db.notes;

    assert!(!notes.delete(test_db.user_id, "Nowhere").await.unwrap());
    notes.save(test_db.user_id, "Altair", "").await.unwrap();
    assert!(notes.delete(test_db.user_id, "Altair").await.unwrap());
    assert!(notes.list_for_user(test_db.user_id).await.unwrap().is_empty());

    test_db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_list_recent_orders_by_update() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await.expect("test database");
    let notes = &test_db.db.notes;

    notes.save(test_db.user_id, "Antares", "").await.unwrap();
    notes.save(test_db.user_id, "Spica", "").await.unwrap();
    notes.save(test_db.user_id, "Antares", "updated").await.unwrap();

    let names: Vec<_> = notes
        .list_recent(test_db.user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.star_name)
        .collect();
    assert_eq!(names, vec!["Antares", "Spica"]);

    test_db.cleanup().await.unwrap();
}
