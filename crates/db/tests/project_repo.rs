//! Integration tests for the MongoDB project store.
//!
//! Runs only when `MONGODB_TEST_URI` points at a reachable server; each test
//! works in its own throwaway database and drops it afterwards.

use assert_matches::assert_matches;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Database;
use staffhub_core::task_state::TaskState;
use staffhub_db::models::project::{NewProject, Task};
use staffhub_db::repositories::ProjectRepo;
use staffhub_db::store::ProjectStore;
use staffhub_db::StoreError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn test_database() -> Option<Database> {
    let Ok(uri) = std::env::var("MONGODB_TEST_URI") else {
        eprintln!("MONGODB_TEST_URI not set; skipping");
        return None;
    };
    let name = format!("staffhub_test_{}", ObjectId::new().to_hex());
    let db = staffhub_db::connect_documents(&uri, &name).await.unwrap();
    Some(db)
}

fn new_project(name: &str, employee_id: Option<i64>, completed: bool) -> NewProject {
    NewProject {
        name: name.to_string(),
        employee_id,
        completed,
        ..Default::default()
    }
}

fn task(title: &str) -> Task {
    Task {
        title: title.to_string(),
        state: TaskState::Pending,
        description: None,
        assigned_employee_id: None,
        start_date: None,
        due_date: None,
        completion_date: None,
        comments: None,
    }
}

// ---------------------------------------------------------------------------
// Compare-and-swap replace
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_replace_bumps_version_and_rejects_stale_copy() {
    let Some(db) = test_database().await else {
        return;
    };
    let repo = ProjectRepo::new(db.clone());

    let created = repo.insert(&new_project("P", None, false)).await.unwrap();
    assert_eq!(created.version, 0);

    let mut first = created.clone();
    first.tasks.push(task("a"));
    let saved = repo.replace(&first).await.unwrap();
    assert_eq!(saved.version, 1);

    // A second writer still holding version 0 loses.
    let mut stale = created.clone();
    stale.tasks.push(task("b"));
    let err = repo.replace(&stale).await.unwrap_err();
    assert_matches!(err, StoreError::VersionConflict { id } if id == created.id);

    let stored = repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.tasks, vec![task("a")]);

    db.drop().await.unwrap();
}

#[tokio::test]
async fn test_replace_accepts_legacy_document_without_version() {
    let Some(db) = test_database().await else {
        return;
    };
    let repo = ProjectRepo::new(db.clone());

    let oid = ObjectId::new();
    db.collection::<Document>("projects")
        .insert_one(doc! { "_id": oid, "name": "Legacy", "tasks": null })
        .await
        .unwrap();

    let legacy = repo.find_by_id(&oid.to_hex()).await.unwrap().unwrap();
    assert_eq!(legacy.version, 0);
    assert!(legacy.tasks.is_empty());

    let mut edited = legacy.clone();
    edited.name = "Renamed".into();
    let saved = repo.replace(&edited).await.unwrap();
    assert_eq!(saved.version, 1);

    // The document now carries version 1, so another version-0 write conflicts.
    assert_matches!(
        repo.replace(&legacy).await,
        Err(StoreError::VersionConflict { .. })
    );

    db.drop().await.unwrap();
}

#[tokio::test]
async fn test_replace_of_missing_document_conflicts() {
    let Some(db) = test_database().await else {
        return;
    };
    let repo = ProjectRepo::new(db.clone());

    let mut ghost = repo.insert(&new_project("Ghost", None, false)).await.unwrap();
    assert!(repo.delete(&ghost.id).await.unwrap());
    ghost.name = "Back".into();
    assert_matches!(
        repo.replace(&ghost).await,
        Err(StoreError::VersionConflict { .. })
    );

    db.drop().await.unwrap();
}

// ---------------------------------------------------------------------------
// Predicate reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_predicate_queries() {
    let Some(db) = test_database().await else {
        return;
    };
    let repo = ProjectRepo::new(db.clone());
    repo.ensure_indexes().await.unwrap();

    repo.insert(&new_project("Website (v2)", Some(1), false)).await.unwrap();
    repo.insert(&new_project("Mobile", Some(1), true)).await.unwrap();
    repo.insert(&new_project("website v2", Some(2), false)).await.unwrap();

    let by_employee = repo.find_by_employee(1).await.unwrap();
    assert_eq!(by_employee.len(), 2);

    let done = repo.find_by_employee_and_completed(1, true).await.unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].name, "Mobile");

    assert_eq!(repo.find_by_completed(false).await.unwrap().len(), 2);

    // Regex metacharacters in the term are matched literally.
    let found = repo.search_by_name("SITE (V2").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Website (v2)");

    assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    assert!(!repo.delete("not-an-object-id").await.unwrap());

    db.drop().await.unwrap();
}
