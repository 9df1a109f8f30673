//! Integration tests for the key-value store and planner persistence.
//!
//! Tests cover:
//! - Planner collections surviving a close/reopen cycle
//! - Stored JSON layout
//! - Fallback to empty collections on missing or unreadable data

mod common;

use common::*;
use studydesk::core::db::{Persisted, flush};
use std::collections::BTreeMap;
use time::macros::datetime;

#[tokio::test]
async fn test_empty_store_loads_empty_planner() -> anyhow::Result<()> {
    let (planner, _temp_dir) = create_test_planner().await;

    assert!(planner.courses().is_empty());
    assert!(planner.assignments().is_empty());
    assert!(planner.sessions().is_empty());
    assert!(planner.store().keys().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_planner_persists_after_reopen() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join("planner.db");

    // 1. Create records and save
    let (course_id, assignment_id) = {
        let store = PlannerDb::open(&path).await?;
        let mut planner = Planner::load(store.clone()).await?;
        let course = planner.add_course(make_new_course("Linear Algebra", "MATH221"))?;
        let assignment = planner.add_assignment(make_new_assignment(
            "Eigenvalues",
            course.id,
            datetime!(2025-03-10 0:00),
            Priority::High,
            2.5,
        ))?;
        planner.set_assignment_status(assignment.id, Status::InProgress)?;
        planner.record_session(
            CompletedSession {
                assignment_id: Some(assignment.id),
                minutes: 25,
            },
            datetime!(2025-03-03 14:30 UTC),
        )?;
        planner.save().await?;
        assert!(!planner.has_pending());
        store.close().await?;
        (course.id, assignment.id)
    };

    // 2. Reopen from the same path
    let store = PlannerDb::open(&path).await?;
    let planner = Planner::load(store.clone()).await?;

    // 3. Everything came back
    assert_eq!(
        store.keys().await?,
        vec![ASSIGNMENTS_KEY, COURSES_KEY, SESSIONS_KEY]
    );
    let course = planner.course(course_id).expect("course should persist");
    assert_eq!(course.code, "MATH221");
    let assignment = planner.assignment(assignment_id).expect("assignment should persist");
    assert_eq!(assignment.status, Status::InProgress);
    assert_eq!(assignment.due_date, datetime!(2025-03-10 0:00));
    assert_eq!(planner.sessions().len(), 1);
    assert_eq!(planner.sessions()[0].started_at, datetime!(2025-03-03 14:30 UTC));
    Ok(())
}

#[tokio::test]
async fn test_stored_json_layout() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let mut planner = Planner::load(store.clone()).await?;
    let course = planner.add_course(make_new_course("Statistics", "STAT200"))?;
    planner.add_assignment(make_new_assignment(
        "Report",
        course.id,
        datetime!(2025-04-01 0:00),
        Priority::Low,
        1.5,
    ))?;
    planner.save().await?;

    let raw = store.read(ASSIGNMENTS_KEY).await?.expect("assignments written");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    let stored = &json[0];
    assert_eq!(stored["courseId"], course.id.to_string());
    assert_eq!(stored["dueDate"], "2025-04-01T00:00:00");
    assert_eq!(stored["priority"], "low");
    assert_eq!(stored["status"], "not_started");
    assert_eq!(stored["estimatedHours"], 1.5);

    let raw = store.read(COURSES_KEY).await?.expect("courses written");
    let json: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(json[0]["color"], "#3b82f6");
    assert_eq!(json[0]["isCompleted"], false);
    Ok(())
}

#[tokio::test]
async fn test_unreadable_value_falls_back_to_default() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.write(COURSES_KEY, "{not json").await?;
    store.write(SESSIONS_KEY, r#"{"wrong": "shape"}"#).await?;

    let planner = Planner::load(store.clone()).await?;
    assert!(planner.courses().is_empty());
    assert!(planner.sessions().is_empty());

    // Loading alone does not overwrite what was stored
    assert_eq!(store.read(COURSES_KEY).await?.as_deref(), Some("{not json"));
    Ok(())
}

#[tokio::test]
async fn test_each_set_produces_one_write() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let mut counter = Persisted::load(&store, "counter", 0u32).await?;
    assert_eq!(*counter.get(), 0);

    let first = counter.set(5)?;
    let second = counter.update(|n| *n += 1)?;
    assert_eq!(first.payload, "5");
    assert_eq!(second.payload, "6");

    // Writes land in order, so the last one wins
    flush(&store, vec![first, second]).await?;
    assert_eq!(store.read("counter").await?.as_deref(), Some("6"));

    let reloaded = Persisted::load(&store, "counter", 0u32).await?;
    assert_eq!(*reloaded.get(), 6);
    Ok(())
}

#[tokio::test]
async fn test_write_after_close_fails() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.write("key", "1").await?;
    store.close().await?;
    assert!(store.write("key", "2").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_upsert_replaces_value() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    store.write("key", "1").await?;
    store.write("key", "2").await?;
    assert_eq!(store.read("key").await?.as_deref(), Some("2"));
    assert_eq!(store.read("missing").await?, None);
    assert_eq!(store.keys().await?, vec!["key"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_update_keeps_previous_value() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    let mut scores: Persisted<BTreeMap<Vec<u8>, u32>> =
        Persisted::load(&store, "scores", BTreeMap::new()).await?;

    // JSON object keys must be strings, so this change cannot be written
    let result = scores.update(|map| {
        map.insert(vec![1, 2], 3);
    });

    assert!(result.is_err());
    assert!(scores.get().is_empty());
    assert_eq!(store.read("scores").await?, None);
    Ok(())
}
