//! Integration tests for planner document persistence.

use chrono::{Duration, TimeZone, Utc};
use planner_core::{Feedback, PlannerData, PlannerStore, Task, TimeSlot};

fn morning() -> TimeSlot {
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
    TimeSlot::new(start, Duration::hours(1)).unwrap()
}

#[test]
fn test_filled_planning_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlannerStore::with_path(dir.path().join("planning.json"));

    let mut data = PlannerData::new();
    data.add_to_backlog(Task::new("mail").with_reference_duration(Duration::minutes(20)));
    data.add_to_backlog(
        Task::new("code")
            .with_reference_duration(Duration::minutes(40))
            .with_minimum_duration(Duration::minutes(15)),
    );
    let created = data.fill_planning(&morning(), Duration::minutes(30));
    data.planning
        .set_feedback(Feedback::CompletedWithoutProblem, created[0].id)
        .unwrap();
    store.save(&data).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.backlog.len(), 2);
    assert_eq!(loaded.planning.len(), created.len());

    let first = loaded.planning.get(created[0].id).unwrap();
    assert_eq!(first.time_slot, created[0].time_slot);
    assert_eq!(first.feedback, Some(Feedback::CompletedWithoutProblem));
    assert_eq!(first.task.reference_duration, Some(Duration::minutes(20)));
    assert_eq!(loaded.planning_feedback_score(&morning()), Some(0.5));
}

#[test]
fn test_document_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlannerStore::with_path(dir.path().join("planning.json"));

    let mut data = PlannerData::new();
    let task = data.add_to_backlog(Task::new("mail"));
    let scheduling = data.planning.schedule(&task, morning());
    data.planning
        .set_feedback(Feedback::NotDoneCorrectlyOrAtAll, scheduling.id)
        .unwrap();
    store.save(&data).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let saved = &json["planning"][0];
    assert_eq!(saved["id"], scheduling.id.to_string());
    assert_eq!(saved["task"]["name"], "mail");
    assert_eq!(saved["time_slot"]["duration"].as_f64(), Some(3600.0));
    assert_eq!(saved["feedback"], "not_done_correctly_or_at_all");
    assert_eq!(json["backlog"][0]["id"], task.id.to_string());
}

#[test]
fn test_invalid_slot_in_document_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.json");
    std::fs::write(
        &path,
        r#"{
            "planning": [{
                "id": "6f1c2d1e-8a5b-4c1a-9f3e-2b7d9c0e1a24",
                "task": { "id": "0a0b0c0d-0e0f-4a1b-8c2d-3e4f5a6b7c8d", "name": "broken" },
                "time_slot": { "start": "2024-05-06T08:00:00Z", "duration": 0.0 }
            }],
            "backlog": []
        }"#,
    )
    .unwrap();

    let data = PlannerStore::with_path(&path).load();
    assert!(data.planning.is_empty());
    assert!(data.backlog.is_empty());
}

#[test]
fn test_out_of_range_duration_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.json");
    std::fs::write(
        &path,
        r#"{
            "planning": [],
            "backlog": [{
                "id": "0a0b0c0d-0e0f-4a1b-8c2d-3e4f5a6b7c8d",
                "name": "forever",
                "reference_duration": -1e300
            }]
        }"#,
    )
    .unwrap();

    let data = PlannerStore::with_path(&path).load();
    assert!(data.planning.is_empty());
    assert!(data.backlog.is_empty());
}

#[test]
fn test_slot_ending_past_calendar_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.json");
    std::fs::write(
        &path,
        r#"{
            "planning": [{
                "id": "6f1c2d1e-8a5b-4c1a-9f3e-2b7d9c0e1a24",
                "task": { "id": "0a0b0c0d-0e0f-4a1b-8c2d-3e4f5a6b7c8d", "name": "endless" },
                "time_slot": { "start": "2024-01-01T00:00:00Z", "duration": 9e15 }
            }],
            "backlog": []
        }"#,
    )
    .unwrap();

    let data = PlannerStore::with_path(&path).load();
    assert!(data.planning.is_empty());
    assert_eq!(data.planning.most_recent_end(), None);
}
