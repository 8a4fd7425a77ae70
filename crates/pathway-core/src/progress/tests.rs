//! Tests for the progress tracker.

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::models::PlanStatus;

async fn create_test_tracker() -> (TempDir, ProgressTracker, ProfileStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Store::open(temp_dir.path().join("test.db"))
        .await
        .expect("Failed to open store");
    let profiles = ProfileStore::new(store.clone());
    (temp_dir, ProgressTracker::new(store, profiles.clone()), profiles)
}

#[test]
fn test_compute_progress_boundaries() {
    assert_eq!(compute_progress(0, 0), 0.0);
    assert!(!compute_progress(0, 3).is_nan());
    assert_eq!(compute_progress(4, 4), 100.0);
    assert_eq!(compute_progress(4, 2), 50.0);
}

#[tokio::test]
async fn test_load_progress_defaults_to_empty() {
    let (_temp_dir, tracker, _profiles) = create_test_tracker().await;
    let completed = tracker
        .load_progress(PlanId::new(1))
        .await
        .expect("load");
    assert!(completed.is_empty());
}

#[tokio::test]
async fn test_toggle_twice_restores_original_set() {
    let (_temp_dir, tracker, _profiles) = create_test_tracker().await;
    let plan_id = PlanId::new(7);
    tracker
        .toggle_step(plan_id, 0, "", 3)
        .await
        .expect("seed");
    let original = tracker.load_progress(plan_id).await.expect("load");

    let first = tracker
        .toggle_step(plan_id, 2, "Terraform", 3)
        .await
        .expect("toggle on");
    assert!(first.checked);
    let second = tracker
        .toggle_step(plan_id, 2, "Terraform", 3)
        .await
        .expect("toggle off");
    assert!(!second.checked);

    assert_eq!(second.completed, original);
    assert_eq!(tracker.load_progress(plan_id).await.expect("load"), original);
}

#[tokio::test]
async fn test_completing_a_step_unlocks_skill_once() {
    let (_temp_dir, tracker, profiles) = create_test_tracker().await;
    let plan_id = PlanId::new(3);

    let outcome = tracker
        .toggle_step(plan_id, 0, " Docker ", 2)
        .await
        .expect("toggle");
    assert_eq!(outcome.skill_unlocked.as_deref(), Some("Docker"));

    tracker.toggle_step(plan_id, 0, "Docker", 2).await.expect("uncheck");
    let again = tracker
        .toggle_step(plan_id, 0, "Docker", 2)
        .await
        .expect("recheck");
    assert_eq!(again.skill_unlocked, None);

    assert_eq!(profiles.load().await.expect("profile").skills, vec!["Docker"]);
}

#[tokio::test]
async fn test_unchecking_or_untitled_steps_do_not_touch_profile() {
    let (_temp_dir, tracker, profiles) = create_test_tracker().await;
    let plan_id = PlanId::new(4);

    let outcome = tracker.toggle_step(plan_id, 1, "   ", 2).await.expect("toggle");
    assert!(outcome.checked);
    assert_eq!(outcome.skill_unlocked, None);
    assert!(profiles.load().await.expect("profile").skills.is_empty());
}

#[tokio::test]
async fn test_last_step_signals_plan_completed() {
    let (_temp_dir, tracker, _profiles) = create_test_tracker().await;
    let plan_id = PlanId::new(9);

    let first = tracker.toggle_step(plan_id, 0, "A", 2).await.expect("first");
    assert!(!first.plan_completed);

    let last = tracker.toggle_step(plan_id, 1, "B", 2).await.expect("last");
    assert!(last.plan_completed);

    let undo = tracker.toggle_step(plan_id, 1, "B", 2).await.expect("undo");
    assert!(!undo.plan_completed);
}

#[tokio::test]
async fn test_toggle_rejects_out_of_range_index() {
    let (_temp_dir, tracker, _profiles) = create_test_tracker().await;

    let result = tracker.toggle_step(PlanId::new(1), 3, "x", 3).await;
    assert!(matches!(result, Err(PathwayError::InvalidInput { .. })));

    let empty = tracker.toggle_step(PlanId::new(1), 0, "x", 0).await;
    assert!(matches!(empty, Err(PathwayError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_plan_progress_ignores_stale_indices() {
    let (_temp_dir, tracker, _profiles) = create_test_tracker().await;
    let plan = CareerPlan {
        id: PlanId::new(12),
        target_role: "SRE".to_string(),
        current_role: "Dev".to_string(),
        status: PlanStatus::Complete,
        generated_content: Some(json!({"steps": [{"title": "A"}, {"title": "B"}]})),
    };
    tracker.toggle_step(plan.id, 1, "", 2).await.expect("toggle");
    tracker.toggle_step(plan.id, 0, "", 2).await.expect("toggle");

    let mut view = tracker.plan_progress(plan).await.expect("view");
    assert_eq!(view.steps.len(), 2);
    assert!(view.is_fully_completed());
    assert_eq!(view.percent(), 100.0);

    view.completed.insert(5);
    view.completed.remove(&0);
    assert_eq!(view.completed_count(), 1);
    assert_eq!(view.percent(), 50.0);
    assert!(view.is_step_done(1));
}
