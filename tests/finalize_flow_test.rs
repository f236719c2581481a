use clubhub::db::repository;
use clubhub::error::AppError;
use clubhub::models::{MeetingStatus, NewMeetingRequest, TaskPriority, TaskStatus};
use clubhub::services::MeetingService;
use sqlx::SqlitePool;

async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite://:memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

async fn planned_meeting(pool: &SqlitePool) -> String {
    repository::insert_meeting(
        pool,
        NewMeetingRequest {
            title: "Weekly sync".to_string(),
            date: "2024-09-12".to_string(),
            goal: None,
            agenda_items: Vec::new(),
            planning_blocks: None,
        },
    )
    .await
    .expect("Failed to insert meeting")
    .id
}

// Seeded roster: u1 Alice (PRESIDENT), u2 Ben (BOARD), u3 Chloe, u4 Diego.

#[tokio::test]
async fn test_president_finalizes_and_generated_tasks_match_extraction() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;

    let notes = "Kickoff planning.\n\
                 ACTION: Book venue Assignee: Ben Due: 2024-09-01 Priority: HIGH\n\
                 ACTION: Email sponsors Assignee: Chloe\n";
    let service = MeetingService::new(pool.clone());
    let meeting = service
        .finalize(&meeting_id, "u1", notes)
        .await
        .expect("Finalize failed");

    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert_eq!(meeting.notes, notes);
    assert_eq!(meeting.generated_tasks.len(), 2);

    let tasks = repository::fetch_tasks(&pool).await.expect("Failed to fetch tasks");
    assert_eq!(tasks.len(), 2);

    // generated_tasks is exactly the ids of the extraction pass, in match order.
    let task_ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(meeting.generated_tasks, task_ids);
    assert!(tasks.iter().all(|t| t.meeting_id.as_deref() == Some(meeting_id.as_str())));
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Todo));

    assert_eq!(tasks[0].title, "Book venue");
    assert_eq!(tasks[0].assignee_id, "u2");
    assert_eq!(tasks[0].due_date.as_deref(), Some("2024-09-01"));
    assert_eq!(tasks[0].priority, TaskPriority::High);
    assert_eq!(tasks[1].title, "Email sponsors");
    assert_eq!(tasks[1].assignee_id, "u3");
    assert_eq!(tasks[1].priority, TaskPriority::Low);
}

#[tokio::test]
async fn test_finalizing_without_action_lines_completes_with_empty_set() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;

    let service = MeetingService::new(pool.clone());
    let meeting = service
        .finalize(&meeting_id, "u1", "Nothing actionable this week.")
        .await
        .expect("Finalize failed");

    assert_eq!(meeting.status, MeetingStatus::Completed);
    assert!(meeting.generated_tasks.is_empty());
    let tasks = repository::fetch_tasks(&pool).await.expect("Failed to fetch tasks");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_non_president_finalize_is_rejected_without_side_effects() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;

    let service = MeetingService::new(pool.clone());
    let err = service
        .finalize(&meeting_id, "u2", "ACTION: Sneaky task")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let meeting = repository::find_meeting_by_id(&pool, &meeting_id)
        .await
        .expect("Failed to fetch meeting")
        .expect("Meeting not found");
    assert_eq!(meeting.status, MeetingStatus::Planned);
    assert_eq!(meeting.notes, "");
    assert!(meeting.generated_tasks.is_empty());

    let tasks = repository::fetch_tasks(&pool).await.expect("Failed to fetch tasks");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_second_finalize_is_rejected_and_changes_nothing() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;

    let service = MeetingService::new(pool.clone());
    let first = service
        .finalize(&meeting_id, "u1", "ACTION: Book venue Assignee: Ben")
        .await
        .expect("Finalize failed");

    let err = service
        .finalize(&meeting_id, "u1", "ACTION: Another task")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let meeting = repository::find_meeting_by_id(&pool, &meeting_id)
        .await
        .expect("Failed to fetch meeting")
        .expect("Meeting not found");
    assert_eq!(meeting.generated_tasks, first.generated_tasks);
    assert_eq!(meeting.notes, first.notes);
    assert_eq!(meeting.status, MeetingStatus::Completed);

    let tasks = repository::fetch_tasks(&pool).await.expect("Failed to fetch tasks");
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_notes_editing_is_guarded_by_role_and_state() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;
    let service = MeetingService::new(pool.clone());

    // President can save drafts while the meeting is open.
    let meeting = service
        .save_notes(&meeting_id, "u1", "draft notes")
        .await
        .expect("Save notes failed");
    assert_eq!(meeting.notes, "draft notes");
    assert_eq!(meeting.status, MeetingStatus::Planned);

    // Members can read but never write official notes.
    let err = service.save_notes(&meeting_id, "u3", "graffiti").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // After finalization the notes are frozen, even for the president.
    service
        .finalize(&meeting_id, "u1", "final notes")
        .await
        .expect("Finalize failed");
    let err = service.save_notes(&meeting_id, "u1", "too late").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let meeting = repository::find_meeting_by_id(&pool, &meeting_id)
        .await
        .expect("Failed to fetch meeting")
        .expect("Meeting not found");
    assert_eq!(meeting.notes, "final notes");
}

#[tokio::test]
async fn test_unknown_meeting_or_actor_is_not_found() {
    let pool = setup_test_db().await;
    let meeting_id = planned_meeting(&pool).await;
    let service = MeetingService::new(pool.clone());

    let err = service.finalize("missing", "u1", "notes").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let err = service.finalize(&meeting_id, "ghost", "notes").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
