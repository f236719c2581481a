use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::core::lifecycle;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Meeting, NewTaskRequest};

/// Orchestrates meeting mutations: load a snapshot, run the pure lifecycle
/// logic, persist whatever it returns. All validation happens before the
/// first write, so a rejected call leaves no trace.
pub struct MeetingService {
    db: SqlitePool,
}

impl MeetingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Finalize a PLANNED meeting: one extraction pass over the submitted
    /// notes, one task insert per draft in match order, then a single update
    /// that freezes the notes and records the generated ids.
    pub async fn finalize(
        &self,
        meeting_id: &str,
        actor_id: &str,
        notes: &str,
    ) -> Result<Meeting, AppError> {
        let meeting = repository::find_meeting_by_id(&self.db, meeting_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let actor = repository::find_user_by_id(&self.db, actor_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let users = repository::fetch_users(&self.db).await?;

        let outcome = lifecycle::finalize_meeting(&meeting, &actor, notes, &users)?;
        if outcome.drafts.is_empty() {
            warn!(
                "no ACTION: items found in notes for meeting {}; finalizing anyway",
                meeting_id
            );
        }

        let mut task_ids = Vec::with_capacity(outcome.drafts.len());
        for draft in outcome.drafts {
            let task = repository::insert_task(
                &self.db,
                NewTaskRequest {
                    title: draft.title,
                    assignee_id: draft.assignee_id,
                    priority: Some(draft.priority),
                    due_date: draft.due_date,
                    event_id: None,
                    meeting_id: Some(meeting.id.clone()),
                },
            )
            .await?;
            task_ids.push(task.id);
        }

        repository::complete_meeting(&self.db, meeting_id, &outcome.notes, &task_ids).await?;
        info!(
            "finalized meeting {} with {} generated tasks",
            meeting_id,
            task_ids.len()
        );

        repository::find_meeting_by_id(&self.db, meeting_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Save draft notes on a meeting that is still open for editing.
    pub async fn save_notes(
        &self,
        meeting_id: &str,
        actor_id: &str,
        notes: &str,
    ) -> Result<Meeting, AppError> {
        let meeting = repository::find_meeting_by_id(&self.db, meeting_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let actor = repository::find_user_by_id(&self.db, actor_id)
            .await?
            .ok_or(AppError::NotFound)?;

        lifecycle::authorize_notes_edit(&meeting, &actor)?;
        repository::update_meeting_notes(&self.db, meeting_id, notes).await?;

        repository::find_meeting_by_id(&self.db, meeting_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
