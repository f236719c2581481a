use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::core::template;
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Event, EventDraft, NewEventRequest, NewTaskRequest, Task, User, UserRole};

#[derive(Debug, Serialize)]
pub struct EventWithTasks {
    pub event: Event,
    pub tasks: Vec<Task>,
}

/// Event creation and template copying. Both require the elevated role and
/// validate everything before the first write.
pub struct EventService {
    db: SqlitePool,
}

impl EventService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, req: NewEventRequest) -> Result<EventWithTasks, AppError> {
        let actor = self.load_elevated_actor(&req.actor_id).await?;
        if req.title.trim().is_empty() || req.date.trim().is_empty() {
            return Err(AppError::BadRequest(
                "event title and date are required".to_string(),
            ));
        }

        let users = repository::fetch_users(&self.db).await?;
        let event = repository::insert_event(
            &self.db,
            EventDraft {
                title: req.title,
                date: req.date,
                location: req.location,
                description: req.description,
                semester: req.semester,
                academic_year: req.academic_year,
                ..EventDraft::default()
            },
        )
        .await?;

        let mut tasks = Vec::with_capacity(req.tasks.len());
        for input in req.tasks {
            let assignee_id = if input.assignee_id.is_empty() {
                // Unassigned form rows land on the first roster entry.
                users
                    .first()
                    .map(|u| u.id.clone())
                    .ok_or_else(|| AppError::BadRequest("no users seeded".to_string()))?
            } else {
                input.assignee_id
            };
            let task = repository::insert_task(
                &self.db,
                NewTaskRequest {
                    title: input.title,
                    assignee_id,
                    priority: input.priority,
                    due_date: input.due_date,
                    event_id: Some(event.id.clone()),
                    meeting_id: None,
                },
            )
            .await?;
            tasks.push(task);
        }

        info!("created event {} ({} tasks) by {}", event.id, tasks.len(), actor.id);
        Ok(EventWithTasks { event, tasks })
    }

    /// Create a new event (and fresh TODO tasks) from a past event. The
    /// source must exist at copy time; the recorded lineage is never checked
    /// again afterwards.
    pub async fn copy_from(
        &self,
        source_id: &str,
        actor_id: &str,
    ) -> Result<EventWithTasks, AppError> {
        let actor = self.load_elevated_actor(actor_id).await?;
        let source = repository::find_event_by_id(&self.db, source_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let all_tasks = repository::fetch_tasks(&self.db).await?;

        let (draft, task_drafts) = template::copy_event(&source, &all_tasks);
        let event = repository::insert_event(&self.db, draft).await?;

        let mut tasks = Vec::with_capacity(task_drafts.len());
        for draft in task_drafts {
            let task = repository::insert_task(
                &self.db,
                NewTaskRequest {
                    title: draft.title,
                    assignee_id: draft.assignee_id,
                    priority: Some(draft.priority),
                    due_date: draft.due_date,
                    event_id: Some(event.id.clone()),
                    meeting_id: None,
                },
            )
            .await?;
            tasks.push(task);
        }

        info!(
            "copied event {} -> {} ({} tasks) by {}",
            source_id,
            event.id,
            tasks.len(),
            actor.id
        );
        Ok(EventWithTasks { event, tasks })
    }

    async fn load_elevated_actor(&self, actor_id: &str) -> Result<User, AppError> {
        let actor = repository::find_user_by_id(&self.db, actor_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if actor.role != UserRole::President {
            return Err(AppError::Forbidden(
                "only the president can create events".to_string(),
            ));
        }
        Ok(actor)
    }
}
