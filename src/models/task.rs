use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    High,
}

/// A board task. `event_id`/`meeting_id` are weak references by id; a task
/// outlives whatever it points at and dangling references are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: String,
    pub due_date: Option<String>,
    pub event_id: Option<String>,
    pub meeting_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskRequest {
    pub title: String,
    pub assignee_id: String,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
    pub event_id: Option<String>,
    pub meeting_id: Option<String>,
}

/// The only task fields a caller may change after creation. Identity and
/// back-references are fixed at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<String>,
    pub due_date: Option<String>,
}

/// A task-to-be produced by the action-item extractor or the template copy
/// resolver. Ids and back-references are attached when the draft is
/// persisted, so callers can compare drafts by content alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub assignee_id: String,
    pub priority: TaskPriority,
    pub due_date: Option<String>,
}
