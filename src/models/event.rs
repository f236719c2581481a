use serde::{Deserialize, Serialize};

use crate::models::task::TaskPriority;

/// Lifecycle phase of an event, used by the officer-transition history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Planning,
    Live,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventIdeation {
    pub notes: Option<String>,
    pub goals: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub item: String,
    pub amount: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBudget {
    pub projected_total: Option<f64>,
    pub actual_total: Option<f64>,
    pub breakdown: Option<Vec<BudgetLine>>,
    pub notes: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventContact {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAttendance {
    pub projected: Option<i64>,
    pub actual: Option<i64>,
    pub notes: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventReflection {
    pub what_worked: Option<String>,
    pub what_didnt: Option<String>,
    pub improvements: Option<String>,
    pub metrics: Option<String>,
    pub completed_at: Option<String>,
}

/// A club event. `date` is a plain `YYYY-MM-DD` string, matched verbatim by
/// the calendar bucketizer. `copied_from_event_id` is set when the event was
/// created from a past event template; the reference is checked only at
/// creation time and tolerated if it later dangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub status: Option<EventStatus>,
    pub ideation: Option<EventIdeation>,
    pub budget: Option<EventBudget>,
    pub contacts: Option<Vec<EventContact>>,
    pub attendance: Option<EventAttendance>,
    pub reflection: Option<EventReflection>,
    pub copied_from_event_id: Option<String>,
    pub created_at: String,
}

/// Everything an event carries except its identity. Produced by the
/// creation form and by the template copy resolver; the repository assigns
/// `id` and `created_at` on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub status: Option<EventStatus>,
    pub ideation: Option<EventIdeation>,
    pub budget: Option<EventBudget>,
    pub contacts: Option<Vec<EventContact>>,
    pub attendance: Option<EventAttendance>,
    pub reflection: Option<EventReflection>,
    pub copied_from_event_id: Option<String>,
}

/// Inline task row on the event creation form. An empty assignee falls back
/// to the first seeded user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventTaskInput {
    pub title: String,
    #[serde(default)]
    pub assignee_id: String,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEventRequest {
    pub actor_id: String,
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    #[serde(default)]
    pub tasks: Vec<EventTaskInput>,
}
