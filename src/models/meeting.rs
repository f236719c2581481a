use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    Planned,
    // Present in stored data for compatibility; no transition produces it.
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaSubItem {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sub_items: Vec<AgendaSubItem>,
}

/// A club meeting. Transitions PLANNED -> COMPLETED exactly once, at
/// finalization; after that `notes` is frozen and `generated_tasks` is the
/// authoritative record of the task ids extracted from those notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: String,
    pub goal: Option<String>,
    pub agenda_items: Vec<AgendaItem>,
    pub status: MeetingStatus,
    pub notes: String,
    pub generated_tasks: Vec<String>,
    pub planning_blocks: Option<serde_json::Value>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeetingRequest {
    pub title: String,
    pub date: String,
    pub goal: Option<String>,
    #[serde(default)]
    pub agenda_items: Vec<AgendaItem>,
    pub planning_blocks: Option<serde_json::Value>,
}
