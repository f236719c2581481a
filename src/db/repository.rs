use chrono::Utc;
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::models::event::{
    EventAttendance, EventBudget, EventContact, EventIdeation, EventReflection,
};
use crate::models::{
    AgendaItem, Event, EventDraft, EventStatus, Meeting, MeetingStatus, NewMeetingRequest,
    NewTaskRequest, Task, TaskStatus, TaskUpdate, User,
};

// ---------------------------------------------------------------------------
// Users

pub async fn fetch_users(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, role, avatar, position FROM users ORDER BY position",
    )
    .fetch_all(db)
    .await
}

pub async fn find_user_by_id(db: &SqlitePool, id: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, role, avatar, position FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

// ---------------------------------------------------------------------------
// Tasks

const TASK_COLUMNS: &str =
    "id, title, status, priority, assignee_id, due_date, event_id, meeting_id, created_at";

pub async fn fetch_tasks(db: &SqlitePool) -> Result<Vec<Task>, sqlx::Error> {
    // rowid order preserves insertion order, which downstream grouping and
    // generated-task bookkeeping rely on.
    sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks ORDER BY rowid"
    ))
    .fetch_all(db)
    .await
}

pub async fn find_task_by_id(db: &SqlitePool, id: &str) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Insert a task. New tasks always start as TODO; status only moves through
/// `update_task` afterwards.
pub async fn insert_task(db: &SqlitePool, req: NewTaskRequest) -> Result<Task, sqlx::Error> {
    let task = Task {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        status: TaskStatus::Todo,
        priority: req.priority.unwrap_or_default(),
        assignee_id: req.assignee_id,
        due_date: req.due_date,
        event_id: req.event_id,
        meeting_id: req.meeting_id,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO tasks (id, title, status, priority, assignee_id, due_date, event_id, meeting_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&task.id)
    .bind(&task.title)
    .bind(task.status)
    .bind(task.priority)
    .bind(&task.assignee_id)
    .bind(&task.due_date)
    .bind(&task.event_id)
    .bind(&task.meeting_id)
    .bind(&task.created_at)
    .execute(db)
    .await?;

    Ok(task)
}

pub async fn update_task(
    db: &SqlitePool,
    id: &str,
    req: TaskUpdate,
) -> Result<Option<Task>, sqlx::Error> {
    let mut current = match find_task_by_id(db, id).await? {
        Some(t) => t,
        None => return Ok(None),
    };

    if let Some(title) = req.title {
        current.title = title;
    }
    if let Some(status) = req.status {
        current.status = status;
    }
    if let Some(priority) = req.priority {
        current.priority = priority;
    }
    if let Some(assignee_id) = req.assignee_id {
        current.assignee_id = assignee_id;
    }
    if let Some(due_date) = req.due_date {
        current.due_date = Some(due_date);
    }

    sqlx::query(
        "UPDATE tasks SET title = ?, status = ?, priority = ?, assignee_id = ?, due_date = ? WHERE id = ?",
    )
    .bind(&current.title)
    .bind(current.status)
    .bind(current.priority)
    .bind(&current.assignee_id)
    .bind(&current.due_date)
    .bind(id)
    .execute(db)
    .await?;

    Ok(Some(current))
}

// ---------------------------------------------------------------------------
// Events

#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    date: String,
    location: Option<String>,
    description: Option<String>,
    semester: Option<String>,
    academic_year: Option<String>,
    status: Option<EventStatus>,
    ideation: Option<Json<EventIdeation>>,
    budget: Option<Json<EventBudget>>,
    contacts: Option<Json<Vec<EventContact>>>,
    attendance: Option<Json<EventAttendance>>,
    reflection: Option<Json<EventReflection>>,
    copied_from_event_id: Option<String>,
    created_at: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            date: row.date,
            location: row.location,
            description: row.description,
            semester: row.semester,
            academic_year: row.academic_year,
            status: row.status,
            ideation: row.ideation.map(|j| j.0),
            budget: row.budget.map(|j| j.0),
            contacts: row.contacts.map(|j| j.0),
            attendance: row.attendance.map(|j| j.0),
            reflection: row.reflection.map(|j| j.0),
            copied_from_event_id: row.copied_from_event_id,
            created_at: row.created_at,
        }
    }
}

const EVENT_COLUMNS: &str = "id, title, date, location, description, semester, academic_year, \
     status, ideation, budget, contacts, attendance, reflection, copied_from_event_id, created_at";

pub async fn fetch_events(db: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY rowid"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Event::from).collect())
}

pub async fn find_event_by_id(db: &SqlitePool, id: &str) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(Event::from))
}

pub async fn insert_event(db: &SqlitePool, draft: EventDraft) -> Result<Event, sqlx::Error> {
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        date: draft.date,
        location: draft.location,
        description: draft.description,
        semester: draft.semester,
        academic_year: draft.academic_year,
        status: draft.status,
        ideation: draft.ideation,
        budget: draft.budget,
        contacts: draft.contacts,
        attendance: draft.attendance,
        reflection: draft.reflection,
        copied_from_event_id: draft.copied_from_event_id,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO events (id, title, date, location, description, semester, academic_year, \
         status, ideation, budget, contacts, attendance, reflection, copied_from_event_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&event.id)
    .bind(&event.title)
    .bind(&event.date)
    .bind(&event.location)
    .bind(&event.description)
    .bind(&event.semester)
    .bind(&event.academic_year)
    .bind(event.status)
    .bind(event.ideation.as_ref().map(Json))
    .bind(event.budget.as_ref().map(Json))
    .bind(event.contacts.as_ref().map(Json))
    .bind(event.attendance.as_ref().map(Json))
    .bind(event.reflection.as_ref().map(Json))
    .bind(&event.copied_from_event_id)
    .bind(&event.created_at)
    .execute(db)
    .await?;

    Ok(event)
}

// ---------------------------------------------------------------------------
// Meetings

#[derive(FromRow)]
struct MeetingRow {
    id: String,
    title: String,
    date: String,
    goal: Option<String>,
    agenda_items: Json<Vec<AgendaItem>>,
    status: MeetingStatus,
    notes: String,
    generated_tasks: Json<Vec<String>>,
    planning_blocks: Option<Json<serde_json::Value>>,
    created_at: String,
}

impl From<MeetingRow> for Meeting {
    fn from(row: MeetingRow) -> Self {
        Meeting {
            id: row.id,
            title: row.title,
            date: row.date,
            goal: row.goal,
            agenda_items: row.agenda_items.0,
            status: row.status,
            notes: row.notes,
            generated_tasks: row.generated_tasks.0,
            planning_blocks: row.planning_blocks.map(|j| j.0),
            created_at: row.created_at,
        }
    }
}

const MEETING_COLUMNS: &str = "id, title, date, goal, agenda_items, status, notes, \
     generated_tasks, planning_blocks, created_at";

pub async fn fetch_meetings(db: &SqlitePool) -> Result<Vec<Meeting>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MeetingRow>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings ORDER BY rowid"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(Meeting::from).collect())
}

pub async fn find_meeting_by_id(
    db: &SqlitePool,
    id: &str,
) -> Result<Option<Meeting>, sqlx::Error> {
    let row = sqlx::query_as::<_, MeetingRow>(&format!(
        "SELECT {MEETING_COLUMNS} FROM meetings WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row.map(Meeting::from))
}

pub async fn insert_meeting(
    db: &SqlitePool,
    req: NewMeetingRequest,
) -> Result<Meeting, sqlx::Error> {
    let meeting = Meeting {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        date: req.date,
        goal: req.goal,
        agenda_items: req.agenda_items,
        status: MeetingStatus::Planned,
        notes: String::new(),
        generated_tasks: Vec::new(),
        planning_blocks: req.planning_blocks,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO meetings (id, title, date, goal, agenda_items, status, notes, generated_tasks, planning_blocks, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&meeting.id)
    .bind(&meeting.title)
    .bind(&meeting.date)
    .bind(&meeting.goal)
    .bind(Json(&meeting.agenda_items))
    .bind(meeting.status)
    .bind(&meeting.notes)
    .bind(Json(&meeting.generated_tasks))
    .bind(meeting.planning_blocks.as_ref().map(Json))
    .bind(&meeting.created_at)
    .execute(db)
    .await?;

    Ok(meeting)
}

pub async fn update_meeting_notes(
    db: &SqlitePool,
    id: &str,
    notes: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE meetings SET notes = ? WHERE id = ?")
        .bind(notes)
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();
    Ok(result > 0)
}

/// The single write that completes a meeting: freeze the notes, record the
/// generated task ids, flip the status.
pub async fn complete_meeting(
    db: &SqlitePool,
    id: &str,
    notes: &str,
    generated_tasks: &[String],
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE meetings SET status = ?, notes = ?, generated_tasks = ? WHERE id = ?",
    )
    .bind(MeetingStatus::Completed)
    .bind(notes)
    .bind(Json(generated_tasks))
    .bind(id)
    .execute(db)
    .await?
    .rows_affected();
    Ok(result > 0)
}
