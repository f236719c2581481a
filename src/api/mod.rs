use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{patch, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::calendar::{self, MonthGrid};
use crate::core::progress;
use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::services::{EventService, MeetingService, event_service::EventWithTasks};
use crate::state::AppState;

#[derive(Deserialize)]
struct CalendarQueryParams {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct CopyEventRequest {
    actor_id: String,
}

#[derive(Deserialize)]
struct NotesRequest {
    actor_id: String,
    notes: String,
}

#[derive(Serialize)]
struct RoadmapEntry {
    event: Event,
    progress: u32,
    tasks: Vec<Task>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task))
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/copy", post(copy_event))
        .route("/roadmap", get(roadmap))
        .route("/calendar", get(calendar_month))
        .route("/meetings", get(list_meetings).post(create_meeting))
        .route("/meetings/{id}", get(get_meeting))
        .route("/meetings/{id}/notes", patch(save_notes))
        .route("/meetings/{id}/finalize", post(finalize_meeting))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = repository::fetch_users(&state.db).await?;
    Ok(Json(users))
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = repository::fetch_tasks(&state.db).await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<NewTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let task = repository::insert_task(&state.db, req).await?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TaskUpdate>,
) -> Result<Json<Task>, AppError> {
    let task = repository::update_task(&state.db, &id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(task))
}

async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = repository::fetch_events(&state.db).await?;
    Ok(Json(events))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event = repository::find_event_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(event))
}

async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEventRequest>,
) -> Result<Json<EventWithTasks>, AppError> {
    let service = EventService::new(state.db.clone());
    let created = service.create(req).await?;
    Ok(Json(created))
}

async fn copy_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CopyEventRequest>,
) -> Result<Json<EventWithTasks>, AppError> {
    let service = EventService::new(state.db.clone());
    let copied = service.copy_from(&id, &req.actor_id).await?;
    Ok(Json(copied))
}

/// Events in date order with their tasks and completion percentage, the
/// shape the roadmap view renders from.
async fn roadmap(State(state): State<AppState>) -> Result<Json<Vec<RoadmapEntry>>, AppError> {
    let events = repository::fetch_events(&state.db).await?;
    let tasks = repository::fetch_tasks(&state.db).await?;

    let grouped = progress::tasks_by_event(&events, &tasks);
    let entries = progress::roadmap_order(&events)
        .into_iter()
        .map(|event| RoadmapEntry {
            progress: progress::event_progress(&event.id, &tasks),
            tasks: grouped
                .get(&event.id)
                .map(|ts| ts.iter().map(|t| (*t).clone()).collect())
                .unwrap_or_default(),
            event: event.clone(),
        })
        .collect();
    Ok(Json(entries))
}

async fn calendar_month(
    State(state): State<AppState>,
    Query(params): Query<CalendarQueryParams>,
) -> Result<Json<MonthGrid>, AppError> {
    let events = repository::fetch_events(&state.db).await?;
    let tasks = repository::fetch_tasks(&state.db).await?;
    let today = Utc::now().date_naive();

    let grid = calendar::bucketize_month(&events, &tasks, params.year, params.month, today)
        .ok_or_else(|| AppError::BadRequest("invalid year/month".to_string()))?;
    Ok(Json(grid))
}

async fn list_meetings(State(state): State<AppState>) -> Result<Json<Vec<Meeting>>, AppError> {
    let meetings = repository::fetch_meetings(&state.db).await?;
    Ok(Json(meetings))
}

async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Meeting>, AppError> {
    let meeting = repository::find_meeting_by_id(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(meeting))
}

async fn create_meeting(
    State(state): State<AppState>,
    Json(req): Json<NewMeetingRequest>,
) -> Result<Json<Meeting>, AppError> {
    let meeting = repository::insert_meeting(&state.db, req).await?;
    Ok(Json(meeting))
}

async fn save_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<Meeting>, AppError> {
    let service = MeetingService::new(state.db.clone());
    let meeting = service.save_notes(&id, &req.actor_id, &req.notes).await?;
    Ok(Json(meeting))
}

async fn finalize_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<Meeting>, AppError> {
    let service = MeetingService::new(state.db.clone());
    let meeting = service.finalize(&id, &req.actor_id, &req.notes).await?;
    Ok(Json(meeting))
}
