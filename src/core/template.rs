use crate::models::{Event, EventDraft, Task, TaskDraft};

/// Derive a new event draft (and its task drafts) from a past event. Every
/// event field except identity is carried over and `copied_from_event_id`
/// records the lineage. Associated tasks come back with status reset to TODO
/// and assignee/priority/due date carried verbatim. Nothing is persisted
/// here; the caller submits the drafts through the store.
pub fn copy_event(source: &Event, tasks: &[Task]) -> (EventDraft, Vec<TaskDraft>) {
    let draft = EventDraft {
        title: source.title.clone(),
        date: source.date.clone(),
        location: source.location.clone(),
        description: source.description.clone(),
        semester: source.semester.clone(),
        academic_year: source.academic_year.clone(),
        status: source.status,
        ideation: source.ideation.clone(),
        budget: source.budget.clone(),
        contacts: source.contacts.clone(),
        attendance: source.attendance.clone(),
        reflection: source.reflection.clone(),
        copied_from_event_id: Some(source.id.clone()),
    };

    let task_drafts = tasks
        .iter()
        .filter(|t| t.event_id.as_deref() == Some(source.id.as_str()))
        .map(|t| TaskDraft {
            title: t.title.clone(),
            assignee_id: t.assignee_id.clone(),
            priority: t.priority,
            due_date: t.due_date.clone(),
        })
        .collect();

    (draft, task_drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};

    fn source_event() -> Event {
        Event {
            id: "e1".to_string(),
            title: "Fall Kickoff".to_string(),
            date: "2024-09-15".to_string(),
            location: Some("Quad".to_string()),
            description: Some("Welcome event".to_string()),
            semester: Some("Fall 2024".to_string()),
            academic_year: Some("2024-2025".to_string()),
            status: None,
            ideation: None,
            budget: None,
            contacts: None,
            attendance: None,
            reflection: None,
            copied_from_event_id: None,
            created_at: "2024-08-01T00:00:00+00:00".to_string(),
        }
    }

    fn task(id: &str, event_id: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            status,
            priority,
            assignee_id: "u2".to_string(),
            due_date: Some("2024-09-10".to_string()),
            event_id: Some(event_id.to_string()),
            meeting_id: None,
            created_at: "2024-08-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn copy_carries_fields_and_records_lineage() {
        let source = source_event();
        let (draft, _) = copy_event(&source, &[]);
        assert_eq!(draft.title, source.title);
        assert_eq!(draft.date, source.date);
        assert_eq!(draft.location, source.location);
        assert_eq!(draft.semester, source.semester);
        assert_eq!(draft.academic_year, source.academic_year);
        assert_eq!(draft.copied_from_event_id.as_deref(), Some("e1"));
    }

    #[test]
    fn task_statuses_reset_to_todo_everything_else_carries() {
        let source = source_event();
        let tasks = vec![
            task("t1", "e1", TaskStatus::Done, TaskPriority::High),
            task("t2", "e1", TaskStatus::Done, TaskPriority::Low),
            task("t3", "e1", TaskStatus::Todo, TaskPriority::Medium),
            task("t4", "other", TaskStatus::Todo, TaskPriority::Low),
        ];
        let (_, drafts) = copy_event(&source, &tasks);
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].priority, TaskPriority::High);
        assert_eq!(drafts[0].assignee_id, "u2");
        assert_eq!(drafts[0].due_date.as_deref(), Some("2024-09-10"));
        // Status is not part of the draft at all: every copied task starts
        // over as TODO when it is materialized.
    }
}
