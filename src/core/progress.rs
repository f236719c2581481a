use std::collections::HashMap;

use crate::models::{Event, Task, TaskStatus};

/// Completion percentage for one event: `round(100 * done / total)` over the
/// tasks referencing it, `0` when it has no tasks.
pub fn event_progress(event_id: &str, tasks: &[Task]) -> u32 {
    let mut total = 0usize;
    let mut done = 0usize;
    for task in tasks.iter().filter(|t| t.event_id.as_deref() == Some(event_id)) {
        total += 1;
        if task.status == TaskStatus::Done {
            done += 1;
        }
    }
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

/// Group tasks under their event, preserving the task collection's relative
/// order. Every event gets an entry, empty or not; tasks pointing at unknown
/// events are silently left out (dangling references are tolerated).
pub fn tasks_by_event<'a>(events: &[Event], tasks: &'a [Task]) -> HashMap<String, Vec<&'a Task>> {
    let mut grouped: HashMap<String, Vec<&Task>> = events
        .iter()
        .map(|e| (e.id.clone(), Vec::new()))
        .collect();
    for task in tasks {
        if let Some(event_id) = &task.event_id {
            if let Some(bucket) = grouped.get_mut(event_id) {
                bucket.push(task);
            }
        }
    }
    grouped
}

/// Events in display order: ascending by date, ties kept in input order.
/// Dates are `YYYY-MM-DD` strings, so lexicographic order is date order.
pub fn roadmap_order(events: &[Event]) -> Vec<&Event> {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    fn task(id: &str, event_id: Option<&str>, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            status,
            priority: TaskPriority::Low,
            assignee_id: "u1".to_string(),
            due_date: None,
            event_id: event_id.map(str::to_string),
            meeting_id: None,
            created_at: "2024-09-01T00:00:00+00:00".to_string(),
        }
    }

    fn event(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("event {id}"),
            date: date.to_string(),
            location: None,
            description: None,
            semester: None,
            academic_year: None,
            status: None,
            ideation: None,
            budget: None,
            contacts: None,
            attendance: None,
            reflection: None,
            copied_from_event_id: None,
            created_at: "2024-09-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn half_done_is_fifty_percent() {
        let tasks = vec![
            task("t1", Some("e1"), TaskStatus::Done),
            task("t2", Some("e1"), TaskStatus::Done),
            task("t3", Some("e1"), TaskStatus::Todo),
            task("t4", Some("e1"), TaskStatus::Doing),
        ];
        assert_eq!(event_progress("e1", &tasks), 50);
    }

    #[test]
    fn no_tasks_means_zero_not_a_division_error() {
        assert_eq!(event_progress("e1", &[]), 0);
    }

    #[test]
    fn progress_rounds_to_nearest_integer() {
        let tasks = vec![
            task("t1", Some("e1"), TaskStatus::Done),
            task("t2", Some("e1"), TaskStatus::Todo),
            task("t3", Some("e1"), TaskStatus::Todo),
        ];
        // 1/3 -> 33.33 -> 33
        assert_eq!(event_progress("e1", &tasks), 33);
        let tasks = vec![
            task("t1", Some("e1"), TaskStatus::Done),
            task("t2", Some("e1"), TaskStatus::Done),
            task("t3", Some("e1"), TaskStatus::Todo),
        ];
        // 2/3 -> 66.67 -> 67
        assert_eq!(event_progress("e1", &tasks), 67);
    }

    #[test]
    fn other_events_tasks_do_not_count() {
        let tasks = vec![
            task("t1", Some("e1"), TaskStatus::Done),
            task("t2", Some("e2"), TaskStatus::Todo),
            task("t3", None, TaskStatus::Todo),
        ];
        assert_eq!(event_progress("e1", &tasks), 100);
    }

    #[test]
    fn grouping_keeps_task_order_and_covers_every_event() {
        let events = vec![event("e1", "2024-09-10"), event("e2", "2024-09-20")];
        let tasks = vec![
            task("t1", Some("e1"), TaskStatus::Todo),
            task("t2", Some("e2"), TaskStatus::Todo),
            task("t3", Some("e1"), TaskStatus::Done),
            task("t4", Some("missing"), TaskStatus::Todo),
        ];
        let grouped = tasks_by_event(&events, &tasks);
        let e1_ids: Vec<&str> = grouped["e1"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(e1_ids, vec!["t1", "t3"]);
        assert_eq!(grouped["e2"].len(), 1);
        assert!(!grouped.contains_key("missing"));
    }

    #[test]
    fn roadmap_sorts_by_date_with_stable_ties() {
        let events = vec![
            event("late", "2024-11-01"),
            event("early", "2024-09-01"),
            event("tie_a", "2024-10-01"),
            event("tie_b", "2024-10-01"),
        ];
        let ordered: Vec<&str> = roadmap_order(&events).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ordered, vec!["early", "tie_a", "tie_b", "late"]);
    }
}
