use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Event, Task, TaskStatus};

/// One calendar day: everything dated or due on it. Multiple events on the
/// same date are all retained.
#[derive(Debug, Clone, Serialize)]
pub struct DayBucket {
    pub day: u32,
    pub date: String,
    pub events: Vec<Event>,
    pub tasks: Vec<Task>,
    pub overdue_tasks: usize,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Weekday of the 1st (Sunday = 0): the number of blank cells before
    /// day 1 in a Sunday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<DayBucket>,
}

/// A task counts as overdue iff its due date parses and lies strictly before
/// `today`, and the task is not DONE. Unparseable due tokens are never
/// overdue.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    if task.status == TaskStatus::Done {
        return false;
    }
    task.due_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .is_some_and(|due| due < today)
}

/// Bucket events by `date` and tasks by `due_date` into every day of the
/// given month. Matching is verbatim string equality against the
/// `YYYY-MM-DD` key; unparseable dates simply never match. `today` is
/// injected so
/// callers (and tests) control the clock. Returns `None` for an invalid
/// year/month.
pub fn bucketize_month(
    events: &[Event],
    tasks: &[Task],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_first - first).num_days() as u32;
    let today_key = today.format("%Y-%m-%d").to_string();

    let days = (1..=days_in_month)
        .map(|day| {
            let date = format!("{year:04}-{month:02}-{day:02}");
            let day_events: Vec<Event> =
                events.iter().filter(|e| e.date == date).cloned().collect();
            let day_tasks: Vec<Task> = tasks
                .iter()
                .filter(|t| t.due_date.as_deref() == Some(date.as_str()))
                .cloned()
                .collect();
            let overdue_tasks = day_tasks.iter().filter(|t| is_overdue(t, today)).count();
            DayBucket {
                day,
                is_today: date == today_key,
                date,
                events: day_events,
                tasks: day_tasks,
                overdue_tasks,
            }
        })
        .collect();

    Some(MonthGrid {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
