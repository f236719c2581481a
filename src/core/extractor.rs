//! Action-item extraction from free-form meeting notes.
//!
//! Notes are user-authored prose; nothing here rejects input. An action item
//! is a line fragment starting at a case-insensitive `ACTION:` marker and
//! running to the end of the line, optionally carrying `Assignee:`, `Due:`
//! and `Priority:` fields. Unparseable fields fall through to defaults.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::assignee::{match_first_name, resolve_assignee};
use crate::models::{TaskDraft, TaskPriority, User};

/// Title used when an action line carries nothing between the marker and the
/// first field keyword.
pub const UNTITLED_TASK: &str = "Untitled Task from Meeting";

// A match spans from the marker to end of line; matches never cross lines.
static ACTION_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ACTION:[^\r\n]*").unwrap());
// First recognized field keyword terminates the title capture.
static FIELD_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:assignee|due|priority):").unwrap());
static ASSIGNEE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bassignee:\s*(\w+)").unwrap());
static DUE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdue:\s*(\S+)").unwrap());
static PRIORITY_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bpriority:\s*(\S+)").unwrap());

/// Scan `notes` for every non-overlapping `ACTION:` match, in text order,
/// and produce one task draft per match. Zero matches is a valid, empty
/// result. Pure: identical input yields identical output.
pub fn extract_action_items(notes: &str, users: &[User]) -> Vec<TaskDraft> {
    ACTION_SPAN
        .find_iter(notes)
        .map(|m| parse_action_span(m.as_str(), users))
        .collect()
}

fn parse_action_span(span: &str, users: &[User]) -> TaskDraft {
    // The marker is exactly "ACTION:" in any casing, 7 bytes.
    let rest = &span["ACTION:".len()..];

    let title_end = FIELD_KEYWORD
        .find(rest)
        .map(|k| k.start())
        .unwrap_or(rest.len());
    let title = rest[..title_end].trim();
    let title = if title.is_empty() {
        UNTITLED_TASK.to_string()
    } else {
        title.to_string()
    };

    let due_date = DUE_FIELD.captures(rest).map(|c| c[1].to_string());

    let priority = PRIORITY_FIELD
        .captures(rest)
        .and_then(|c| c.get(1))
        .map(|g| g.as_str())
        .filter(|tok| tok.eq_ignore_ascii_case("HIGH"))
        .map(|_| TaskPriority::High)
        .unwrap_or(TaskPriority::Low);

    // Prefer the explicit Assignee: mention; when it names nobody we know,
    // the resolver scans the whole matched span instead.
    let assignee_id = ASSIGNEE_FIELD
        .captures(rest)
        .and_then(|c| c.get(1))
        .and_then(|g| match_first_name(g.as_str(), users))
        .or_else(|| resolve_assignee(span, users))
        .unwrap_or_default();

    TaskDraft {
        title,
        assignee_id,
        priority,
        due_date,
    }
}
