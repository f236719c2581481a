use crate::models::User;

/// First user (roster order) whose first name appears, case-insensitively,
/// anywhere in `text`. No fallback; `None` means no roster name matched.
pub fn match_first_name(text: &str, users: &[User]) -> Option<String> {
    let haystack = text.to_lowercase();
    users
        .iter()
        .find(|u| {
            let first = u.first_name().to_lowercase();
            !first.is_empty() && haystack.contains(&first)
        })
        .map(|u| u.id.clone())
}

/// Map free text to a user id. A deliberately naive heuristic, not NLP:
/// substring-match first names in roster order, and when nothing matches
/// fall back silently to the first user (the president). `None` only when
/// the roster itself is empty.
pub fn resolve_assignee(text: &str, users: &[User]) -> Option<String> {
    match_first_name(text, users).or_else(|| users.first().map(|u| u.id.clone()))
}
