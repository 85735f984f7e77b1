//! Filtering and ordering for task listings

use deskkit_core::list::{ListQuery, SortKey};
use deskkit_core::task::Task;
use std::cmp::Ordering;

/// Apply the query's filters in order (status, tags, due_before) and sort.
///
/// Every sort key falls back to `id`, so the result is fully deterministic.
pub fn filter_and_sort(tasks: Vec<Task>, query: &ListQuery) -> Vec<Task> {
    let mut results: Vec<Task> = tasks
        .into_iter()
        .filter(|t| query.status.map_or(true, |s| s.matches(t.done)))
        .filter(|t| query.tags.is_empty() || t.has_any_tag(&query.tags))
        .filter(|t| match query.due_before.as_deref() {
            // Zero-padded dates order lexicographically like the calendar.
            Some(limit) => t.due.as_deref().is_some_and(|due| due <= limit),
            None => true,
        })
        .collect();

    match query.sort_by {
        SortKey::Due => results.sort_by(|a, b| by_due(a, b).then(a.id.cmp(&b.id))),
        SortKey::Created => {
            results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
        }
        SortKey::Title => results.sort_by_cached_key(|t| (t.title.to_lowercase(), t.id)),
    }
    results
}

/// Dated tasks first, ascending; undated tasks compare equal.
fn by_due(a: &Task, b: &Task) -> Ordering {
    match (&a.due, &b.due) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
