use crate::error::CoreError;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp layout for `created_at`: local clock, microsecond precision.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single TODO record as stored in the task file.
///
/// `id` and `created_at` are fixed at creation; the remaining fields are
/// mutated in place by complete/update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub tags: Vec<String>,
    pub due: Option<String>,
    pub created_at: String,
}

impl Task {
    /// Build an open task stamped with the current local time.
    ///
    /// Inputs are expected to be validated already.
    pub fn new(id: u64, title: String, tags: Vec<String>, due: Option<String>) -> Self {
        Self {
            id,
            title,
            done: false,
            tags,
            due,
            created_at: now_timestamp(),
        }
    }

    /// True if the task carries at least one of `wanted`.
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|w| self.tags.contains(w))
    }
}

/// Current local time in the `created_at` layout.
pub fn now_timestamp() -> String {
    Local::now().format(CREATED_AT_FORMAT).to_string()
}

/// Next id for a collection: one past the largest, or 1 when empty.
pub fn next_id(tasks: &[Task]) -> Result<u64, CoreError> {
    match tasks.iter().map(|t| t.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(CoreError::IdOverflow(max)),
    }
}
