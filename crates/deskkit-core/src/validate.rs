//! Input validation shared by every task operation.
//!
//! All functions here are pure: they never touch the task file, so callers
//! can run them before reading or writing anything.

use crate::error::CoreError;
use chrono::{Local, NaiveDate};

/// Fixed calendar date layout for `due` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim a title, rejecting empty or whitespace-only input.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Parse a strict, zero-padded `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !value
        .chars()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Validate an optional due date, returning it unchanged on success.
pub fn validate_date(value: Option<&str>) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => match parse_date(v) {
            Some(_) => Ok(Some(v.to_string())),
            None => Err(CoreError::InvalidDate(v.to_string())),
        },
    }
}

/// Tags as supplied by a caller: one comma-separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsInput {
    Csv(String),
    List(Vec<String>),
}

impl From<&str> for TagsInput {
    fn from(s: &str) -> Self {
        Self::Csv(s.to_string())
    }
}

impl From<String> for TagsInput {
    fn from(s: String) -> Self {
        Self::Csv(s)
    }
}

impl From<Vec<String>> for TagsInput {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<&str>> for TagsInput {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(String::from).collect())
    }
}

impl TryFrom<&serde_json::Value> for TagsInput {
    type Error = CoreError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(s) => Ok(Self::Csv(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(Self::List)
                .ok_or_else(|| CoreError::InvalidTags(value.to_string())),
            other => Err(CoreError::InvalidTags(other.to_string())),
        }
    }
}

/// Normalize tags: split CSV input, trim, drop empties and duplicates.
///
/// First-seen order is preserved.
pub fn validate_tags(input: Option<&TagsInput>) -> Vec<String> {
    let raw: Vec<&str> = match input {
        None => return Vec::new(),
        Some(TagsInput::Csv(s)) => s.split(',').collect(),
        Some(TagsInput::List(items)) => items.iter().map(String::as_str).collect(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw.into_iter().map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Validate tags arriving as untyped JSON.
pub fn validate_tags_value(value: &serde_json::Value) -> Result<Vec<String>, CoreError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let input = TagsInput::try_from(value)?;
    Ok(validate_tags(Some(&input)))
}

/// True if `due` is strictly before today's local date.
///
/// Absent or unparseable dates are never past due.
pub fn is_past_due(due: Option<&str>) -> bool {
    is_past_due_on(due, Local::now().date_naive())
}

pub fn is_past_due_on(due: Option<&str>, today: NaiveDate) -> bool {
    due.and_then(parse_date).is_some_and(|d| d < today)
}
