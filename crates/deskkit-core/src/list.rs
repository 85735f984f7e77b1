//! Options accepted by the task listing operation.

use crate::error::CoreError;
use crate::validate::{validate_date, validate_tags, TagsInput};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Done,
}

impl StatusFilter {
    pub fn matches(self, done: bool) -> bool {
        match self {
            Self::Open => !done,
            Self::Done => done,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            other => Err(CoreError::InvalidArgument(format!(
                "status must be \"open\" or \"done\", got \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Due,
    Created,
    Title,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "due" => Ok(Self::Due),
            "created" => Ok(Self::Created),
            "title" => Ok(Self::Title),
            other => Err(CoreError::InvalidArgument(format!(
                "sort_by must be \"due\", \"created\", or \"title\", got \"{}\"",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Due => "due",
            Self::Created => "created",
            Self::Title => "title",
        })
    }
}

/// Filters and ordering for a listing. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<StatusFilter>,
    /// Keep tasks carrying at least one of these tags; empty means no filter.
    pub tags: Vec<String>,
    /// Keep only tasks that have a due date on or before this one.
    pub due_before: Option<String>,
    pub sort_by: SortKey,
}

impl ListQuery {
    /// Build a query from loosely-typed arguments, validating each one.
    pub fn parse(
        status: Option<&str>,
        tags: Option<&TagsInput>,
        due_before: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            status: status.map(str::parse).transpose()?,
            tags: validate_tags(tags),
            due_before: validate_date(due_before.filter(|d| !d.is_empty()))?,
            sort_by: sort_by.map(str::parse).transpose()?.unwrap_or_default(),
        })
    }
}
