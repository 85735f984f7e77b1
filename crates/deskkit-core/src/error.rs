use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("tags must be a list of strings or comma-separated string, got {0}")]
    InvalidTags(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no task ids left above {0}")]
    IdOverflow(u64),

    #[error("empty input")]
    EmptyInput,
}
