//! Whole-file persistence for the task collection.
//!
//! The file holds a single pretty-printed JSON array. Reads never lock;
//! writes go through [`Lockfile`] so the target is replaced in one rename.

use crate::error::StoreError;
use crate::lockfile::Lockfile;
use deskkit_core::task::Task;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read every task in the file.
///
/// A missing file, or one that is empty or only whitespace, is an empty
/// collection. Anything else that is not a JSON array of tasks is an error.
pub fn read_tasks(path: impl AsRef<Path>) -> Result<Vec<Task>, StoreError> {
    let data = match fs::read_to_string(path.as_ref()) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::Io(e)),
    };
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&data)?)
}

/// Overwrite the file with `tasks`.
pub fn write_tasks(path: impl AsRef<Path>, tasks: &[Task]) -> Result<(), StoreError> {
    let lock = Lockfile::acquire(path)?;
    commit_tasks(lock, tasks)
}

/// Serialize `tasks` into an already-held lock and commit it.
pub(crate) fn commit_tasks(mut lock: Lockfile, tasks: &[Task]) -> Result<(), StoreError> {
    let json = serde_json::to_vec_pretty(tasks)?;
    lock.write_all(&json)?;
    lock.commit()
}
