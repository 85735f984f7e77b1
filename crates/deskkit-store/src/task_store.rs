use crate::error::StoreError;
use crate::lockfile::Lockfile;
use crate::persist::{commit_tasks, read_tasks};
use crate::query::filter_and_sort;
use deskkit_core::list::ListQuery;
use deskkit_core::task::{next_id, Task};
use deskkit_core::validate::{validate_date, validate_tags, validate_title, TagsInput};
use std::path::{Path, PathBuf};

/// Fields to change on an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub tags: Option<TagsInput>,
    /// `Some(None)` clears the due date.
    pub due: Option<Option<String>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.tags.is_none() && self.due.is_none()
    }
}

/// A `TaskUpdate` whose fields have all passed validation.
struct ValidUpdate {
    title: Option<String>,
    tags: Option<Vec<String>>,
    due: Option<Option<String>>,
}

impl ValidUpdate {
    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(due) = self.due {
            task.due = due;
        }
    }
}

/// File-backed task collection.
///
/// Every operation is a fresh read of the whole file. Mutations hold the
/// file's [`Lockfile`] from before the read until the rewrite is committed;
/// a concurrent writer gets [`StoreError::LockConflict`]. Validation always
/// happens first, so a rejected call never touches the file.
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a task with the next free id and append it.
    pub fn add(
        &self,
        title: &str,
        tags: Option<&TagsInput>,
        due: Option<&str>,
    ) -> Result<Task, StoreError> {
        let title = validate_title(title)?;
        let due = validate_date(due)?;
        let tags = validate_tags(tags);

        let lock = Lockfile::acquire(&self.path)?;
        let mut tasks = read_tasks(&self.path)?;
        let task = Task::new(next_id(&tasks)?, title, tags, due);
        tasks.push(task.clone());
        commit_tasks(lock, &tasks)?;
        Ok(task)
    }

    /// Filtered, sorted snapshot of the collection. Never writes.
    pub fn list(&self, query: &ListQuery) -> Result<Vec<Task>, StoreError> {
        let tasks = read_tasks(&self.path)?;
        Ok(filter_and_sort(tasks, query))
    }

    /// Fetch a single task by id.
    pub fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        Ok(read_tasks(&self.path)?.into_iter().find(|t| t.id == id))
    }

    /// Mark a task done. Returns `false` (and writes nothing) if `id` is absent.
    pub fn complete(&self, id: u64) -> Result<bool, StoreError> {
        let found = self.mutate(|tasks| {
            let task = tasks.iter_mut().find(|t| t.id == id)?;
            task.done = true;
            Some(())
        })?;
        Ok(found.is_some())
    }

    /// Apply `update` to task `id`, all fields or none.
    ///
    /// Returns `false` if `id` is absent. Invalid fields fail before the
    /// file is read.
    pub fn update(&self, id: u64, update: &TaskUpdate) -> Result<bool, StoreError> {
        let valid = ValidUpdate {
            title: update.title.as_deref().map(validate_title).transpose()?,
            tags: update.tags.as_ref().map(|t| validate_tags(Some(t))),
            due: update
                .due
                .as_ref()
                .map(|d| validate_date(d.as_deref()))
                .transpose()?,
        };

        let found = self.mutate(move |tasks| {
            let task = tasks.iter_mut().find(|t| t.id == id)?;
            valid.apply(task);
            Some(())
        })?;
        Ok(found.is_some())
    }

    /// Remove task `id`. Returns `false` (and writes nothing) if absent.
    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let found = self.mutate(|tasks| {
            let pos = tasks.iter().position(|t| t.id == id)?;
            Some(tasks.remove(pos))
        })?;
        Ok(found.is_some())
    }

    /// Locked read-modify-write. `f` returning `None` aborts without writing.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<Task>) -> Option<T>,
    ) -> Result<Option<T>, StoreError> {
        let lock = Lockfile::acquire(&self.path)?;
        let mut tasks = read_tasks(&self.path)?;
        match f(&mut tasks) {
            Some(out) => {
                commit_tasks(lock, &tasks)?;
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }
}
