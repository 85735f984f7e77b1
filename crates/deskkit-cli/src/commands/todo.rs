use anyhow::{bail, Context, Result};
use deskkit_core::list::ListQuery;
use deskkit_core::task::Task;
use deskkit_core::validate::{is_past_due, TagsInput};
use deskkit_store::task_store::{TaskStore, TaskUpdate};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

pub fn add(
    file: PathBuf,
    title: String,
    tags: Option<String>,
    due: Option<String>,
    allow_past_due: bool,
    json: bool,
) -> Result<()> {
    if !allow_past_due && !confirm_due(due.as_deref())? {
        println!("Task creation cancelled.");
        return Ok(());
    }

    let store = TaskStore::new(&file);
    let tags = tags.map(TagsInput::Csv);
    let task = store
        .add(&title, tags.as_ref(), due.as_deref())
        .with_context(|| format!("cannot add task to {}", file.display()))?;
    info!(id = task.id, file = %file.display(), "task added");

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Added task #{}: {}", task.id, task.title);
    }
    Ok(())
}

pub fn list(
    file: PathBuf,
    status: Option<String>,
    tags: Option<String>,
    due_before: Option<String>,
    sort_by: String,
    json: bool,
) -> Result<()> {
    let tags = tags.map(TagsInput::Csv);
    let query = ListQuery::parse(
        status.as_deref(),
        tags.as_ref(),
        due_before.as_deref(),
        Some(sort_by.as_str()),
    )?;
    let tasks = TaskStore::new(&file)
        .list(&query)
        .with_context(|| format!("cannot read tasks from {}", file.display()))?;
    debug!(count = tasks.len(), sort_by = %query.sort_by, "tasks listed");

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    for task in &tasks {
        println!("{}", format_line(task));
    }
    Ok(())
}

pub fn complete(file: PathBuf, id: u64) -> Result<()> {
    let found = TaskStore::new(&file)
        .complete(id)
        .with_context(|| format!("cannot update {}", file.display()))?;
    if !found {
        bail!("task #{} not found", id);
    }
    info!(id, "task completed");
    println!("Completed task #{}", id);
    Ok(())
}

pub fn update(
    file: PathBuf,
    id: u64,
    title: Option<String>,
    tags: Option<String>,
    due: Option<Option<String>>,
    allow_past_due: bool,
) -> Result<()> {
    let update = TaskUpdate {
        title,
        tags: tags.map(TagsInput::Csv),
        due,
    };
    if update.is_empty() {
        bail!("nothing to update: pass --title, --tags, --due or --clear-due");
    }

    let new_due = update.due.as_ref().and_then(|d| d.as_deref());
    if !allow_past_due && !confirm_due(new_due)? {
        println!("Task update cancelled.");
        return Ok(());
    }

    let found = TaskStore::new(&file)
        .update(id, &update)
        .with_context(|| format!("cannot update {}", file.display()))?;
    if !found {
        bail!("task #{} not found", id);
    }
    info!(id, "task updated");
    println!("Updated task #{}", id);
    Ok(())
}

pub fn delete(file: PathBuf, id: u64) -> Result<()> {
    let found = TaskStore::new(&file)
        .delete(id)
        .with_context(|| format!("cannot update {}", file.display()))?;
    if !found {
        bail!("task #{} not found", id);
    }
    info!(id, "task deleted");
    println!("Deleted task #{}", id);
    Ok(())
}

/// `  3 [✓] Title due:2025-09-05 tags:dev,qa`
fn format_line(task: &Task) -> String {
    let mark = if task.done { "✓" } else { " " };
    let mut line = format!("{:>3} [{}] {}", task.id, mark, task.title);
    if let Some(due) = &task.due {
        line.push_str(&format!(" due:{}", due));
    }
    if !task.tags.is_empty() {
        line.push_str(&format!(" tags:{}", task.tags.join(",")));
    }
    line
}

/// Ask before accepting a past due date. Anything other than `y` declines.
fn confirm_due(due: Option<&str>) -> Result<bool> {
    let Some(due) = due.filter(|d| is_past_due(Some(*d))) else {
        return Ok(true);
    };

    print!("Warning: Due date {} is in the past. Continue? (y/N): ", due);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let accepted = answer.trim().eq_ignore_ascii_case("y");
    debug!(due, accepted, "past due date prompt");
    Ok(accepted)
}
