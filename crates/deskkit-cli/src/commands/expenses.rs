use anyhow::{Context, Result};
use deskkit_ledger::expenses::{
    filter_expenses, format_summary, load_expenses, parse_filter, sum_by_category, ExpenseSort,
};
use std::path::PathBuf;
use tracing::info;

pub fn run(path: PathBuf, sort: String, top: Option<usize>, filter: Option<String>) -> Result<()> {
    let sort: ExpenseSort = sort.parse()?;
    let (expenses, skipped) = load_expenses(&path)
        .with_context(|| format!("cannot load expenses from {}", path.display()))?;
    info!(loaded = expenses.len(), skipped, file = %path.display(), "expenses loaded");
    if skipped > 0 {
        eprintln!("Warning: Skipped {} invalid rows.", skipped);
    }

    let filters = filter.as_deref().map(parse_filter).unwrap_or_default();
    let kept = filter_expenses(&expenses, &filters);
    let summary = sum_by_category(&kept);
    println!("{}", format_summary(&summary, sort, top));
    Ok(())
}
