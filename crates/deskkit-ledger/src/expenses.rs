//! Expense summaries by category.
//!
//! Loading is lenient: bad rows are counted and skipped instead of failing
//! the whole file.

use crate::error::LedgerError;
use crate::source::open_csv;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
    /// Empty when the row has no date.
    pub date: String,
}

/// Load expenses, returning the valid rows and the number skipped.
///
/// A row is skipped when the `category` or `amount` column is missing, or
/// the amount is not a finite number greater than zero.
pub fn load_expenses(path: impl AsRef<Path>) -> Result<(Vec<Expense>, usize), LedgerError> {
    let mut reader = open_csv(path.as_ref(), true)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let category_col = column("category");
    let amount_col = column("amount");
    let date_col = column("date");

    let mut expenses = Vec::new();
    let mut skipped = 0;
    for record in reader.records() {
        let record = record?;
        let category = category_col.and_then(|i| record.get(i));
        let amount = amount_col
            .and_then(|i| record.get(i))
            .and_then(|a| a.trim().parse::<f64>().ok())
            .filter(|a| a.is_finite() && *a > 0.0);

        match (category, amount) {
            (Some(category), Some(amount)) => expenses.push(Expense {
                category: category.trim().to_string(),
                amount,
                date: date_col
                    .and_then(|i| record.get(i))
                    .unwrap_or("")
                    .trim()
                    .to_string(),
            }),
            _ => skipped += 1,
        }
    }
    Ok((expenses, skipped))
}

/// Total amount per category.
pub fn sum_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut summary = BTreeMap::new();
    for e in expenses {
        *summary.entry(e.category.clone()).or_insert(0.0) += e.amount;
    }
    summary
}

/// Parse `key=value` criteria separated by commas; pieces without `=` are ignored.
pub fn parse_filter(filter: &str) -> HashMap<String, String> {
    filter
        .split(',')
        .filter_map(|criterion| criterion.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Keep expenses matching the criteria. Only `category` is recognized.
pub fn filter_expenses(expenses: &[Expense], filters: &HashMap<String, String>) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| filters.get("category").map_or(true, |c| &e.category == c))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseSort {
    AmountAsc,
    #[default]
    AmountDesc,
    Category,
}

impl FromStr for ExpenseSort {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount_asc" => Ok(Self::AmountAsc),
            "amount_desc" => Ok(Self::AmountDesc),
            "category" => Ok(Self::Category),
            other => Err(LedgerError::InvalidSort(other.to_string())),
        }
    }
}

/// Render the summary as a two-column table.
///
/// `top` limits the rows after sorting; `None` or `Some(0)` shows all.
pub fn format_summary(
    summary: &BTreeMap<String, f64>,
    sort: ExpenseSort,
    top: Option<usize>,
) -> String {
    let mut items: Vec<(&str, f64)> = summary.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    match sort {
        ExpenseSort::AmountAsc => items.sort_by(|a, b| a.1.total_cmp(&b.1)),
        ExpenseSort::AmountDesc => items.sort_by(|a, b| b.1.total_cmp(&a.1)),
        ExpenseSort::Category => items.sort_by(|a, b| a.0.cmp(b.0)),
    }
    if let Some(n) = top.filter(|n| *n > 0) {
        items.truncate(n);
    }

    let width = items
        .iter()
        .map(|(c, _)| c.chars().count())
        .max()
        .unwrap_or(0)
        .max("category".len());

    let mut lines = vec![
        format!("{:<width$} {:>10}", "category", "total", width = width),
        "-".repeat(width + 11),
    ];
    for (category, total) in items {
        lines.push(format!("{:<width$} {:10.2}", category, total, width = width));
    }
    lines.join("\n")
}
