use anyhow::{Context, Result};
use deskkit_ledger::bank::{apply_all, load_transactions, BankAccount, StatementLine};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

pub fn run(owner: String, balance: Decimal, from_csv: PathBuf) -> Result<()> {
    let mut account = BankAccount::new(owner, balance);
    let txns = load_transactions(&from_csv)
        .with_context(|| format!("cannot load transactions from {}", from_csv.display()))?;
    info!(count = txns.len(), file = %from_csv.display(), "transactions loaded");
    apply_all(&mut account, &txns)?;

    let rule = "-".repeat(60);
    println!("Statement for {}", account.owner);
    println!("{}", rule);
    println!("{:<6} {:<10} {:<12} {:<12} {}", "Index", "Type", "Amount", "Balance", "Note");
    println!("{}", rule);
    for line in account.statement() {
        println!("{}", format_line(&line));
    }
    println!("{}", rule);
    println!("Final Balance: {}", account.balance());
    Ok(())
}

fn format_line(line: &StatementLine) -> String {
    format!(
        "{:<6} {:<10} {:<12} {:<12} {}",
        line.index,
        line.kind.as_str(),
        line.amount.to_string(),
        line.balance.to_string(),
        line.note
    )
}
