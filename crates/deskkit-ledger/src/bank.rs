//! Bank account replay over exact decimal amounts.
//!
//! Transactions are applied in order and fail fast: the first rejected
//! transaction stops the run, and everything before it stays applied.

use crate::error::LedgerError;
use crate::source::open_csv;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Deposit,
    Withdraw,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            other => Err(LedgerError::InvalidTransactionType(other.to_string())),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as loaded. `kind` is checked only when it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: String,
    pub amount: Decimal,
    pub note: String,
}

impl Transaction {
    pub fn new(kind: &str, amount: Decimal, note: &str) -> Self {
        Self {
            kind: kind.to_string(),
            amount,
            note: note.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    amount: String,
    #[serde(default)]
    note: String,
}

/// One row of a statement: the transaction and the balance right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLine {
    /// 1-based position in the history.
    pub index: usize,
    pub kind: TxKind,
    pub amount: Decimal,
    pub balance: Decimal,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct BankAccount {
    pub owner: String,
    balance: Decimal,
    initial_balance: Decimal,
    history: Vec<StatementLine>,
}

impl BankAccount {
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            owner: owner.into(),
            balance,
            initial_balance: balance,
            history: Vec::new(),
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn initial_balance(&self) -> Decimal {
        self.initial_balance
    }

    /// Apply one transaction. A rejected transaction leaves the account unchanged.
    pub fn apply(&mut self, tx: &Transaction) -> Result<(), LedgerError> {
        let kind: TxKind = tx.kind.parse()?;
        let balance = match kind {
            TxKind::Deposit => self.balance.checked_add(tx.amount),
            TxKind::Withdraw => {
                if tx.amount > self.balance {
                    return Err(LedgerError::InsufficientFunds);
                }
                self.balance.checked_sub(tx.amount)
            }
        }
        .ok_or_else(|| LedgerError::AmountOverflow(tx.amount.to_string()))?;

        self.balance = balance;
        self.history.push(StatementLine {
            index: self.history.len() + 1,
            kind,
            amount: tx.amount,
            balance,
            note: tx.note.clone(),
        });
        Ok(())
    }

    /// Every applied transaction with the balance right after it.
    pub fn statement(&self) -> Vec<StatementLine> {
        self.history.clone()
    }
}

/// Load transactions from a CSV file with a `type,amount,note` header.
pub fn load_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>, LedgerError> {
    let mut reader = open_csv(path.as_ref(), false)?;
    let mut txns = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let amount = parse_amount(row.amount.trim())
            .ok_or_else(|| LedgerError::InvalidAmount(row.amount.clone()))?;
        txns.push(Transaction {
            kind: row.kind,
            amount,
            note: row.note,
        });
    }
    Ok(txns)
}

/// Plain decimals first, then exponent notation such as `1E+2`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Apply `txns` in order, stopping at the first failure.
pub fn apply_all(account: &mut BankAccount, txns: &[Transaction]) -> Result<(), LedgerError> {
    for tx in txns {
        account
            .apply(tx)
            .map_err(|e| LedgerError::TransactionFailed(Box::new(e)))?;
    }
    Ok(())
}
