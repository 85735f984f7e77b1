use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing CSV file: {0}")]
    Csv(#[from] csv::Error),

    #[error("error parsing CSV file: invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("invalid transaction type: {0}")]
    InvalidTransactionType(String),

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("amount overflow applying {0}")]
    AmountOverflow(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(Box<LedgerError>),

    #[error("invalid sort method '{0}': expected amount_asc, amount_desc, or category")]
    InvalidSort(String),
}
