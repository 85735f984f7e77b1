use crate::error::LedgerError;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Open a CSV file with headers, mapping the common open failures.
pub(crate) fn open_csv(path: &Path, flexible: bool) -> Result<csv::Reader<File>, LedgerError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound(path.display().to_string()),
        ErrorKind::PermissionDenied => LedgerError::PermissionDenied(path.display().to_string()),
        _ => LedgerError::Io(e),
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(flexible)
        .from_reader(file))
}
