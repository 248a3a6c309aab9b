// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use tally::Transaction;
use tempfile::TempDir;

/// Helper to create a scratch directory for import/export files
pub fn scratch_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Write `contents` to `name` inside `dir` and return the full path
pub fn write_file(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Build a transaction with fixed values
pub fn tx(id: &str, from: &str, to: &str, amount: i64, created: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        amount,
        created,
    }
}

/// Project transactions onto comparable tuples
pub fn tuples(transactions: &[Transaction]) -> Vec<(String, String, String, i64, i64)> {
    transactions
        .iter()
        .map(|t| (t.id.clone(), t.from.clone(), t.to.clone(), t.amount, t.created))
        .collect()
}
