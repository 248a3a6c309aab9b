use std::io::{Read, Write};
use std::path::Path;

use tokio::sync::Mutex;

use crate::domain::{Cents, Transaction, TransactionId};
use crate::io::{json, rows};

use super::LedgerResult;

/// Application service owning the ledger.
/// This is the primary interface for any client (CLI, tests, an HTTP layer).
///
/// All access to the transaction sequence goes through one lock, which is only
/// held for in-memory work and never across file or stream I/O. Callers share
/// the service behind an `Arc`.
#[derive(Debug, Default)]
pub struct LedgerService {
    transactions: Mutex<Vec<Transaction>>,
}

impl LedgerService {
    /// Create a service with an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service seeded with existing transactions, order preserved.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
        }
    }

    // ========================
    // Queries
    // ========================

    /// Snapshot of every transaction in insertion order.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.transactions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.lock().await.is_empty()
    }

    // ========================
    // Registration
    // ========================

    /// Record a new transfer stamped with the current time and return its id.
    pub async fn register(
        &self,
        from: &str,
        to: &str,
        amount: Cents,
    ) -> LedgerResult<TransactionId> {
        let tx = Transaction::new(from, to, amount);
        let id = tx.id.clone();
        self.transactions.lock().await.push(tx);
        Ok(id)
    }

    // ========================
    // CSV
    // ========================

    /// Write the whole ledger as CSV rows and return the number of rows.
    /// An empty ledger writes nothing.
    pub async fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<usize> {
        let records: Vec<rows::Record> = {
            let transactions = self.transactions.lock().await;
            if transactions.is_empty() {
                return Ok(0);
            }
            transactions.iter().map(rows::transaction_to_record).collect()
        };

        rows::write_records(writer, &records)
    }

    /// Export the ledger as CSV into a file, creating or truncating it.
    pub async fn export_csv_file(&self, path: impl AsRef<Path>) -> LedgerResult<usize> {
        let mut buffer = Vec::new();
        let count = self.export_csv(&mut buffer).await?;
        tokio::fs::write(path, buffer).await?;
        Ok(count)
    }

    /// Append every row of a CSV file to the ledger, in file order.
    ///
    /// Rows are appended one at a time. If a row fails to convert, the import
    /// stops with that error and the rows before it stay in the ledger.
    pub async fn import_csv(&self, path: impl AsRef<Path>) -> LedgerResult<usize> {
        let data = tokio::fs::read(path).await?;
        self.import_csv_bytes(&data).await
    }

    /// Same as [`import_csv`](Self::import_csv), reading from any source.
    /// The reader is drained with a blocking `read_to_end` before any row is parsed.
    pub async fn import_csv_reader<R: Read>(&self, mut reader: R) -> LedgerResult<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.import_csv_bytes(&data).await
    }

    async fn import_csv_bytes(&self, data: &[u8]) -> LedgerResult<usize> {
        let records = rows::read_records(data)?;

        let mut imported = 0;
        for record in &records {
            let tx = rows::map_row_to_transaction(record)?;
            self.transactions.lock().await.push(tx);
            imported += 1;

            // Each row is its own critical section; let waiting tasks in between rows.
            tokio::task::yield_now().await;
        }

        Ok(imported)
    }

    // ========================
    // JSON
    // ========================

    /// Serialize the whole ledger as a compact JSON array.
    pub async fn export_json(&self) -> LedgerResult<Vec<u8>> {
        let transactions = self.transactions.lock().await;
        json::encode(&transactions)
    }

    /// Export the ledger as JSON into a file and return the number of entries.
    pub async fn export_json_file(&self, path: impl AsRef<Path>) -> LedgerResult<usize> {
        let (data, count) = {
            let transactions = self.transactions.lock().await;
            (json::encode(&transactions)?, transactions.len())
        };
        tokio::fs::write(path, data).await?;
        Ok(count)
    }

    /// Append the transactions of a JSON file to the ledger.
    ///
    /// The file is decoded in full before the ledger is touched, and all
    /// entries are appended in one critical section. On error nothing changes.
    pub async fn import_json(&self, path: impl AsRef<Path>) -> LedgerResult<usize> {
        let data = tokio::fs::read(path).await?;
        self.import_json_bytes(&data).await
    }

    /// Same as [`import_json`](Self::import_json), reading from any source.
    /// The reader is drained with a blocking `read_to_end` before decoding.
    pub async fn import_json_reader<R: Read>(&self, mut reader: R) -> LedgerResult<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.import_json_bytes(&data).await
    }

    async fn import_json_bytes(&self, data: &[u8]) -> LedgerResult<usize> {
        let decoded = json::decode(data)?;
        let count = decoded.len();
        self.transactions.lock().await.extend(decoded);
        Ok(count)
    }

    /// Replace the whole ledger with the transactions of a JSON file.
    /// On error the current ledger is kept as is.
    pub async fn restore_json(&self, path: impl AsRef<Path>) -> LedgerResult<usize> {
        let data = tokio::fs::read(path).await?;
        let decoded = json::decode(&data)?;
        let count = decoded.len();
        *self.transactions.lock().await = decoded;
        Ok(count)
    }
}
