use crate::application::LedgerResult;
use crate::domain::Transaction;

/// Compact JSON array of transaction objects.
pub fn encode(transactions: &[Transaction]) -> LedgerResult<Vec<u8>> {
    Ok(serde_json::to_vec(transactions)?)
}

/// Decode a JSON array of transactions. A bare `null` decodes as empty.
pub fn decode(data: &[u8]) -> LedgerResult<Vec<Transaction>> {
    let transactions: Option<Vec<Transaction>> = serde_json::from_slice(data)?;
    Ok(transactions.unwrap_or_default())
}
