use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = String;

/// A single transfer of `amount` from one party to another.
/// Transactions are never mutated once they are part of a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Source party
    pub from: String,
    /// Destination party
    pub to: String,
    /// Amount in the smallest currency unit, unconstrained
    pub amount: Cents,
    /// Unix epoch seconds
    pub created: i64,
}

impl Transaction {
    /// Create a transaction stamped with a fresh id and the current time.
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Cents) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from: from.into(),
            to: to.into(),
            amount,
            created: Utc::now().timestamp(),
        }
    }

    /// `created` as a UTC datetime, `None` if it is outside chrono's range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }
}
