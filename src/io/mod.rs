//! Wire formats for moving a ledger in and out of the process.
//!
//! Both codecs work on whole in-memory buffers; locking is the service's concern.

pub mod json;
pub mod rows;

pub use rows::{map_row_to_transaction, transaction_to_record};
