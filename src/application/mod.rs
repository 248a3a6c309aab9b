// Application layer: the ledger service and its error type.
// Front ends (CLI, tests) talk to the ledger only through `LedgerService`.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
