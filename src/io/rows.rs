//! CSV rows: one transaction per record, no header, columns
//! `id, from, to, amount, created`.

use std::io::Write;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::application::{LedgerError, LedgerResult};
use crate::domain::Transaction;

pub const COLUMNS: [&str; 5] = ["id", "from", "to", "amount", "created"];

pub type Record = [String; 5];

/// Render a transaction as a CSV record, integers in base 10.
pub fn transaction_to_record(tx: &Transaction) -> Record {
    [
        tx.id.clone(),
        tx.from.clone(),
        tx.to.clone(),
        tx.amount.to_string(),
        tx.created.to_string(),
    ]
}

/// Convert one CSV record into a transaction.
pub fn map_row_to_transaction(record: &StringRecord) -> LedgerResult<Transaction> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    if record.len() != COLUMNS.len() {
        return Err(LedgerError::ColumnCount {
            line,
            found: record.len(),
        });
    }

    let amount = parse_integer(record, 3, line)?;
    let created = parse_integer(record, 4, line)?;

    Ok(Transaction {
        id: record[0].to_string(),
        from: record[1].to_string(),
        to: record[2].to_string(),
        amount,
        created,
    })
}

fn parse_integer(record: &StringRecord, index: usize, line: u64) -> LedgerResult<i64> {
    let value = &record[index];
    value
        .parse::<i64>()
        .map_err(|source| LedgerError::InvalidInteger {
            line,
            field: COLUMNS[index],
            value: value.to_string(),
            source,
        })
}

/// Parse every record in `data`. Fails on the first structural error,
/// including records whose field count differs from the first record.
pub fn read_records(data: &[u8]) -> LedgerResult<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(data);

    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Write `records` with standard quoting and `\n` line endings.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> LedgerResult<usize> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for record in records {
        csv_writer.write_record(record)?;
    }

    csv_writer.flush()?;
    Ok(records.len())
}
