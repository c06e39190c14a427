//! Record and blob store seams.
//!
//! The rest of the crate only ever sees these two traits. The backing service
//! is a spreadsheet-like tabular store: named tables of ordered string cells,
//! header in row 1, rows and columns addressed 1-based. No transactional
//! guarantee is assumed across calls; read-then-write sequences upstream are
//! best-effort checks, not locks.

pub mod blob;
pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;

/// One row of a logical table, cells in column order.
pub type Row = Vec<String>;

pub trait RecordStore {
    /// Read every populated row of `table`, header first.
    ///
    /// Fails with `StoreUnavailable` if the table cannot be located and with
    /// `StoreAuth` if the store rejects the credentials.
    fn read_all_rows(&self, table: &str) -> AppResult<Vec<Row>>;

    /// Overwrite a single cell. `row` and `column` are 1-based.
    fn update_cell(&self, table: &str, row: usize, column: usize, value: &str) -> AppResult<()>;

    /// Append one row after the last populated row. Requires no prior read.
    fn append_row(&self, table: &str, values: &[String]) -> AppResult<()>;
}

pub trait BlobStore {
    /// Store `bytes` under `name` and return a durable reference to it.
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String>;
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn read_all_rows(&self, table: &str) -> AppResult<Vec<Row>> {
        (**self).read_all_rows(table)
    }

    fn update_cell(&self, table: &str, row: usize, column: usize, value: &str) -> AppResult<()> {
        (**self).update_cell(table, row, column, value)
    }

    fn append_row(&self, table: &str, values: &[String]) -> AppResult<()> {
        (**self).append_row(table, values)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String> {
        (**self).put(name, bytes)
    }
}

/// Convert a 1-based column position to tabular letter addressing:
/// 1 -> "A", 26 -> "Z", 27 -> "AA", 53 -> "BA".
pub fn column_letter(mut column: usize) -> String {
    let mut letter = String::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letter.insert(0, (b'A' + rem as u8) as char);
        column = (column - 1 - rem) / 26;
    }
    letter
}
