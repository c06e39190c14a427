//! In-memory record and blob stores.
//!
//! Back the library-level test suites and double as a scratch store for
//! experiments. Write operations are counted so tests can assert that a
//! rejected request touched nothing.

use crate::errors::{AppError, AppResult};
use crate::store::{BlobStore, RecordStore, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    writes: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `table` with the given rows (header included), replacing any
    /// previous content.
    pub fn seed(&self, table: &str, rows: Vec<Row>) {
        self.tables
            .lock()
            .unwrap()
            .insert(table.to_string(), rows);
    }

    /// Number of update/append calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Snapshot of a table's rows, header included.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_all_rows(&self, table: &str) -> AppResult<Vec<Row>> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .ok_or_else(|| AppError::StoreUnavailable(format!("table '{table}' not found")))
    }

    fn update_cell(&self, table: &str, row: usize, column: usize, value: &str) -> AppResult<()> {
        if row == 0 || column == 0 {
            return Err(AppError::Other(format!(
                "cell positions are 1-based, got row {row} column {column}"
            )));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| AppError::StoreUnavailable(format!("table '{table}' not found")))?;
        if rows.len() < row {
            rows.resize(row, Row::new());
        }
        let cells = &mut rows[row - 1];
        if cells.len() < column {
            cells.resize(column, String::new());
        }
        cells[column - 1] = value.to_string();
        Ok(())
    }

    fn append_row(&self, table: &str, values: &[String]) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| AppError::StoreUnavailable(format!("table '{table}' not found")))?;
        rows.push(values.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, name: &str, bytes: &[u8]) -> AppResult<String> {
        self.blobs
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        Ok(format!("mem://{name}"))
    }
}
