//! SQLite-backed tabular record store.
//!
//! Models the spreadsheet shape the session core expects: named logical
//! tables holding ordered string cells, addressed 1-based. Each logical row
//! is stored as a JSON array of strings keyed by `(table_name, row_pos)`,
//! with a registry table so an empty-but-existing logical table can be told
//! apart from a missing one.

use crate::errors::{AppError, AppResult};
use crate::store::{RecordStore, Row, column_letter};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open (or create) the backing database and ensure the schema exists.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path)).map_err(store_err)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS logical_tables (
                 name TEXT PRIMARY KEY
             );
             CREATE TABLE IF NOT EXISTS logical_rows (
                 table_name TEXT NOT NULL,
                 row_pos    INTEGER NOT NULL,
                 cells      TEXT NOT NULL,
                 PRIMARY KEY (table_name, row_pos)
             );",
        )
        .map_err(store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Register a logical table so that reads on it succeed even while empty.
    pub fn create_table(&self, table: &str) -> AppResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO logical_tables (name) VALUES (?1)",
            [table],
        )
        .map_err(store_err)?;
        Ok(())
    }

    fn ensure_known(&self, conn: &Connection, table: &str) -> AppResult<()> {
        let known: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM logical_tables WHERE name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()
            .map_err(store_err)?;
        if known.is_none() {
            return Err(AppError::StoreUnavailable(format!(
                "logical table '{table}' not found; run init or check the configured table names"
            )));
        }
        Ok(())
    }
}

impl RecordStore for SqliteRecordStore {
    fn read_all_rows(&self, table: &str) -> AppResult<Vec<Row>> {
        let conn = self.conn.lock().unwrap();
        self.ensure_known(&conn, table)?;

        let mut stmt = conn
            .prepare("SELECT cells FROM logical_rows WHERE table_name = ?1 ORDER BY row_pos ASC")
            .map_err(store_err)?;
        let rows = stmt
            .query_map([table], |row| row.get::<_, String>(0))
            .map_err(store_err)?;

        let mut out = Vec::new();
        for r in rows {
            let cells = r.map_err(store_err)?;
            out.push(decode_cells(table, &cells)?);
        }
        Ok(out)
    }

    fn update_cell(&self, table: &str, row: usize, column: usize, value: &str) -> AppResult<()> {
        if row == 0 || column == 0 {
            return Err(AppError::Other(format!(
                "cell positions are 1-based, got row {row} column {column}"
            )));
        }
        let conn = self.conn.lock().unwrap();
        self.ensure_known(&conn, table)?;
        debug!("updating cell {}!{}{}", table, column_letter(column), row);

        let existing: Option<String> = conn
            .query_row(
                "SELECT cells FROM logical_rows WHERE table_name = ?1 AND row_pos = ?2",
                params![table, row as i64],
                |r| r.get(0),
            )
            .optional()
            .map_err(store_err)?;

        let mut cells = match existing {
            Some(raw) => decode_cells(table, &raw)?,
            None => Row::new(),
        };
        if cells.len() < column {
            cells.resize(column, String::new());
        }
        cells[column - 1] = value.to_string();

        conn.execute(
            "INSERT INTO logical_rows (table_name, row_pos, cells) VALUES (?1, ?2, ?3)
             ON CONFLICT (table_name, row_pos) DO UPDATE SET cells = excluded.cells",
            params![table, row as i64, encode_cells(&cells)?],
        )
        .map_err(store_err)?;
        Ok(())
    }

    fn append_row(&self, table: &str, values: &[String]) -> AppResult<()> {
        let conn = self.conn.lock().unwrap();
        self.ensure_known(&conn, table)?;

        conn.execute(
            "INSERT INTO logical_rows (table_name, row_pos, cells)
             SELECT ?1, COALESCE(MAX(row_pos), 0) + 1, ?2
             FROM logical_rows WHERE table_name = ?1",
            params![table, encode_cells(values)?],
        )
        .map_err(store_err)?;
        Ok(())
    }
}

fn encode_cells(cells: &[String]) -> AppResult<String> {
    serde_json::to_string(cells)
        .map_err(|e| AppError::StoreUnavailable(format!("failed to encode row: {e}")))
}

fn decode_cells(table: &str, raw: &str) -> AppResult<Row> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::StoreUnavailable(format!("corrupt row in table '{table}': {e}")))
}

/// Map driver errors onto the store taxonomy. Permission-flavored failures
/// become StoreAuth; everything else means the store is unreachable or broken.
fn store_err(e: rusqlite::Error) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(
                err.code,
                ErrorCode::CannotOpen | ErrorCode::PermissionDenied | ErrorCode::ReadOnly
            ) =>
        {
            AppError::StoreAuth(e.to_string())
        }
        _ => AppError::StoreUnavailable(e.to_string()),
    }
}
