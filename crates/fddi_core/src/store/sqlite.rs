//! SQLite-backed record store handle.

use super::layout::{existing_signature, ColumnSignature, TableLayout, ROW_ID_COLUMN};
use super::{
    RecordStore, SchemaError, StorageError, StorageResult, StoreResult, TableRecord,
};
use crate::db::{open_db, open_db_in_memory, StoreOptions};
use log::{error, info};
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Store handle owning one SQLite connection and its registered tables.
///
/// Dropping the handle closes the connection and forgets registrations;
/// tables and rows stay in the database file.
pub struct SqliteRecordStore {
    conn: Connection,
    tables: BTreeMap<&'static str, TableLayout>,
}

impl SqliteRecordStore {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, options: &StoreOptions) -> StoreResult<Self> {
        let conn = open_db(path, options)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory(&StoreOptions::default())?;
        Ok(Self::from_connection(conn))
    }

    /// Wraps an already configured connection. No tables are registered yet.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            tables: BTreeMap::new(),
        }
    }

    /// Names of the tables registered on this handle, sorted.
    pub fn registered_tables(&self) -> Vec<&'static str> {
        self.tables.keys().copied().collect()
    }

    pub fn is_registered<R: TableRecord>(&self) -> bool {
        self.tables.contains_key(R::LAYOUT.table)
    }

    fn registered_layout(&self, table: &'static str) -> StorageResult<TableLayout> {
        self.tables
            .get(table)
            .copied()
            .ok_or(StorageError::TableNotRegistered(table))
    }

    fn declare_table(&mut self, layout: TableLayout) -> StoreResult<bool> {
        if let Some(registered) = self.tables.get(layout.table) {
            if *registered == layout {
                return Ok(false);
            }
            return Err(SchemaError::ConflictingLayout {
                table: layout.table,
                expected: describe(&layout.expected_signature()),
                found: describe(&registered.expected_signature()),
            }
            .into());
        }

        self.conn.execute_batch(&layout.create_sql())?;
        let expected = layout.expected_signature();
        let found = existing_signature(&self.conn, layout.table)?;
        if found != expected {
            return Err(SchemaError::ConflictingLayout {
                table: layout.table,
                expected: describe(&expected),
                found: describe(&found),
            }
            .into());
        }

        self.tables.insert(layout.table, layout);
        Ok(true)
    }

    fn insert_row<R: TableRecord>(&self, record: &R) -> StorageResult<i64> {
        let layout = self.registered_layout(R::LAYOUT.table)?;
        record
            .validate()
            .map_err(StorageError::ConstraintViolation)?;
        let values = record.to_row()?;
        self.conn
            .execute(&layout.insert_sql(), params_from_iter(values))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn select_rows<R: TableRecord>(&self) -> StorageResult<Vec<R>> {
        let layout = self.registered_layout(R::LAYOUT.table)?;
        let mut stmt = self.conn.prepare(&layout.select_all_sql())?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let row_id: i64 = row.get(ROW_ID_COLUMN)?;
            let record = R::from_row(row)?;
            record.validate().map_err(|err| {
                StorageError::InvalidData(format!(
                    "{} row {ROW_ID_COLUMN}={row_id}: {err}",
                    layout.table
                ))
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

impl RecordStore for SqliteRecordStore {
    /// # Errors
    /// - `SchemaError::ConflictingLayout` when this handle or the database
    ///   file already holds the table with different columns.
    fn register_table<R: TableRecord>(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let table = R::LAYOUT.table;
        match self.declare_table(R::LAYOUT) {
            Ok(created) => {
                info!(
                    "event=table_register module=store status=ok table={} already_registered={} duration_ms={}",
                    table,
                    !created,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=table_register module=store status=error table={} duration_ms={} error={}",
                    table,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// # Errors
    /// - `StorageError::TableNotRegistered` before `register_table::<R>()`.
    /// - `StorageError::ConstraintViolation` for records failing validation.
    /// - `StorageError::Db` for SQLite/I/O failures.
    fn persist<R: TableRecord>(&self, record: &R) -> StoreResult<i64> {
        let started_at = Instant::now();
        let table = R::LAYOUT.table;
        match self.insert_row(record) {
            Ok(row_id) => {
                info!(
                    "event=record_persist module=store status=ok table={} row_id={} duration_ms={}",
                    table,
                    row_id,
                    started_at.elapsed().as_millis()
                );
                Ok(row_id)
            }
            Err(err) => {
                error!(
                    "event=record_persist module=store status=error table={} duration_ms={} error={}",
                    table,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// # Errors
    /// - `StorageError::TableNotRegistered` before `register_table::<R>()`.
    /// - `StorageError::InvalidData` when a stored row no longer decodes or
    ///   validates.
    fn fetch_all<R: TableRecord>(&self) -> StoreResult<Vec<R>> {
        let started_at = Instant::now();
        let table = R::LAYOUT.table;
        match self.select_rows::<R>() {
            Ok(records) => {
                info!(
                    "event=record_fetch_all module=store status=ok table={} rows={} duration_ms={}",
                    table,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=record_fetch_all module=store status=error table={} duration_ms={} error={}",
                    table,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

fn describe(signature: &[ColumnSignature]) -> Vec<String> {
    signature.iter().map(ToString::to_string).collect()
}
