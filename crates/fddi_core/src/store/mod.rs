//! Record store: one SQLite table per top-level record type.
//!
//! # Responsibility
//! - Declare record tables and persist/fetch whole record trees.
//! - Keep SQL details behind the `RecordStore` contract.
//!
//! # Invariants
//! - Write paths call `Validate::validate()` before any SQL runs.
//! - Read paths reject rows that no longer decode or validate.
//! - A table must be registered on the handle before it is read or written.
//! - Registration state lives on the handle and is dropped with it.

use crate::db::DbError;
use crate::model::RecordValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod layout;
pub mod record;
mod sqlite;

pub use layout::{Column, ColumnSignature, ColumnType, TableLayout};
pub use record::TableRecord;
pub use sqlite::SqliteRecordStore;

pub type StorageResult<T> = Result<T, StorageError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Table declaration conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A table with this name is already declared with a different layout,
    /// either on this handle or on disk.
    ConflictingLayout {
        table: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConflictingLayout {
                table,
                expected,
                found,
            } => write!(
                f,
                "table `{table}` already declared with a different layout: expected [{}], found [{}]",
                expected.join(", "),
                found.join(", ")
            ),
        }
    }
}

impl Error for SchemaError {}

/// Persistence failures.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite/bootstrap error, including SQL constraint failures.
    Db(DbError),
    /// The table was never registered on this store handle.
    TableNotRegistered(&'static str),
    /// The record violates a model invariant and was not written.
    ConstraintViolation(RecordValidationError),
    /// A column value could not be serialized.
    Serialization(serde_json::Error),
    /// Persisted data cannot be converted back into a valid record.
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::TableNotRegistered(table) => write!(f, "table `{table}` is not registered"),
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::Serialization(err) => write!(f, "failed to serialize column value: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::TableNotRegistered(_) => None,
            Self::ConstraintViolation(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Any failure of a store operation.
#[derive(Debug)]
pub enum StoreError {
    Schema(SchemaError),
    Storage(StorageError),
}

impl StoreError {
    pub fn as_storage(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Schema(_) => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<SchemaError> for StoreError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Storage(StorageError::Db(value))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value.into())
    }
}

/// Store contract for table-per-type record persistence.
pub trait RecordStore {
    /// Declares `R`'s table. Idempotent for an identical layout.
    fn register_table<R: TableRecord>(&mut self) -> StoreResult<()>;

    /// Writes one record (with its whole subtree) and returns its row id.
    fn persist<R: TableRecord>(&self, record: &R) -> StoreResult<i64>;

    /// Reads every record of `R`'s table in insertion order.
    fn fetch_all<R: TableRecord>(&self) -> StoreResult<Vec<R>>;
}
