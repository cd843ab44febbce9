//! Row mapping for the top-level record types.
//!
//! # Responsibility
//! - Declare the table layout of `Program`, `Project` and `Aspect`.
//! - Convert records to bind values and result rows back to records.
//!
//! # Invariants
//! - Nested children are flattened into JSON `TEXT` columns of their parent's
//!   row; persisting a program never writes rows into `Projects`.
//! - Reading a row never masks bad data: undecodable JSON and column values of
//!   the wrong SQLite type are `InvalidData`.

use super::layout::{Column, ColumnType, TableLayout};
use super::{StorageError, StorageResult};
use crate::model::{Aspect, Program, Project, Validate};
use rusqlite::types::{FromSql, Value};
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type stored as one row per record in its own table.
pub trait TableRecord: Sized + Validate {
    /// Row layout, including the pluralized table name.
    const LAYOUT: TableLayout;

    /// Bind values in `LAYOUT.columns` order.
    fn to_row(&self) -> StorageResult<Vec<Value>>;

    /// Rebuilds a record from a row selected with `select_all_sql`.
    fn from_row(row: &Row<'_>) -> StorageResult<Self>;
}

const PROGRAM_COLUMNS: &[Column] = &[
    Column::nullable("id", ColumnType::Text),
    Column::nullable("name", ColumnType::Text),
    Column::required("programs", ColumnType::Text),
    Column::required("projects", ColumnType::Text),
    Column::nullable("progress", ColumnType::Text),
    Column::required("extensions", ColumnType::Text),
];

const PROJECT_COLUMNS: &[Column] = &[
    Column::nullable("id", ColumnType::Text),
    Column::non_blank_text("name"),
    Column::required("aspects", ColumnType::Text),
    Column::nullable("progress", ColumnType::Text),
    Column::required("extensions", ColumnType::Text),
];

const ASPECT_COLUMNS: &[Column] = &[
    Column::nullable("id", ColumnType::Text),
    Column::non_blank_text("name"),
    Column::nullable("info", ColumnType::Text),
    Column::required("subjects", ColumnType::Text),
    Column::nullable("progress", ColumnType::Text),
    Column::required("extensions", ColumnType::Text),
];

impl TableRecord for Program {
    const LAYOUT: TableLayout = TableLayout::new("Programs", PROGRAM_COLUMNS);

    fn to_row(&self) -> StorageResult<Vec<Value>> {
        Ok(vec![
            text_value(self.id.as_deref()),
            text_value(self.name.as_deref()),
            json_value(&self.programs)?,
            json_value(&self.projects)?,
            optional_json_value(self.progress.as_ref())?,
            json_value(&self.extensions)?,
        ])
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let table = Self::LAYOUT.table;
        Ok(Self {
            id: plain_column(row, table, "id")?,
            name: plain_column(row, table, "name")?,
            programs: json_column(row, table, "programs")?,
            projects: json_column(row, table, "projects")?,
            progress: optional_json_column(row, table, "progress")?,
            extensions: json_column(row, table, "extensions")?,
        })
    }
}

impl TableRecord for Project {
    const LAYOUT: TableLayout = TableLayout::new("Projects", PROJECT_COLUMNS);

    fn to_row(&self) -> StorageResult<Vec<Value>> {
        Ok(vec![
            text_value(self.id.as_deref()),
            Value::Text(self.name.clone()),
            json_value(&self.aspects)?,
            optional_json_value(self.progress.as_ref())?,
            json_value(&self.extensions)?,
        ])
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let table = Self::LAYOUT.table;
        Ok(Self {
            id: plain_column(row, table, "id")?,
            name: plain_column(row, table, "name")?,
            aspects: json_column(row, table, "aspects")?,
            progress: optional_json_column(row, table, "progress")?,
            extensions: json_column(row, table, "extensions")?,
        })
    }
}

impl TableRecord for Aspect {
    const LAYOUT: TableLayout = TableLayout::new("Aspects", ASPECT_COLUMNS);

    fn to_row(&self) -> StorageResult<Vec<Value>> {
        Ok(vec![
            text_value(self.id.as_deref()),
            Value::Text(self.name.clone()),
            optional_json_value(self.info.as_ref())?,
            json_value(&self.subjects)?,
            optional_json_value(self.progress.as_ref())?,
            json_value(&self.extensions)?,
        ])
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let table = Self::LAYOUT.table;
        Ok(Self {
            id: plain_column(row, table, "id")?,
            name: plain_column(row, table, "name")?,
            info: optional_json_column(row, table, "info")?,
            subjects: json_column(row, table, "subjects")?,
            progress: optional_json_column(row, table, "progress")?,
            extensions: json_column(row, table, "extensions")?,
        })
    }
}

fn text_value(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
}

fn json_value<T: Serialize + ?Sized>(value: &T) -> StorageResult<Value> {
    let text = serde_json::to_string(value).map_err(StorageError::Serialization)?;
    Ok(Value::Text(text))
}

fn optional_json_value<T: Serialize>(value: Option<&T>) -> StorageResult<Value> {
    match value {
        Some(inner) => json_value(inner),
        None => Ok(Value::Null),
    }
}

fn json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> StorageResult<T> {
    let text: String = plain_column(row, table, column)?;
    parse_json(&text, table, column)
}

fn optional_json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    table: &str,
    column: &str,
) -> StorageResult<Option<T>> {
    match plain_column::<Option<String>>(row, table, column)? {
        Some(text) => parse_json(&text, table, column).map(Some),
        None => Ok(None),
    }
}

fn plain_column<T: FromSql>(row: &Row<'_>, table: &str, column: &str) -> StorageResult<T> {
    row.get(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            StorageError::InvalidData(format!("bad value in {table}.{column}: {err}"))
        }
        other => StorageError::from(other),
    })
}

fn parse_json<T: DeserializeOwned>(text: &str, table: &str, column: &str) -> StorageResult<T> {
    serde_json::from_str(text).map_err(|err| {
        StorageError::InvalidData(format!("invalid JSON in {table}.{column}: {err}"))
    })
}
