//! Declarative row layouts for record tables.
//!
//! # Invariants
//! - Every table starts with an implicit `row_id INTEGER PRIMARY KEY
//!   AUTOINCREMENT` column that orders rows by insertion.
//! - Two layouts are compatible iff table name and column list match exactly
//!   (names, types, nullability, non-blank checks and order).
//! - `PRAGMA table_info` does not report `CHECK` clauses; they are read from
//!   the table's `sqlite_master.sql` text instead.

use rusqlite::{Connection, OptionalExtension};

/// Name of the implicit insertion-order key column.
pub const ROW_ID_COLUMN: &str = "row_id";

/// SQLite storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
}

impl ColumnType {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
        }
    }
}

/// One declared column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub not_null: bool,
    /// Adds a `CHECK` rejecting empty or whitespace-only text.
    pub non_blank: bool,
}

impl Column {
    pub const fn nullable(name: &'static str, kind: ColumnType) -> Self {
        Self {
            name,
            kind,
            not_null: false,
            non_blank: false,
        }
    }

    pub const fn required(name: &'static str, kind: ColumnType) -> Self {
        Self {
            name,
            kind,
            not_null: true,
            non_blank: false,
        }
    }

    pub const fn non_blank_text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnType::Text,
            not_null: true,
            non_blank: true,
        }
    }

    fn definition(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.kind.as_sql());
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.non_blank {
            sql.push(' ');
            sql.push_str(&non_blank_check(self.name));
        }
        sql
    }

    fn signature(&self) -> ColumnSignature {
        ColumnSignature {
            name: self.name.to_string(),
            declared_type: self.kind.as_sql().to_string(),
            not_null: self.not_null,
            primary_key: false,
            non_blank: self.non_blank,
        }
    }
}

/// Table name plus ordered column list for one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub table: &'static str,
    pub columns: &'static [Column],
}

impl TableLayout {
    pub const fn new(table: &'static str, columns: &'static [Column]) -> Self {
        Self { table, columns }
    }

    pub fn create_sql(&self) -> String {
        let mut definitions =
            vec![format!("{ROW_ID_COLUMN} INTEGER PRIMARY KEY AUTOINCREMENT")];
        definitions.extend(self.columns.iter().map(Column::definition));
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (\n    {}\n);",
            self.table,
            definitions.join(",\n    ")
        )
    }

    pub fn insert_sql(&self) -> String {
        let names = self.column_names().join(", ");
        let placeholders = (1..=self.columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO \"{}\" ({names}) VALUES ({placeholders});",
            self.table
        )
    }

    pub fn select_all_sql(&self) -> String {
        format!(
            "SELECT {ROW_ID_COLUMN}, {} FROM \"{}\" ORDER BY {ROW_ID_COLUMN} ASC;",
            self.column_names().join(", "),
            self.table
        )
    }

    /// Expected `PRAGMA table_info` shape, including the implicit key column.
    pub fn expected_signature(&self) -> Vec<ColumnSignature> {
        let mut signature = vec![ColumnSignature {
            name: ROW_ID_COLUMN.to_string(),
            declared_type: ColumnType::Integer.as_sql().to_string(),
            not_null: false,
            primary_key: true,
            non_blank: false,
        }];
        signature.extend(self.columns.iter().map(Column::signature));
        signature
    }

    fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }
}

/// Column shape as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSignature {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    /// Carries the `CHECK (length(trim(col)) > 0)` clause.
    pub non_blank: bool,
}

impl std::fmt::Display for ColumnSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.declared_type)?;
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        if self.primary_key {
            write!(f, " PRIMARY KEY")?;
        }
        if self.non_blank {
            write!(f, " CHECK non-blank")?;
        }
        Ok(())
    }
}

/// Reads the column shape of an existing table; empty when it does not exist.
pub fn existing_signature(
    conn: &Connection,
    table: &str,
) -> rusqlite::Result<Vec<ColumnSignature>> {
    let table_sql = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?
        .flatten()
        .map(|sql| squash_sql(&sql))
        .unwrap_or_default();

    let mut stmt = conn.prepare(&format!("PRAGMA table_info(\"{table}\");"))?;
    let rows = stmt.query_map([], |row| {
        let name: String = row.get("name")?;
        let non_blank = table_sql.contains(&squash_sql(&non_blank_check(&name)));
        Ok(ColumnSignature {
            declared_type: row.get::<_, String>("type")?.to_ascii_uppercase(),
            not_null: row.get::<_, i64>("notnull")? != 0,
            primary_key: row.get::<_, i64>("pk")? != 0,
            non_blank,
            name,
        })
    })?;
    rows.collect()
}

fn non_blank_check(column: &str) -> String {
    format!("CHECK (length(trim({column})) > 0)")
}

/// Lowercases and drops whitespace so hand-written DDL compares equal.
fn squash_sql(sql: &str) -> String {
    sql.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{existing_signature, Column, ColumnType, TableLayout};
    use rusqlite::Connection;

    const WIDGET_COLUMNS: &[Column] = &[
        Column::nullable("id", ColumnType::Text),
        Column::non_blank_text("name"),
        Column::required("weight", ColumnType::Integer),
    ];
    const WIDGETS: TableLayout = TableLayout::new("Widgets", WIDGET_COLUMNS);

    #[test]
    fn generated_statements_follow_column_order() {
        assert_eq!(
            WIDGETS.insert_sql(),
            "INSERT INTO \"Widgets\" (id, name, weight) VALUES (?1, ?2, ?3);"
        );
        assert_eq!(
            WIDGETS.select_all_sql(),
            "SELECT row_id, id, name, weight FROM \"Widgets\" ORDER BY row_id ASC;"
        );
        assert!(WIDGETS
            .create_sql()
            .contains("name TEXT NOT NULL CHECK (length(trim(name)) > 0)"));
    }

    #[test]
    fn created_table_matches_expected_signature() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(&WIDGETS.create_sql()).unwrap();

        let existing = existing_signature(&conn, "Widgets").unwrap();
        assert_eq!(existing, WIDGETS.expected_signature());
    }

    #[test]
    fn missing_non_blank_check_changes_signature() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Widgets (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT,
                name TEXT NOT NULL,
                weight INTEGER NOT NULL
            );",
        )
        .unwrap();

        let existing = existing_signature(&conn, "Widgets").unwrap();
        assert_ne!(existing, WIDGETS.expected_signature());
        assert!(!existing[2].non_blank);
    }

    #[test]
    fn hand_written_check_clause_is_recognized() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE Widgets (row_id INTEGER PRIMARY KEY AUTOINCREMENT, id TEXT,
             name TEXT NOT NULL CHECK(LENGTH(TRIM(name))>0), weight INTEGER NOT NULL);",
        )
        .unwrap();

        let existing = existing_signature(&conn, "Widgets").unwrap();
        assert_eq!(existing, WIDGETS.expected_signature());
    }

    #[test]
    fn missing_table_has_empty_signature() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(existing_signature(&conn, "Nothing").unwrap().is_empty());
    }
}
