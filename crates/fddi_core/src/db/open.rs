//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Apply connection pragmas from `StoreOptions`.
//!
//! # Invariants
//! - Every attempt emits a `db_open` start event and one ok/error event.

use super::{DbError, DbResult, JournalMode, StoreOptions};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens (or creates) a SQLite database file.
///
/// # Side effects
/// - Creates missing parent directories when `create_parent_dirs` is set.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>, options: &StoreOptions) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let opened = create_parent_dir(path, options)
        .and_then(|()| Connection::open(path).map_err(DbError::from));
    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    finish_open(&mut conn, options, true, started_at)?;
    Ok(conn)
}

/// Opens a private in-memory SQLite database.
///
/// The journal mode option does not apply to memory databases.
pub fn open_db_in_memory(options: &StoreOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let mut conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(&mut conn, options, false, started_at)?;
    Ok(conn)
}

fn finish_open(
    conn: &mut Connection,
    options: &StoreOptions,
    is_file: bool,
    started_at: Instant,
) -> DbResult<()> {
    let mode = if is_file { "file" } else { "memory" };
    match bootstrap_connection(conn, options, is_file) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(
    conn: &mut Connection,
    options: &StoreOptions,
    is_file: bool,
) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(options.busy_timeout)?;
    if is_file {
        apply_journal_mode(conn, options.journal_mode)?;
    }
    Ok(())
}

/// Requests `mode` and returns the journal mode SQLite actually applied.
///
/// SQLite may keep another mode (e.g. `memory`, or `delete` on file systems
/// without shared memory); that is logged as a warning, not an error.
fn apply_journal_mode(conn: &Connection, mode: JournalMode) -> DbResult<String> {
    let applied: String =
        conn.pragma_update_and_check(None, "journal_mode", mode.as_pragma(), |row| row.get(0))?;
    if !applied.eq_ignore_ascii_case(mode.as_pragma()) {
        warn!(
            "event=db_journal_mode module=db status=degraded requested={} applied={}",
            mode.as_pragma(),
            applied
        );
    }
    Ok(applied)
}

fn create_parent_dir(path: &Path, options: &StoreOptions) -> DbResult<()> {
    if !options.create_parent_dirs {
        return Ok(());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_journal_mode, open_db};
    use crate::db::{JournalMode, StoreOptions};
    use rusqlite::Connection;

    fn current_mode(conn: &Connection) -> String {
        conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn file_database_uses_requested_journal_mode() {
        let dir = tempfile::tempdir().unwrap();
        for (file, mode, expected) in [
            ("wal.sqlite3", JournalMode::Wal, "wal"),
            ("delete.sqlite3", JournalMode::Delete, "delete"),
        ] {
            let options = StoreOptions {
                journal_mode: mode,
                ..StoreOptions::default()
            };
            let conn = open_db(dir.path().join(file), &options).unwrap();
            assert_eq!(current_mode(&conn), expected);
        }
    }

    #[test]
    fn refused_journal_mode_reports_what_was_applied() {
        let conn = Connection::open_in_memory().unwrap();

        let applied = apply_journal_mode(&conn, JournalMode::Wal).unwrap();

        assert_eq!(applied, "memory");
        assert_eq!(current_mode(&conn), "memory");
    }
}
