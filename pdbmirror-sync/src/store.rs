//! Local SQLite mirror: record tables plus run bookkeeping.
//!
//! Tables are derived from the record schema descriptions, so adding a column
//! to a record variant is enough to get it created (on a fresh database).

use crate::applicator::quote_ident;
use crate::engine::RunReport;
use crate::error::SyncResult;
use chrono::{DateTime, SecondsFormat, Utc};
use pdbmirror_model::RecordKind;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// One committed synchronization run as recorded in `sync_runs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRunRecord {
    pub id: i64,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub since: Option<DateTime<Utc>>,
    pub generated: Option<DateTime<Utc>>,
    pub inserted: i64,
    pub deleted: i64,
}

impl SyncRunRecord {
    /// The lower bound the next incremental run should use.
    pub fn next_since(&self) -> DateTime<Utc> {
        self.generated.unwrap_or(self.started)
    }
}

/// The local mirror database.
pub struct MirrorStore {
    conn: Connection,
}

impl MirrorStore {
    /// Opens (or creates) the mirror at `path` and makes sure every record
    /// table exists.
    pub fn open(path: impl AsRef<Path>) -> SyncResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory mirror (for testing).
    pub fn open_in_memory() -> SyncResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> SyncResult<Self> {
        let store = Self { conn };
        store.ensure_schema(&RecordKind::ALL)?;
        Ok(store)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access, needed to open the run transaction.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Creates the tables for `kinds` and the bookkeeping table if missing.
    pub fn ensure_schema(&self, kinds: &[RecordKind]) -> SyncResult<()> {
        for &kind in kinds {
            let ddl = create_table_statement(kind);
            debug!("Ensuring table '{}'", kind.table());
            self.conn.execute_batch(&ddl)?;
        }
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS sync_runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                started TEXT NOT NULL,
                finished TEXT NOT NULL,
                since TEXT,
                generated TEXT,
                inserted INTEGER NOT NULL,
                deleted INTEGER NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Number of rows in `kind`'s table.
    pub fn row_count(&self, kind: RecordKind) -> SyncResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(kind.table()));
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }

    /// Ids present in `kind`'s table, ascending.
    pub fn ids(&self, kind: RecordKind) -> SyncResult<Vec<i64>> {
        let sql = format!("SELECT \"id\" FROM {} ORDER BY \"id\"", quote_ident(kind.table()));
        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    // ── Run bookkeeping ──────────────────────────────────────────

    /// Records a committed run. Returns the bookkeeping row id.
    pub fn record_run(&self, report: &RunReport) -> SyncResult<i64> {
        let totals = report.totals();
        self.conn.execute(
            "INSERT INTO sync_runs (started, finished, since, generated, inserted, deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                rfc3339(&report.started),
                rfc3339(&report.finished),
                report.since.as_ref().map(rfc3339),
                report.generated().map(|g| rfc3339(&g.as_datetime())),
                totals.inserted as i64,
                totals.deleted as i64,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The most recent recorded run, if any.
    pub fn last_run(&self) -> SyncResult<Option<SyncRunRecord>> {
        let run = self
            .conn
            .query_row(
                "SELECT id, started, finished, since, generated, inserted, deleted
                 FROM sync_runs ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(SyncRunRecord {
                        id: row.get(0)?,
                        started: parse_time(row.get(1)?, 1)?,
                        finished: parse_time(row.get(2)?, 2)?,
                        since: row.get::<_, Option<String>>(3)?.map(|s| parse_time(s, 3)).transpose()?,
                        generated: row.get::<_, Option<String>>(4)?.map(|s| parse_time(s, 4)).transpose()?,
                        inserted: row.get(5)?,
                        deleted: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(run)
    }

    /// Lower bound for the next incremental run, `None` if nothing has been
    /// synced yet.
    pub fn last_sync(&self) -> SyncResult<Option<DateTime<Utc>>> {
        Ok(self.last_run()?.map(|run| run.next_since()))
    }
}

/// `CREATE TABLE IF NOT EXISTS` text for `kind`.
pub fn create_table_statement(kind: RecordKind) -> String {
    let columns: Vec<String> = kind
        .column_specs()
        .into_iter()
        .map(|(name, col_kind)| {
            if name == "id" {
                format!("{} INTEGER PRIMARY KEY", quote_ident(name))
            } else {
                format!("{} {}", quote_ident(name), col_kind.sql_type())
            }
        })
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({});",
        quote_ident(kind.table()),
        columns.join(", ")
    )
}

fn rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_time(text: String, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
