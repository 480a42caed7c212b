//! Record applicator - applies a decoded batch to the local tables.
//!
//! Every record is either deleted by id (status `"deleted"`) or written with
//! an insert built from its schema description. The applicator only issues
//! statements on the transaction it is handed; committing is the driver's job.

use crate::error::{SyncError, SyncResult};
use pdbmirror_model::{FieldValue, Record, RecordKind, Ix, Network, NetworkIxLan};
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, ErrorCode, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::{debug, info};

/// How non-deleted records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Plain `INSERT`; an id that already exists fails with
    /// [`SyncError::InsertConflict`].
    Insert,
    /// `INSERT ... ON CONFLICT("id") DO UPDATE`, so re-synced records replace
    /// the stored row.
    #[default]
    Upsert,
}

/// Counts for one applied batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    /// Records written (inserted or upserted).
    pub inserted: usize,
    /// Delete statements issued.
    pub deleted: usize,
    /// Deletes that matched no local row.
    pub missing_deletes: usize,
}

impl ApplyStats {
    /// Total number of records processed.
    pub fn total(&self) -> usize {
        self.inserted + self.deleted
    }
}

/// Applies record batches inside a caller-owned transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordApplicator {
    mode: ApplyMode,
}

impl RecordApplicator {
    /// Creates an applicator writing with `mode`.
    pub fn new(mode: ApplyMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ApplyMode {
        self.mode
    }

    /// Applies a payload for the record type named by `kind`.
    pub fn apply_kind(
        &self,
        kind: RecordKind,
        tx: &Transaction<'_>,
        payload: &RawValue,
    ) -> SyncResult<ApplyStats> {
        match kind {
            RecordKind::Ix => self.apply::<Ix>(tx, payload),
            RecordKind::Network => self.apply::<Network>(tx, payload),
            RecordKind::NetworkIxLan => self.apply::<NetworkIxLan>(tx, payload),
        }
    }

    /// Decodes `payload` as an array of `R` and applies each record in order.
    ///
    /// Stops at the first failing record and returns its error; statements
    /// already executed stay in the transaction for the caller to roll back.
    pub fn apply<R: Record>(&self, tx: &Transaction<'_>, payload: &RawValue) -> SyncResult<ApplyStats> {
        let records = decode_payload::<R>(payload)?;
        self.apply_records(tx, &records)
    }

    /// Applies already-decoded records in order.
    pub fn apply_records<R: Record>(&self, tx: &Transaction<'_>, records: &[R]) -> SyncResult<ApplyStats> {
        if R::columns().is_empty() {
            return Err(SyncError::Schema {
                table: R::TABLE.to_string(),
            });
        }

        let insert_sql = insert_statement::<R>(self.mode);
        let delete_sql = delete_statement(R::TABLE);
        debug!("Insert statement for '{}': {insert_sql}", R::TABLE);

        let mut stats = ApplyStats::default();
        for record in records {
            if record.is_deleted() {
                let affected = tx.prepare_cached(&delete_sql)?.execute([record.id()])?;
                stats.deleted += 1;
                if affected == 0 {
                    stats.missing_deletes += 1;
                    debug!("Delete of {} id {} matched no row", R::TABLE, record.id());
                }
                continue;
            }

            let params = R::columns().iter().map(|c| sql_value(c.get(record)));
            tx.prepare_cached(&insert_sql)?
                .execute(params_from_iter(params))
                .map_err(|e| insert_error::<R>(e, record.id()))?;
            stats.inserted += 1;
        }

        info!(
            "Applied {} records to '{}' ({} written, {} deleted)",
            stats.total(),
            R::TABLE,
            stats.inserted,
            stats.deleted
        );
        Ok(stats)
    }
}

/// Decodes the second stage of an envelope: `data` as `Vec<R>`.
///
/// A JSON `null` payload is an empty batch.
pub fn decode_payload<R: Record>(payload: &RawValue) -> SyncResult<Vec<R>> {
    if payload.get().trim() == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(payload.get()).map_err(|source| SyncError::PayloadDecode {
        table: R::TABLE.to_string(),
        source,
    })
}

/// Quotes an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `INSERT` text for `R`, one positional placeholder per column.
pub fn insert_statement<R: Record>(mode: ApplyMode) -> String {
    let columns = R::columns();
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c.name)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(R::TABLE),
        names.join(", "),
        placeholders.join(", ")
    );

    if mode == ApplyMode::Upsert {
        let updates: Vec<String> = columns
            .iter()
            .filter(|c| c.name != "id")
            .map(|c| format!("{0} = excluded.{0}", quote_ident(c.name)))
            .collect();
        if updates.is_empty() {
            sql.push_str(" ON CONFLICT(\"id\") DO NOTHING");
        } else {
            sql.push_str(&format!(" ON CONFLICT(\"id\") DO UPDATE SET {}", updates.join(", ")));
        }
    }
    sql
}

/// `DELETE` text targeting a row of `table` by id.
pub fn delete_statement(table: &str) -> String {
    format!("DELETE FROM {} WHERE \"id\" = ?1", quote_ident(table))
}

fn sql_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Integer(v) => Value::Integer(v),
        FieldValue::Bool(v) => Value::Integer(i64::from(v)),
        FieldValue::Text(v) => Value::Text(v),
        FieldValue::Timestamp(ts) => Value::Text(FieldValue::timestamp_text(&ts)),
    }
}

fn insert_error<R: Record>(err: rusqlite::Error, id: i64) -> SyncError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && matches!(
                    e.extended_code,
                    ffi::SQLITE_CONSTRAINT_PRIMARYKEY | ffi::SQLITE_CONSTRAINT_UNIQUE
                ) =>
        {
            SyncError::InsertConflict {
                table: R::TABLE.to_string(),
                id,
            }
        }
        _ => SyncError::Storage(err),
    }
}
