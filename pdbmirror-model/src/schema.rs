//! Schema descriptions: the ordered columns a record type persists.
//!
//! Every [`Record`] exposes a static table of [`Column`]s. A column pairs the
//! storage name with an accessor that reads the attribute off a record, so
//! SQL text and bound parameters are always produced from the same list and
//! can never drift apart.

use crate::record::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
    Bool,
    Timestamp,
}

impl ColumnKind {
    /// SQLite column type used when creating tables.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Integer | ColumnKind::Bool => "INTEGER",
            ColumnKind::Text | ColumnKind::Timestamp => "TEXT",
        }
    }
}

/// A single attribute value read through a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// RFC 3339 text for timestamps, as they are stored.
    pub fn timestamp_text(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl From<Option<DateTime<Utc>>> for FieldValue {
    fn from(v: Option<DateTime<Utc>>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Timestamp)
    }
}

/// One persisted attribute of `R`: storage name, storage class and accessor.
pub struct Column<R> {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub value: fn(&R) -> FieldValue,
}

impl<R> Column<R> {
    pub const fn new(name: &'static str, kind: ColumnKind, value: fn(&R) -> FieldValue) -> Self {
        Self { name, kind, value }
    }

    /// Reads this column's value from a record.
    pub fn get(&self, record: &R) -> FieldValue {
        (self.value)(record)
    }

    /// SQLite column type for this column.
    pub fn sql_type(&self) -> &'static str {
        self.kind.sql_type()
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// The schema description of `R`.
pub fn describe<R: Record>() -> &'static [Column<R>] {
    R::columns()
}

/// Column names of `R` in persistence order.
pub fn column_names<R: Record>() -> Vec<&'static str> {
    R::columns().iter().map(|c| c.name).collect()
}

/// Values of `record`, in the same order as [`column_names`].
pub fn values<R: Record>(record: &R) -> Vec<FieldValue> {
    R::columns().iter().map(|c| c.get(record)).collect()
}
