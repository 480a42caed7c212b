use crate::kind::RecordKind;
use crate::schema::Column;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Status value PeeringDB uses to mark a soft-deleted object.
pub const DELETED_STATUS: &str = "deleted";

/// Attributes shared by every PeeringDB object.
///
/// `status` is only used to detect soft deletes and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBase {
    pub id: i64,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

impl RecordBase {
    /// Base attributes for a live record with the given id and no timestamps.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            status: "ok".to_string(),
            ..Default::default()
        }
    }

    /// Base attributes for a soft-deleted record.
    pub fn deleted(id: i64) -> Self {
        Self {
            id,
            status: DELETED_STATUS.to_string(),
            ..Default::default()
        }
    }
}

/// A mirrored PeeringDB object.
///
/// Each implementor names the remote collection it is fetched from, the local
/// table it is stored in, and the ordered columns it persists. The set of
/// implementors is closed and enumerated by [`RecordKind`].
pub trait Record: DeserializeOwned + Sized + 'static {
    /// Remote collection name, used as the URL path segment.
    const COLLECTION: &'static str;
    /// Local table name.
    const TABLE: &'static str;
    /// The variant tag for this type.
    const KIND: RecordKind;

    /// Shared attributes.
    fn base(&self) -> &RecordBase;

    /// Persisted columns in declaration order.
    fn columns() -> &'static [Column<Self>];

    /// Identifier, unique within the record's table.
    fn id(&self) -> i64 {
        self.base().id
    }

    /// True when the remote side marked this record deleted.
    fn is_deleted(&self) -> bool {
        self.base().status == DELETED_STATUS
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
