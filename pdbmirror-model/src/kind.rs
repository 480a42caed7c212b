use crate::record::Record;
use crate::records::{Ix, Network, NetworkIxLan};
use crate::schema::ColumnKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of record variants pdbmirror knows how to mirror.
///
/// Serialized as the remote collection name (`"ix"`, `"net"`, `"netixlan"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "ix")]
    Ix,
    #[serde(rename = "net")]
    Network,
    #[serde(rename = "netixlan")]
    NetworkIxLan,
}

impl RecordKind {
    /// Every variant, in the order a full mirror syncs them.
    pub const ALL: [RecordKind; 3] = [RecordKind::Ix, RecordKind::Network, RecordKind::NetworkIxLan];

    /// Remote collection name.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Ix => Ix::COLLECTION,
            RecordKind::Network => Network::COLLECTION,
            RecordKind::NetworkIxLan => NetworkIxLan::COLLECTION,
        }
    }

    /// Local table name.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Ix => Ix::TABLE,
            RecordKind::Network => Network::TABLE,
            RecordKind::NetworkIxLan => NetworkIxLan::TABLE,
        }
    }

    /// `(name, kind)` of every persisted column, in order.
    pub fn column_specs(self) -> Vec<(&'static str, ColumnKind)> {
        fn specs<R: Record>() -> Vec<(&'static str, ColumnKind)> {
            R::columns().iter().map(|c| (c.name, c.kind)).collect()
        }
        match self {
            RecordKind::Ix => specs::<Ix>(),
            RecordKind::Network => specs::<Network>(),
            RecordKind::NetworkIxLan => specs::<NetworkIxLan>(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// A collection or table name that matches no [`RecordKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown record type: {0}")]
pub struct UnknownRecordKind(pub String);

impl FromStr for RecordKind {
    type Err = UnknownRecordKind;

    /// Accepts either the collection name or the table name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.collection() == s || k.table() == s)
            .ok_or_else(|| UnknownRecordKind(s.to_string()))
    }
}
