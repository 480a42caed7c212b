//! The concrete PeeringDB record variants that pdbmirror mirrors.

use crate::kind::RecordKind;
use crate::record::{nullable, Record, RecordBase};
use crate::schema::{Column, ColumnKind, FieldValue};
use serde::{Deserialize, Serialize};

/// An internet exchange point (`ix`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ix {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(deserialize_with = "nullable")]
    pub org_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub name_long: String,
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub country: String,
}

static IX_COLUMNS: [Column<Ix>; 8] = [
    Column::<Ix>::new("id", ColumnKind::Integer, |r| r.base.id.into()),
    Column::<Ix>::new("created", ColumnKind::Timestamp, |r| r.base.created.into()),
    Column::<Ix>::new("updated", ColumnKind::Timestamp, |r| r.base.updated.into()),
    Column::<Ix>::new("org_id", ColumnKind::Integer, |r| r.org_id.into()),
    Column::<Ix>::new("name", ColumnKind::Text, |r| FieldValue::from(&r.name)),
    Column::<Ix>::new("name_long", ColumnKind::Text, |r| FieldValue::from(&r.name_long)),
    Column::<Ix>::new("city", ColumnKind::Text, |r| FieldValue::from(&r.city)),
    Column::<Ix>::new("country", ColumnKind::Text, |r| FieldValue::from(&r.country)),
];

impl Record for Ix {
    const COLLECTION: &'static str = "ix";
    const TABLE: &'static str = "ix";
    const KIND: RecordKind = RecordKind::Ix;

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn columns() -> &'static [Column<Self>] {
        &IX_COLUMNS
    }
}

/// A network, identified by its autonomous system number (`net`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(deserialize_with = "nullable")]
    pub org_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub asn: i64,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub aka: String,
    #[serde(deserialize_with = "nullable")]
    pub website: String,
}

static NETWORK_COLUMNS: [Column<Network>; 8] = [
    Column::<Network>::new("id", ColumnKind::Integer, |r| r.base.id.into()),
    Column::<Network>::new("created", ColumnKind::Timestamp, |r| r.base.created.into()),
    Column::<Network>::new("updated", ColumnKind::Timestamp, |r| r.base.updated.into()),
    Column::<Network>::new("org_id", ColumnKind::Integer, |r| r.org_id.into()),
    Column::<Network>::new("asn", ColumnKind::Integer, |r| r.asn.into()),
    Column::<Network>::new("name", ColumnKind::Text, |r| FieldValue::from(&r.name)),
    Column::<Network>::new("aka", ColumnKind::Text, |r| FieldValue::from(&r.aka)),
    Column::<Network>::new("website", ColumnKind::Text, |r| FieldValue::from(&r.website)),
];

impl Record for Network {
    const COLLECTION: &'static str = "net";
    const TABLE: &'static str = "networks";
    const KIND: RecordKind = RecordKind::Network;

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn columns() -> &'static [Column<Self>] {
        &NETWORK_COLUMNS
    }
}

/// A network's public peering port on an exchange LAN (`netixlan`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkIxLan {
    #[serde(flatten)]
    pub base: RecordBase,
    #[serde(deserialize_with = "nullable")]
    pub net_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub ix_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub ixlan_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub notes: String,
    /// Port speed in Mbit/s.
    #[serde(deserialize_with = "nullable")]
    pub speed: i64,
    #[serde(deserialize_with = "nullable")]
    pub asn: i64,
    #[serde(rename = "ipaddr4", deserialize_with = "nullable")]
    pub ipv4_addr: String,
    #[serde(rename = "ipaddr6", deserialize_with = "nullable")]
    pub ipv6_addr: String,
    #[serde(deserialize_with = "nullable")]
    pub is_rs_peer: bool,
}

static NETWORK_IX_LAN_COLUMNS: [Column<NetworkIxLan>; 12] = [
    Column::<NetworkIxLan>::new("id", ColumnKind::Integer, |r| r.base.id.into()),
    Column::<NetworkIxLan>::new("created", ColumnKind::Timestamp, |r| r.base.created.into()),
    Column::<NetworkIxLan>::new("updated", ColumnKind::Timestamp, |r| r.base.updated.into()),
    Column::<NetworkIxLan>::new("net_id", ColumnKind::Integer, |r| r.net_id.into()),
    Column::<NetworkIxLan>::new("ix_id", ColumnKind::Integer, |r| r.ix_id.into()),
    Column::<NetworkIxLan>::new("ixlan_id", ColumnKind::Integer, |r| r.ixlan_id.into()),
    Column::<NetworkIxLan>::new("notes", ColumnKind::Text, |r| FieldValue::from(&r.notes)),
    Column::<NetworkIxLan>::new("speed", ColumnKind::Integer, |r| r.speed.into()),
    Column::<NetworkIxLan>::new("asn", ColumnKind::Integer, |r| r.asn.into()),
    Column::<NetworkIxLan>::new("ipaddr4", ColumnKind::Text, |r| FieldValue::from(&r.ipv4_addr)),
    Column::<NetworkIxLan>::new("ipaddr6", ColumnKind::Text, |r| FieldValue::from(&r.ipv6_addr)),
    Column::<NetworkIxLan>::new("is_rs_peer", ColumnKind::Bool, |r| r.is_rs_peer.into()),
];

impl Record for NetworkIxLan {
    const COLLECTION: &'static str = "netixlan";
    const TABLE: &'static str = "network_ix_lans";
    const KIND: RecordKind = RecordKind::NetworkIxLan;

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn columns() -> &'static [Column<Self>] {
        &NETWORK_IX_LAN_COLUMNS
    }
}
