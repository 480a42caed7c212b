//! Record model for pdbmirror.
//!
//! Defines the types every other pdbmirror crate depends on:
//! - [`Record`]: the shared interface of every mirrored PeeringDB object
//! - [`Ix`], [`Network`], [`NetworkIxLan`]: the concrete record variants
//! - [`RecordKind`]: the closed set of variants, used to pick what to sync
//! - [`Column`]: one entry of a record type's schema description
//! - [`UnixTime`]: the `<secs>.<nanos>` timestamp found in response envelopes
//!
//! None of these types perform I/O. The sync crate turns schema descriptions
//! into SQL and drives the fetch/apply cycle.

mod kind;
mod record;
mod records;
pub mod schema;
mod timestamp;

pub use kind::{RecordKind, UnknownRecordKind};
pub use record::{Record, RecordBase, DELETED_STATUS};
pub use records::{Ix, Network, NetworkIxLan};
pub use schema::{Column, ColumnKind, FieldValue, column_names, describe, values};
pub use timestamp::{TimestampError, UnixTime};
