//! Exchange report over the mirrored tables.
//!
//! Lists a network's public peering ports grouped by exchange, with total
//! port speed, port count and exchange count.

use crate::error::SyncResult;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::collections::BTreeMap;

/// One peering port of the reported network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSummary {
    pub ipv4_addr: String,
    pub ipv6_addr: String,
    /// Mbit/s.
    pub speed: i64,
}

/// Totals across all ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_speed: i64,
    pub ports: i64,
    pub exchanges: i64,
}

/// Ports of one ASN, keyed by exchange name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeReport {
    pub asn: i64,
    pub exchanges: BTreeMap<String, Vec<PortSummary>>,
    pub summary: ReportSummary,
}

/// Builds the exchange report for `asn`.
///
/// Ports whose exchange is not mirrored are left out of the per-exchange
/// listing but still counted in the summary.
pub fn exchange_report(conn: &Connection, asn: i64) -> SyncResult<ExchangeReport> {
    let mut stmt = conn.prepare(
        "SELECT ix.name, net.speed, net.ipaddr4, net.ipaddr6
         FROM network_ix_lans AS net
         JOIN ix ON net.ix_id = ix.id
         WHERE net.asn = ?1
         ORDER BY ix.name, net.id",
    )?;

    let rows = stmt.query_map(params![asn], |row| {
        let ix_name: String = row.get(0)?;
        let port = PortSummary {
            speed: row.get::<_, Option<i64>>(1)?.unwrap_or_default(),
            ipv4_addr: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            ipv6_addr: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        };
        Ok((ix_name, port))
    })?;

    let mut exchanges: BTreeMap<String, Vec<PortSummary>> = BTreeMap::new();
    for row in rows {
        let (ix_name, port) = row?;
        exchanges.entry(ix_name).or_default().push(port);
    }

    let summary = conn.query_row(
        "SELECT COALESCE(SUM(speed), 0), COUNT(id), COUNT(DISTINCT ix_id)
         FROM network_ix_lans
         WHERE asn = ?1",
        params![asn],
        |row| {
            Ok(ReportSummary {
                total_speed: row.get(0)?,
                ports: row.get(1)?,
                exchanges: row.get(2)?,
            })
        },
    )?;

    Ok(ExchangeReport {
        asn,
        exchanges,
        summary,
    })
}
