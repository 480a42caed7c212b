use pdbmirror_model::{Ix, Network, NetworkIxLan, Record, RecordBase, RecordKind, DELETED_STATUS};
use serde_json::json;

// ── Decoding ─────────────────────────────────────────────────────

#[test]
fn decode_ix_from_api_shape() {
    let ix: Ix = serde_json::from_value(json!({
        "id": 26,
        "org_id": 2,
        "name": "AMS-IX",
        "name_long": "Amsterdam Internet Exchange",
        "city": "Amsterdam",
        "country": "NL",
        "media": "Ethernet",
        "created": "2010-07-29T00:00:00Z",
        "updated": "2021-03-15T14:22:01Z",
        "status": "ok"
    }))
    .unwrap();

    assert_eq!(ix.id(), 26);
    assert_eq!(ix.name, "AMS-IX");
    assert_eq!(ix.country, "NL");
    assert_eq!(
        ix.base.created,
        Some("2010-07-29T00:00:00Z".parse().unwrap())
    );
    assert!(!ix.is_deleted());
}

#[test]
fn missing_attributes_default() {
    let ix: Ix = serde_json::from_value(json!({"id": 1, "status": "ok", "name": "AMS-IX"})).unwrap();
    assert_eq!(ix.base.created, None);
    assert_eq!(ix.base.updated, None);
    assert_eq!(ix.org_id, 0);
    assert!(ix.city.is_empty());
}

#[test]
fn null_strings_decode_as_empty() {
    let link: NetworkIxLan = serde_json::from_value(json!({
        "id": 5,
        "net_id": 10,
        "ix_id": 26,
        "ipaddr4": "80.249.208.1",
        "ipaddr6": null,
        "notes": null,
        "speed": 10000,
        "asn": 64500,
        "is_rs_peer": true,
        "status": "ok"
    }))
    .unwrap();

    assert_eq!(link.ipv4_addr, "80.249.208.1");
    assert_eq!(link.ipv6_addr, "");
    assert_eq!(link.notes, "");
    assert_eq!(link.speed, 10000);
    assert!(link.is_rs_peer);
}

#[test]
fn id_is_required() {
    let result: Result<Network, _> = serde_json::from_value(json!({"name": "no id"}));
    assert!(result.is_err());
}

#[test]
fn wrongly_typed_attribute_fails() {
    let result: Result<Network, _> = serde_json::from_value(json!({"id": 1, "asn": "not a number"}));
    assert!(result.is_err());
}

// ── Soft delete ──────────────────────────────────────────────────

#[test]
fn deleted_status_marks_soft_delete() {
    let net: Network = serde_json::from_value(json!({"id": 3, "status": "deleted"})).unwrap();
    assert!(net.is_deleted());
}

#[test]
fn other_statuses_are_live() {
    for status in ["ok", "pending", ""] {
        let net: Network = serde_json::from_value(json!({"id": 3, "status": status})).unwrap();
        assert!(!net.is_deleted(), "status {status:?} must not be a delete");
    }
}

#[test]
fn missing_status_is_live() {
    let net: Network = serde_json::from_value(json!({"id": 3})).unwrap();
    assert!(!net.is_deleted());
}

#[test]
fn base_constructors() {
    assert_eq!(RecordBase::new(4).status, "ok");
    assert_eq!(RecordBase::deleted(4).status, DELETED_STATUS);
    assert_eq!(RecordBase::deleted(4).id, 4);
}

// ── Names ────────────────────────────────────────────────────────

#[test]
fn collection_and_table_names() {
    assert_eq!((Ix::COLLECTION, Ix::TABLE), ("ix", "ix"));
    assert_eq!((Network::COLLECTION, Network::TABLE), ("net", "networks"));
    assert_eq!(
        (NetworkIxLan::COLLECTION, NetworkIxLan::TABLE),
        ("netixlan", "network_ix_lans")
    );
}

#[test]
fn kind_constants_match_variants() {
    assert_eq!(Ix::KIND, RecordKind::Ix);
    assert_eq!(Network::KIND, RecordKind::Network);
    assert_eq!(NetworkIxLan::KIND, RecordKind::NetworkIxLan);
}

// ── RecordKind ───────────────────────────────────────────────────

#[test]
fn kind_parses_collection_and_table_names() {
    assert_eq!("ix".parse::<RecordKind>().unwrap(), RecordKind::Ix);
    assert_eq!("net".parse::<RecordKind>().unwrap(), RecordKind::Network);
    assert_eq!("networks".parse::<RecordKind>().unwrap(), RecordKind::Network);
    assert_eq!("netixlan".parse::<RecordKind>().unwrap(), RecordKind::NetworkIxLan);
}

#[test]
fn kind_rejects_unknown_names() {
    let err = "fac".parse::<RecordKind>().unwrap_err();
    assert_eq!(err.to_string(), "unknown record type: fac");
}

#[test]
fn kind_serde_uses_collection_names() {
    let json = serde_json::to_string(&RecordKind::ALL).unwrap();
    assert_eq!(json, r#"["ix","net","netixlan"]"#);
    let parsed: Vec<RecordKind> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, RecordKind::ALL.to_vec());
}

#[test]
fn kind_display_is_collection() {
    assert_eq!(RecordKind::NetworkIxLan.to_string(), "netixlan");
}

#[test]
fn kind_column_specs_match_record_columns() {
    let specs = RecordKind::Network.column_specs();
    let names: Vec<_> = specs.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, pdbmirror_model::column_names::<Network>());
}
