use pdbmirror_model::{
    column_names, describe, values, Column, ColumnKind, FieldValue, Ix, Network, NetworkIxLan,
    Record, RecordBase,
};
use pretty_assertions::assert_eq;

// ── Column lists ─────────────────────────────────────────────────

#[test]
fn ix_columns_in_declaration_order() {
    assert_eq!(
        column_names::<Ix>(),
        vec!["id", "created", "updated", "org_id", "name", "name_long", "city", "country"]
    );
}

#[test]
fn network_columns_in_declaration_order() {
    assert_eq!(
        column_names::<Network>(),
        vec!["id", "created", "updated", "org_id", "asn", "name", "aka", "website"]
    );
}

#[test]
fn netixlan_columns_in_declaration_order() {
    assert_eq!(
        column_names::<NetworkIxLan>(),
        vec![
            "id", "created", "updated", "net_id", "ix_id", "ixlan_id", "notes", "speed", "asn",
            "ipaddr4", "ipaddr6", "is_rs_peer",
        ]
    );
}

#[test]
fn status_is_never_a_column() {
    assert!(!column_names::<Ix>().contains(&"status"));
    assert!(!column_names::<Network>().contains(&"status"));
    assert!(!column_names::<NetworkIxLan>().contains(&"status"));
}

#[test]
fn every_type_starts_with_base_columns() {
    for names in [
        column_names::<Ix>(),
        column_names::<Network>(),
        column_names::<NetworkIxLan>(),
    ] {
        assert_eq!(&names[..3], &["id", "created", "updated"]);
    }
}

#[test]
fn column_order_is_stable_across_calls() {
    let first: Vec<_> = describe::<NetworkIxLan>().iter().map(|c| c.name).collect();
    let second: Vec<_> = describe::<NetworkIxLan>().iter().map(|c| c.name).collect();
    assert_eq!(first, second);
}

#[test]
fn column_names_are_unique() {
    let names = column_names::<NetworkIxLan>();
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(names.len(), deduped.len());
}

// ── Column kinds ─────────────────────────────────────────────────

#[test]
fn sql_types_follow_column_kind() {
    assert_eq!(ColumnKind::Integer.sql_type(), "INTEGER");
    assert_eq!(ColumnKind::Bool.sql_type(), "INTEGER");
    assert_eq!(ColumnKind::Text.sql_type(), "TEXT");
    assert_eq!(ColumnKind::Timestamp.sql_type(), "TEXT");
}

#[test]
fn netixlan_kinds() {
    let kinds: Vec<_> = describe::<NetworkIxLan>().iter().map(|c| (c.name, c.kind)).collect();
    assert!(kinds.contains(&("created", ColumnKind::Timestamp)));
    assert!(kinds.contains(&("speed", ColumnKind::Integer)));
    assert!(kinds.contains(&("ipaddr6", ColumnKind::Text)));
    assert!(kinds.contains(&("is_rs_peer", ColumnKind::Bool)));
}

#[test]
fn column_debug_shows_name_and_kind() {
    let col: &Column<Ix> = &describe::<Ix>()[4];
    let debug = format!("{col:?}");
    assert!(debug.contains("name"));
    assert!(debug.contains("Text"));
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn values_follow_column_order() {
    let ix = Ix {
        base: RecordBase::new(7),
        org_id: 3,
        name: "AMS-IX".into(),
        name_long: "Amsterdam Internet Exchange".into(),
        city: "Amsterdam".into(),
        country: "NL".into(),
    };
    assert_eq!(
        values(&ix),
        vec![
            FieldValue::Integer(7),
            FieldValue::Null,
            FieldValue::Null,
            FieldValue::Integer(3),
            FieldValue::Text("AMS-IX".into()),
            FieldValue::Text("Amsterdam Internet Exchange".into()),
            FieldValue::Text("Amsterdam".into()),
            FieldValue::Text("NL".into()),
        ]
    );
}

#[test]
fn bool_and_timestamp_accessors() {
    let created = "2020-05-01T10:00:00Z".parse().unwrap();
    let link = NetworkIxLan {
        base: RecordBase {
            created: Some(created),
            ..RecordBase::new(1)
        },
        is_rs_peer: true,
        ..Default::default()
    };
    let vals = values(&link);
    assert_eq!(vals[1], FieldValue::Timestamp(created));
    assert_eq!(vals[11], FieldValue::Bool(true));
}

#[test]
fn single_column_get() {
    let net = Network {
        base: RecordBase::new(9),
        asn: 64500,
        ..Default::default()
    };
    let asn_col = Network::columns().iter().find(|c| c.name == "asn").unwrap();
    assert_eq!(asn_col.get(&net), FieldValue::Integer(64500));
}

#[test]
fn timestamp_text_is_rfc3339_utc() {
    let ts = "2021-01-01T00:00:00Z".parse().unwrap();
    assert_eq!(FieldValue::timestamp_text(&ts), "2021-01-01T00:00:00Z");
}
