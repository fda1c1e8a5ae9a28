use equipment_core::{Equipment, EquipmentValidationError, Name, SerialNumber, Tag, TagSet};

fn equipment(name: &str, serial: &str, tags: &[&str]) -> Equipment {
    Equipment::new(
        name.parse().unwrap(),
        "62353535".parse().unwrap(),
        "01-05-2019".parse().unwrap(),
        "Ang Mo Kio Ave 8".parse().unwrap(),
        serial.parse().unwrap(),
        tags.iter().map(|tag| tag.parse().unwrap()).collect::<TagSet>(),
    )
}

#[test]
fn identity_is_weaker_than_equality() {
    let original = equipment("Ang Mo Kio CC", "A008866X", &["west"]);
    let edited = equipment("Ang Mo Kio CC Annex", "A008866X", &["east"]);
    let other = equipment("Ang Mo Kio CC", "B12345E", &["west"]);

    assert!(original.is_same(&edited));
    assert_ne!(original, edited);
    assert!(!original.is_same(&other));
    assert_ne!(original, other);
}

#[test]
fn equality_ignores_tag_order() {
    let left = equipment("Pump", "SN1", &["west", "urgent"]);
    let right = equipment("Pump", "SN1", &["urgent", "west"]);
    assert_eq!(left, right);
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let item = equipment("Ang Mo Kio CC", "A008866X", &["west", "urgent"]);

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["name"], "Ang Mo Kio CC");
    assert_eq!(json["phone"], "62353535");
    assert_eq!(json["date"], "01-05-2019");
    assert_eq!(json["address"], "Ang Mo Kio Ave 8");
    assert_eq!(json["serial_number"], "A008866X");
    assert_eq!(json["tags"], serde_json::json!(["west", "urgent"]));

    let decoded: Equipment = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_rejects_invalid_serial_number() {
    let value = serde_json::json!({
        "name": "Ang Mo Kio CC",
        "phone": "62353535",
        "date": "01-05-2019",
        "address": "Ang Mo Kio Ave 8",
        "serial_number": "bad serial!",
        "tags": []
    });

    let err = serde_json::from_value::<Equipment>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid serial number `bad serial!`"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_dedups_tags() {
    let value = serde_json::json!({
        "name": "Pump",
        "phone": "999",
        "date": "01-01-2020",
        "address": "Depot 1",
        "serial_number": "SN1",
        "tags": ["west", "west", "urgent"]
    });

    let decoded: Equipment = serde_json::from_value(value).unwrap();
    assert_eq!(decoded.tags.len(), 2);
}

#[test]
fn parse_reports_field_specific_errors() {
    assert_eq!(
        "".parse::<Name>().unwrap_err(),
        EquipmentValidationError::InvalidName(String::new())
    );
    assert!(matches!(
        "SN 1".parse::<SerialNumber>(),
        Err(EquipmentValidationError::InvalidSerialNumber(_))
    ));
    assert!(matches!(
        "a-b".parse::<Tag>(),
        Err(EquipmentValidationError::InvalidTag(_))
    ));
}

#[test]
fn display_lists_fields_and_tags() {
    let item = equipment("Pump", "SN1", &["west", "urgent"]);
    let text = item.to_string();
    assert!(text.starts_with("Pump Phone: 62353535"));
    assert!(text.contains("Serial Number: SN1"));
    assert!(text.ends_with("Tags: [west][urgent]"));
}
