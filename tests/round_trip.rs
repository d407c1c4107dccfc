//! End-to-end conversion tests over the full-coverage synthetic schema.

use base64::Engine;
use dict_types::{
    dict_into_message, dict_to_message, message_to_dict, ConvertError, ForwardConfig,
    ReverseConfig,
};
use proto_core::values::{DynamicMessage, FieldValue};
use proto_dict::testing::{message_of_types, nested_type, populated_message_of_types};
use serde_json::{json, Map, Value};

fn forward(msg: &DynamicMessage, config: &ForwardConfig) -> Map<String, Value> {
    message_to_dict(msg, config).unwrap()
}

#[test]
fn test_round_trip() {
    let m = populated_message_of_types();
    let dict = forward(&m, &ForwardConfig::default());

    // Every explicitly set field appears under its own name.
    for name in [
        "dubl", "flot", "i32", "i64", "ui32", "ui64", "si32", "si64", "f32", "f64", "sf32",
        "sf64", "bol", "strng", "byts", "nested", "enm", "enmRepeated", "range",
    ] {
        assert!(dict.contains_key(name), "missing key {name}");
    }
    assert_eq!(dict["i64"], json!(i64::MAX));
    assert_eq!(dict["ui64"], json!(u64::MAX));
    assert_eq!(dict["range"], json!([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]));
    assert_eq!(dict["nested"], json!({"req": "req"}));

    let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();
    assert_eq!(m, m2);
}

#[test]
fn test_round_trip_survives_json_serialization() {
    let m = populated_message_of_types();
    let dict = forward(&m, &ForwardConfig::default());

    let text = serde_json::to_string(&Value::Object(dict)).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    let Value::Object(dict) = reparsed else {
        panic!("Expected object");
    };

    let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();
    assert_eq!(m, m2);
}

#[test]
fn test_use_enum_labels() {
    let m = populated_message_of_types();
    let dict = forward(&m, &ForwardConfig::new().with_enum_labels());

    assert_eq!(dict["enm"], json!("C"));
    assert_eq!(dict["enmRepeated"], json!(["A", "C"]));

    // Labels and ordinals reconstruct the same message.
    let from_labels = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();
    let from_ordinals = dict_to_message(
        m.descriptor(),
        &forward(&m, &ForwardConfig::default()),
        &ReverseConfig::default(),
    )
    .unwrap();
    assert_eq!(from_labels, from_ordinals);
    assert_eq!(from_labels, m);
}

#[test]
fn test_undeclared_labels_fail() {
    let m = populated_message_of_types();
    let mut dict = forward(&m, &ForwardConfig::new().with_enum_labels());

    dict.insert("enm".to_string(), json!("MEOW"));
    let err = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnknownEnumLabel { .. }));

    dict.insert("enm".to_string(), json!("A"));
    dict.insert("enmRepeated".to_string(), json!(["B"]));
    dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();

    dict.insert("enmRepeated".to_string(), json!(["CAT"]));
    let err = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnknownEnumLabel { .. }));
}

#[test]
fn test_incomplete_dict_leaves_field_unset() {
    let m = populated_message_of_types();
    let mut dict = forward(&m, &ForwardConfig::default());
    dict.remove("dubl");

    let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();
    assert!(!m2.has_field("dubl"));
    assert_ne!(m, m2);
}

#[test]
fn test_strict_vs_lenient() {
    let m = populated_message_of_types();
    let mut dict = forward(&m, &ForwardConfig::default());
    dict.insert("meow".to_string(), json!(1));

    let err = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnknownField { ref field, .. } if field == "meow"));

    let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::new().lenient()).unwrap();
    assert_eq!(m, m2);
}

#[test]
fn test_concrete_scenario() {
    let m = populated_message_of_types();
    let dict = forward(&m, &ForwardConfig::default());

    assert_eq!(dict["dubl"], json!(1.7e308));
    assert_eq!(dict["strng"], json!("string"));
    assert_eq!(dict["byts"], json!("ChQe"));
    assert_eq!(dict["enm"], json!(2));
    assert_eq!(dict["enmRepeated"], json!([0, 2]));

    assert_eq!(
        base64::engine::general_purpose::STANDARD
            .decode(dict["byts"].as_str().unwrap())
            .unwrap(),
        vec![0x0A, 0x14, 0x1E]
    );
}

#[test]
fn test_bytes_fidelity() {
    let payloads: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x00],
        vec![0x00, 0x01, 0x02, 0xFF, 0xFE, 0x00],
        (0u8..=255).collect(),
    ];

    for payload in payloads {
        let mut m = DynamicMessage::new(message_of_types());
        m.set("byts", FieldValue::Bytes(payload.clone())).unwrap();

        let dict = forward(&m, &ForwardConfig::default());
        let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();

        if payload.is_empty() {
            // Empty bytes still round-trip as a present (set) field.
            assert_eq!(m2.get_single("byts").unwrap().as_bytes(), Some(&payload[..]));
        }
        assert_eq!(m, m2);
    }
}

#[test]
fn test_nested_repeated() {
    let mut m = populated_message_of_types();
    for i in 0..10 {
        let sub = m.append_message_by_number(20).unwrap();
        sub.set("req", FieldValue::String(i.to_string())).unwrap();
    }

    let dict = forward(&m, &ForwardConfig::default());
    let expected: Vec<Value> = (0..10).map(|i| json!({"req": i.to_string()})).collect();
    assert_eq!(dict["nestedRepeated"], json!(expected));

    let m2 = dict_to_message(m.descriptor(), &dict, &ReverseConfig::default()).unwrap();
    assert_eq!(m, m2);
}

#[test]
fn test_into_existing_instance() {
    let mut m = populated_message_of_types();
    let mut dict = forward(&m, &ForwardConfig::default());
    dict.insert("dubl".to_string(), json!(1.0));

    dict_into_message(&mut m, &dict, &ReverseConfig::default()).unwrap();
    assert_eq!(m.get_single("dubl").unwrap().as_f64(), Some(1.0));
}

#[test]
fn test_failed_reverse_leaves_partial_message() {
    let descriptor = message_of_types();
    let mut m = DynamicMessage::new(descriptor);

    // "bol" converts before the failing "enm" key; the mutation sticks.
    let dict = {
        let mut d = Map::new();
        d.insert("bol".to_string(), json!(true));
        d.insert("enm".to_string(), json!("MEOW"));
        d
    };
    let err = dict_into_message(&mut m, &dict, &ReverseConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnknownEnumLabel { .. }));
    assert_eq!(m.get_single("bol").unwrap().as_bool(), Some(true));
}

#[test]
fn test_nested_type_descriptor_is_shared() {
    // The singular, repeated and extension nested fields all use one type.
    let desc = message_of_types();
    let singular = desc.field_by_name("nested").unwrap();
    let repeated = desc.field_by_name("nestedRepeated").unwrap();
    assert_eq!(singular.message_type, repeated.message_type);
    assert_eq!(*singular.message_type.as_ref().unwrap().as_ref(), nested_type());
}
