//! Pre-defined synthetic schemas for tests
//!
//! Provides a ready-to-use message descriptor covering every wire type,
//! plus a fully-populated instance builder, so conversion behavior can be
//! exercised without any schema-compiler toolchain.

use proto_core::schema::{
    EnumDescriptor, ExtensionDescriptor, FieldDescriptor, MessageDescriptor,
};
use proto_core::types::WireType;
use proto_core::values::{DynamicMessage, FieldValue};

/// Field number of the top-level double extension.
pub const EXT_DOUBLE: u32 = 100;

/// Field number of the top-level string extension.
pub const EXT_STRING: u32 = 101;

/// Field number of the int32 extension declared inside `NestedExtension`.
pub const EXT_INT: u32 = 102;

/// Field number of the message extension declared inside `NestedExtension`.
pub const EXT_NESTED: u32 = 103;

/// The nested message type used by singular, repeated and extension fields.
pub fn nested_type() -> MessageDescriptor {
    MessageDescriptor::new(
        "NestedType",
        vec![FieldDescriptor::new("req", 1, WireType::String)],
    )
}

fn letters() -> EnumDescriptor {
    EnumDescriptor::new("Letters", vec![("A", 0), ("B", 1), ("C", 2)])
}

/// Create the `MessageOfTypes` descriptor: one field per wire type, an enum
/// (singular and repeated), nested messages, and four registered extensions.
pub fn message_of_types() -> MessageDescriptor {
    MessageDescriptor::new(
        "MessageOfTypes",
        vec![
            FieldDescriptor::new("dubl", 1, WireType::Double),
            FieldDescriptor::new("flot", 2, WireType::Float),
            FieldDescriptor::new("i32", 3, WireType::Int32),
            FieldDescriptor::new("i64", 4, WireType::Int64),
            FieldDescriptor::new("ui32", 5, WireType::UInt32),
            FieldDescriptor::new("ui64", 6, WireType::UInt64),
            FieldDescriptor::new("si32", 7, WireType::SInt32),
            FieldDescriptor::new("si64", 8, WireType::SInt64),
            FieldDescriptor::new("f32", 9, WireType::Fixed32),
            FieldDescriptor::new("f64", 10, WireType::Fixed64),
            FieldDescriptor::new("sf32", 11, WireType::SFixed32),
            FieldDescriptor::new("sf64", 12, WireType::SFixed64),
            FieldDescriptor::new("bol", 13, WireType::Bool),
            FieldDescriptor::new("strng", 14, WireType::String),
            FieldDescriptor::new("byts", 15, WireType::Bytes),
            FieldDescriptor::new("nested", 16, WireType::Message).with_message_type(nested_type()),
            FieldDescriptor::new("enm", 17, WireType::Enum).with_enum_type(letters()),
            FieldDescriptor::repeated("enmRepeated", 18, WireType::Enum).with_enum_type(letters()),
            FieldDescriptor::repeated("range", 19, WireType::Int32),
            FieldDescriptor::repeated("nestedRepeated", 20, WireType::Message)
                .with_message_type(nested_type()),
        ],
    )
    .with_extensions(vec![
        ExtensionDescriptor::new(FieldDescriptor::new("extDouble", EXT_DOUBLE, WireType::Double)),
        ExtensionDescriptor::new(FieldDescriptor::new("extString", EXT_STRING, WireType::String)),
        ExtensionDescriptor::scoped(
            "NestedExtension",
            FieldDescriptor::new("extInt", EXT_INT, WireType::Int32),
        ),
        ExtensionDescriptor::scoped(
            "NestedExtension",
            FieldDescriptor::new("extNested", EXT_NESTED, WireType::Message)
                .with_message_type(nested_type()),
        ),
    ])
}

/// Build a `MessageOfTypes` instance with every non-extension field
/// explicitly set, including boundary numeric values.
pub fn populated_message_of_types() -> DynamicMessage {
    let mut m = DynamicMessage::new(message_of_types());

    m.set("dubl", FieldValue::Double(1.7e308)).unwrap();
    m.set("flot", FieldValue::Float(3.4e38)).unwrap();
    m.set("i32", FieldValue::Int32(i32::MAX)).unwrap();
    m.set("i64", FieldValue::Int64(i64::MAX)).unwrap();
    m.set("ui32", FieldValue::UInt32(u32::MAX)).unwrap();
    m.set("ui64", FieldValue::UInt64(u64::MAX)).unwrap();
    m.set("si32", FieldValue::Int32(-i32::MAX)).unwrap();
    m.set("si64", FieldValue::Int64(-i64::MAX)).unwrap();
    m.set("f32", FieldValue::UInt32(i32::MAX as u32)).unwrap();
    m.set("f64", FieldValue::UInt64(i64::MAX as u64)).unwrap();
    m.set("sf32", FieldValue::Int32(-i32::MAX)).unwrap();
    m.set("sf64", FieldValue::Int64(-i64::MAX)).unwrap();
    m.set("bol", FieldValue::Bool(true)).unwrap();
    m.set("strng", FieldValue::String("string".to_string())).unwrap();
    m.set("byts", FieldValue::Bytes(vec![0x0A, 0x14, 0x1E])).unwrap();
    m.mutable_message_by_number(16)
        .unwrap()
        .set("req", FieldValue::String("req".to_string()))
        .unwrap();
    m.set("enm", FieldValue::Enum(2)).unwrap();
    m.append("enmRepeated", FieldValue::Enum(0)).unwrap();
    m.append("enmRepeated", FieldValue::Enum(2)).unwrap();
    for i in 0..10 {
        m.append("range", FieldValue::Int32(i)).unwrap();
    }

    m
}
