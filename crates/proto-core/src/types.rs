//! Core type enumerations for the proto-dict schema model.
//!
//! This module defines `WireType`, the closed universe of field encodings a
//! schema field can carry, and `FieldLabel`, the singular/repeated marker.

use serde::{Deserialize, Serialize};

/// The fixed enumeration of scalar and message encodings a field can have.
///
/// `WireType` covers the full protocol-buffer field type universe. Matching
/// on it is exhaustive everywhere in the conversion engine, so adding a new
/// wire type surfaces every site that needs updating at compile time.
///
/// # YAML Format
///
/// Schema files name wire types in lowercase:
///
/// ```yaml
/// type: double
/// type: sint64
/// type: bytes
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireType {
    /// 64-bit IEEE 754 floating point
    Double,

    /// 32-bit IEEE 754 floating point
    Float,

    /// 32-bit signed integer, varint encoding
    Int32,

    /// 64-bit signed integer, varint encoding
    Int64,

    /// 32-bit unsigned integer, varint encoding
    UInt32,

    /// 64-bit unsigned integer, varint encoding
    UInt64,

    /// 32-bit signed integer, zig-zag encoding
    SInt32,

    /// 64-bit signed integer, zig-zag encoding
    SInt64,

    /// 32-bit unsigned integer, fixed-width encoding
    Fixed32,

    /// 64-bit unsigned integer, fixed-width encoding
    Fixed64,

    /// 32-bit signed integer, fixed-width encoding
    SFixed32,

    /// 64-bit signed integer, fixed-width encoding
    SFixed64,

    /// Boolean value
    Bool,

    /// UTF-8 text
    String,

    /// Raw byte string
    Bytes,

    /// Enumeration value, stored as its numeric ordinal
    Enum,

    /// Nested message
    Message,
}

impl WireType {
    /// The numeric descriptor type id, as assigned by the protocol-buffer
    /// descriptor model. Used in diagnostics only.
    pub fn id(&self) -> i32 {
        match self {
            WireType::Double => 1,
            WireType::Float => 2,
            WireType::Int64 => 3,
            WireType::UInt64 => 4,
            WireType::Int32 => 5,
            WireType::Fixed64 => 6,
            WireType::Fixed32 => 7,
            WireType::Bool => 8,
            WireType::String => 9,
            WireType::Message => 11,
            WireType::Bytes => 12,
            WireType::UInt32 => 13,
            WireType::Enum => 14,
            WireType::SFixed32 => 15,
            WireType::SFixed64 => 16,
            WireType::SInt32 => 17,
            WireType::SInt64 => 18,
        }
    }

    /// Whether this wire type carries a nested message.
    pub fn is_message(&self) -> bool {
        matches!(self, WireType::Message)
    }

    /// Whether this wire type carries an enum ordinal.
    pub fn is_enum(&self) -> bool {
        matches!(self, WireType::Enum)
    }
}

/// Whether a field holds a single value or an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLabel {
    /// At most one value
    #[default]
    Singular,

    /// An ordered sequence of values
    Repeated,
}

impl FieldLabel {
    /// Whether this label marks a repeated field.
    pub fn is_repeated(&self) -> bool {
        matches!(self, FieldLabel::Repeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_type_ids_are_distinct() {
        let all = [
            WireType::Double,
            WireType::Float,
            WireType::Int32,
            WireType::Int64,
            WireType::UInt32,
            WireType::UInt64,
            WireType::SInt32,
            WireType::SInt64,
            WireType::Fixed32,
            WireType::Fixed64,
            WireType::SFixed32,
            WireType::SFixed64,
            WireType::Bool,
            WireType::String,
            WireType::Bytes,
            WireType::Enum,
            WireType::Message,
        ];
        let mut ids: Vec<i32> = all.iter().map(|t| t.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_wire_type_yaml_names() {
        let ty: WireType = serde_yaml::from_str("sfixed64").unwrap();
        assert_eq!(ty, WireType::SFixed64);

        let ty: WireType = serde_yaml::from_str("uint32").unwrap();
        assert_eq!(ty, WireType::UInt32);

        assert_eq!(serde_yaml::to_string(&WireType::Bytes).unwrap().trim(), "bytes");
    }

    #[test]
    fn test_label_default_is_singular() {
        assert_eq!(FieldLabel::default(), FieldLabel::Singular);
        assert!(!FieldLabel::Singular.is_repeated());
        assert!(FieldLabel::Repeated.is_repeated());
    }
}
