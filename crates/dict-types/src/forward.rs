//! Forward conversion: message → dictionary representation.
//!
//! This module converts a [`DynamicMessage`] into a JSON-safe mapping. Only
//! fields the message reports as present appear in the output; byte strings
//! are base64-encoded so the result can be serialized to JSON directly.

use crate::error::{ConvertError, Result};
use crate::DEFAULT_EXTENSION_KEY;
use base64::Engine;
use proto_core::schema::{FieldDescriptor, MessageDescriptor};
use proto_core::types::WireType;
use proto_core::values::{DynamicMessage, FieldSlot, FieldValue};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// A caller-supplied scalar converter, consulted before the built-in
/// conversion for its wire type.
pub type ForwardScalarFn = fn(&FieldValue) -> Result<Value>;

/// Configuration for forward conversion.
///
/// Immutable once built; pass one config through a whole conversion (nested
/// messages convert with the same config).
///
/// # Example
///
/// ```
/// use dict_types::ForwardConfig;
///
/// let config = ForwardConfig::new()
///     .with_enum_labels()
///     .with_extension_key("$ext");
/// ```
#[derive(Debug, Clone)]
pub struct ForwardConfig {
    /// Emit enum fields as their declared label instead of the ordinal.
    pub use_enum_labels: bool,

    /// Reserved mapping key under which extension fields are grouped.
    pub extension_key: String,

    overrides: HashMap<WireType, ForwardScalarFn>,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            use_enum_labels: false,
            extension_key: DEFAULT_EXTENSION_KEY.to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl ForwardConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit enum fields as labels rather than ordinals.
    pub fn with_enum_labels(mut self) -> Self {
        self.use_enum_labels = true;
        self
    }

    /// Use a custom reserved key for extension fields.
    pub fn with_extension_key(mut self, key: impl Into<String>) -> Self {
        self.extension_key = key.into();
        self
    }

    /// Override the conversion for one scalar wire type.
    ///
    /// Overrides apply to scalar kinds only: message-typed fields always
    /// recurse, and when `use_enum_labels` is set the label resolver takes
    /// precedence over an `Enum` override.
    pub fn with_override(mut self, wire_type: WireType, converter: ForwardScalarFn) -> Self {
        self.overrides.insert(wire_type, converter);
        self
    }

    fn override_for(&self, wire_type: WireType) -> Option<ForwardScalarFn> {
        self.overrides.get(&wire_type).copied()
    }
}

/// Resolve the declared label for an enum field's ordinal.
pub fn enum_label_name(field: &FieldDescriptor, ordinal: i32) -> Result<&str> {
    let enum_type = field.enum_type.as_ref().ok_or_else(|| ConvertError::TypeMismatch {
        field: field.name.clone(),
        expected: "declared enum type".to_string(),
        actual: "no enum metadata".to_string(),
    })?;
    enum_type
        .value_name(ordinal)
        .ok_or_else(|| ConvertError::UnknownEnumOrdinal {
            enum_name: enum_type.name.clone(),
            number: ordinal,
        })
}

/// Convert a message into its dictionary representation.
///
/// Walks the message's present fields: non-extension fields store under
/// their name, extension fields store under
/// `config.extension_key → { "<field number>": value }`. Repeated fields
/// convert element-wise, preserving order. The input message is not mutated.
pub fn message_to_dict(msg: &DynamicMessage, config: &ForwardConfig) -> Result<Map<String, Value>> {
    tracing::trace!(message = %msg.descriptor().name, "converting message to dictionary");

    let mut dict = Map::new();
    let mut extensions = Map::new();
    for present in msg.present_fields() {
        let converted = convert_slot(msg.descriptor(), present.descriptor, present.slot, config)?;
        if present.is_extension {
            // Extension names are not globally stable; address by number.
            extensions.insert(present.descriptor.number.to_string(), converted);
        } else {
            dict.insert(present.descriptor.name.clone(), converted);
        }
    }
    if !extensions.is_empty() {
        dict.insert(config.extension_key.clone(), Value::Object(extensions));
    }
    Ok(dict)
}

fn convert_slot(
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    slot: &FieldSlot,
    config: &ForwardConfig,
) -> Result<Value> {
    match slot {
        FieldSlot::Single(value) => field_to_json(owner, field, value, config),
        FieldSlot::Repeated(values) => {
            let elements: Result<Vec<Value>> = values
                .iter()
                .map(|v| field_to_json(owner, field, v, config))
                .collect();
            Ok(Value::Array(elements?))
        }
    }
}

fn field_to_json(
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    value: &FieldValue,
    config: &ForwardConfig,
) -> Result<Value> {
    if field.field_type.is_message() {
        let nested = value
            .as_message()
            .ok_or_else(|| unsupported(owner, field))?;
        return Ok(Value::Object(message_to_dict(nested, config)?));
    }
    if field.field_type.is_enum() && config.use_enum_labels {
        let ordinal = value.as_enum().ok_or_else(|| unsupported(owner, field))?;
        return Ok(json!(enum_label_name(field, ordinal)?));
    }
    if let Some(converter) = config.override_for(field.field_type) {
        return converter(value);
    }
    scalar_to_json(owner, field, value)
}

fn scalar_to_json(
    owner: &MessageDescriptor,
    field: &FieldDescriptor,
    value: &FieldValue,
) -> Result<Value> {
    match (field.field_type, value) {
        (WireType::Double, FieldValue::Double(f)) => Ok(json!(*f)),
        (WireType::Float, FieldValue::Float(f)) => Ok(json!(*f)),
        (
            WireType::Int32 | WireType::SInt32 | WireType::SFixed32,
            FieldValue::Int32(i),
        ) => Ok(json!(*i)),
        (
            WireType::Int64 | WireType::SInt64 | WireType::SFixed64,
            FieldValue::Int64(i),
        ) => Ok(json!(*i)),
        (WireType::UInt32 | WireType::Fixed32, FieldValue::UInt32(u)) => Ok(json!(*u)),
        (WireType::UInt64 | WireType::Fixed64, FieldValue::UInt64(u)) => Ok(json!(*u)),
        (WireType::Bool, FieldValue::Bool(b)) => Ok(json!(*b)),
        (WireType::String, FieldValue::String(s)) => Ok(json!(s)),
        (WireType::Bytes, FieldValue::Bytes(b)) => {
            Ok(json!(base64::engine::general_purpose::STANDARD.encode(b)))
        }
        (WireType::Enum, FieldValue::Enum(n)) => Ok(json!(*n)),
        _ => Err(unsupported(owner, field)),
    }
}

fn unsupported(owner: &MessageDescriptor, field: &FieldDescriptor) -> ConvertError {
    ConvertError::UnsupportedFieldType {
        message: owner.name.clone(),
        field: field.name.clone(),
        type_id: field.field_type.id(),
    }
}
