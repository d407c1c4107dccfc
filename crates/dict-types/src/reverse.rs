//! Reverse conversion: dictionary representation → message.
//!
//! This module converts a JSON-safe mapping back into a [`DynamicMessage`],
//! resolving each key against the target type's field table and recursing
//! through nested and extension messages.
//!
//! Reverse conversion is fatal-by-construction: a failure partway leaves the
//! message under construction partially populated. There is no rollback;
//! callers must discard the output of a failed conversion.

use crate::error::{ConvertError, Result};
use crate::DEFAULT_EXTENSION_KEY;
use base64::Engine;
use proto_core::schema::{FieldDescriptor, MessageDescriptor};
use proto_core::types::WireType;
use proto_core::values::{DynamicMessage, FieldValue};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A caller-supplied scalar converter, consulted before the built-in
/// conversion for its wire type.
pub type ReverseScalarFn = fn(&Value) -> Result<FieldValue>;

/// Configuration for reverse conversion.
///
/// # Example
///
/// ```
/// use dict_types::ReverseConfig;
///
/// let config = ReverseConfig::new().lenient();
/// ```
#[derive(Debug, Clone)]
pub struct ReverseConfig {
    /// Fail on mapping keys that do not name a schema field. When false,
    /// unknown keys are skipped. Enum label/ordinal defects stay fatal in
    /// both modes.
    pub strict: bool,

    /// Reserved mapping key under which extension fields are grouped.
    pub extension_key: String,

    overrides: HashMap<WireType, ReverseScalarFn>,
}

impl Default for ReverseConfig {
    fn default() -> Self {
        Self {
            strict: true,
            extension_key: DEFAULT_EXTENSION_KEY.to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl ReverseConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unknown mapping keys instead of failing.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Use a custom reserved key for extension fields.
    pub fn with_extension_key(mut self, key: impl Into<String>) -> Self {
        self.extension_key = key.into();
        self
    }

    /// Override the conversion for one scalar wire type.
    pub fn with_override(mut self, wire_type: WireType, converter: ReverseScalarFn) -> Self {
        self.overrides.insert(wire_type, converter);
        self
    }

    fn override_for(&self, wire_type: WireType) -> Option<ReverseScalarFn> {
        self.overrides.get(&wire_type).copied()
    }
}

/// Resolve the declared ordinal for an enum field's label.
pub fn enum_label_number(field: &FieldDescriptor, label: &str) -> Result<i32> {
    let enum_type = field.enum_type.as_ref().ok_or_else(|| ConvertError::TypeMismatch {
        field: field.name.clone(),
        expected: "declared enum type".to_string(),
        actual: "no enum metadata".to_string(),
    })?;
    enum_type
        .value_number(label)
        .ok_or_else(|| ConvertError::UnknownEnumLabel {
            field: field.name.clone(),
            label: label.to_string(),
        })
}

/// Convert a dictionary representation into a new message instance.
pub fn dict_to_message(
    descriptor: &MessageDescriptor,
    dict: &Map<String, Value>,
    config: &ReverseConfig,
) -> Result<DynamicMessage> {
    let mut msg = DynamicMessage::new(descriptor.clone());
    dict_into_message(&mut msg, dict, config)?;
    Ok(msg)
}

/// Convert a dictionary representation into an existing message instance,
/// mutating it in place.
///
/// Keys absent from the mapping leave their fields untouched; a singular
/// nested mapping merges into an already-present submessage. On failure the
/// message keeps every mutation applied before the failing key.
pub fn dict_into_message(
    msg: &mut DynamicMessage,
    dict: &Map<String, Value>,
    config: &ReverseConfig,
) -> Result<()> {
    tracing::trace!(message = %msg.descriptor().name, "converting dictionary into message");

    for (key, value) in dict {
        if *key == config.extension_key {
            continue;
        }
        let field = match msg.descriptor().field_by_name(key) {
            Some(fd) => fd.clone(),
            None if config.strict => {
                return Err(ConvertError::UnknownField {
                    message: msg.descriptor().name.clone(),
                    field: key.clone(),
                });
            }
            None => {
                tracing::debug!(message = %msg.descriptor().name, field = %key, "skipping unknown field");
                continue;
            }
        };
        apply_field(msg, &field, false, value, config)?;
    }

    if let Some(raw) = dict.get(config.extension_key.as_str()) {
        let Value::Object(entries) = raw else {
            return Err(ConvertError::TypeMismatch {
                field: config.extension_key.clone(),
                expected: "object keyed by field number".to_string(),
                actual: json_kind(raw).to_string(),
            });
        };
        for (num_key, value) in entries {
            let resolved = num_key
                .parse::<u32>()
                .ok()
                .and_then(|n| msg.descriptor().extension_by_number(n))
                .map(|e| e.field.clone());
            let field = match resolved {
                Some(fd) => fd,
                None if config.strict => {
                    return Err(ConvertError::UnknownField {
                        message: msg.descriptor().name.clone(),
                        field: num_key.clone(),
                    });
                }
                None => {
                    tracing::debug!(message = %msg.descriptor().name, field = %num_key, "skipping unknown extension entry");
                    continue;
                }
            };
            apply_field(msg, &field, true, value, config)?;
        }
    }

    Ok(())
}

fn apply_field(
    msg: &mut DynamicMessage,
    field: &FieldDescriptor,
    is_extension: bool,
    value: &Value,
    config: &ReverseConfig,
) -> Result<()> {
    if field.label.is_repeated() {
        let Value::Array(items) = value else {
            return Err(type_mismatch(field, "array", value));
        };
        for item in items {
            if field.field_type.is_message() {
                let Value::Object(obj) = item else {
                    return Err(type_mismatch(field, "object", item));
                };
                let sub = msg.append_message_by_number(field.number)?;
                dict_into_message(sub, obj, config)?;
            } else {
                let element = scalar_from_json(field, item, config)?;
                if is_extension {
                    msg.append_extension(field.number, element)?;
                } else {
                    msg.append(&field.name, element)?;
                }
            }
        }
        return Ok(());
    }

    if field.field_type.is_message() {
        let Value::Object(obj) = value else {
            return Err(type_mismatch(field, "object", value));
        };
        let sub = msg.mutable_message_by_number(field.number)?;
        return dict_into_message(sub, obj, config);
    }

    let converted = scalar_from_json(field, value, config)?;
    if is_extension {
        msg.set_extension(field.number, converted)?;
    } else {
        msg.set(&field.name, converted)?;
    }
    Ok(())
}

fn scalar_from_json(field: &FieldDescriptor, value: &Value, config: &ReverseConfig) -> Result<FieldValue> {
    if let Some(converter) = config.override_for(field.field_type) {
        return converter(value);
    }
    match field.field_type {
        WireType::Double => value
            .as_f64()
            .map(FieldValue::Double)
            .ok_or_else(|| type_mismatch(field, "number", value)),
        WireType::Float => value
            .as_f64()
            .map(|f| FieldValue::Float(f as f32))
            .ok_or_else(|| type_mismatch(field, "number", value)),
        WireType::Int32 | WireType::SInt32 | WireType::SFixed32 => {
            let i = value
                .as_i64()
                .ok_or_else(|| type_mismatch(field, "integer", value))?;
            i32::try_from(i)
                .map(FieldValue::Int32)
                .map_err(|_| type_mismatch(field, "32-bit integer", value))
        }
        WireType::Int64 | WireType::SInt64 | WireType::SFixed64 => value
            .as_i64()
            .map(FieldValue::Int64)
            .ok_or_else(|| type_mismatch(field, "integer", value)),
        WireType::UInt32 | WireType::Fixed32 => {
            let u = value
                .as_u64()
                .ok_or_else(|| type_mismatch(field, "unsigned integer", value))?;
            u32::try_from(u)
                .map(FieldValue::UInt32)
                .map_err(|_| type_mismatch(field, "32-bit unsigned integer", value))
        }
        WireType::UInt64 | WireType::Fixed64 => value
            .as_u64()
            .map(FieldValue::UInt64)
            .ok_or_else(|| type_mismatch(field, "unsigned integer", value)),
        WireType::Bool => value
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| type_mismatch(field, "boolean", value)),
        WireType::String => value
            .as_str()
            .map(|s| FieldValue::String(s.to_string()))
            .ok_or_else(|| type_mismatch(field, "string", value)),
        WireType::Bytes => {
            let text = value
                .as_str()
                .ok_or_else(|| type_mismatch(field, "base64 string", value))?;
            base64::engine::general_purpose::STANDARD
                .decode(text)
                .map(FieldValue::Bytes)
                .map_err(|source| ConvertError::InvalidEncoding {
                    field: field.name.clone(),
                    source,
                })
        }
        WireType::Enum => enum_from_json(field, value),
        // Message-typed fields are handled structurally before dispatch.
        WireType::Message => Err(type_mismatch(field, "object", value)),
    }
}

fn enum_from_json(field: &FieldDescriptor, value: &Value) -> Result<FieldValue> {
    match value {
        Value::Number(_) => {
            let ordinal = value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| type_mismatch(field, "integer ordinal", value))?;
            let enum_type = field.enum_type.as_ref().ok_or_else(|| ConvertError::TypeMismatch {
                field: field.name.clone(),
                expected: "declared enum type".to_string(),
                actual: "no enum metadata".to_string(),
            })?;
            if enum_type.value_name(ordinal).is_none() {
                return Err(ConvertError::UnknownEnumOrdinal {
                    enum_name: enum_type.name.clone(),
                    number: ordinal,
                });
            }
            Ok(FieldValue::Enum(ordinal))
        }
        Value::String(label) => Ok(FieldValue::Enum(enum_label_number(field, label)?)),
        _ => Err(type_mismatch(field, "ordinal or label", value)),
    }
}

fn type_mismatch(field: &FieldDescriptor, expected: &str, value: &Value) -> ConvertError {
    ConvertError::TypeMismatch {
        field: field.name.clone(),
        expected: expected.to_string(),
        actual: json_kind(value).to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
