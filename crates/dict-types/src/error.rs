//! Error types for dictionary conversions.
//!
//! This module defines error types returned when a conversion between a
//! message and its dictionary representation fails. Conversions fail fast:
//! the first defect aborts the call, and a reverse conversion that fails
//! partway leaves its output message partially populated.

use thiserror::Error;

/// Errors that can occur during message/dictionary conversions.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A field's declared wire type cannot convert the runtime value it holds.
    #[error("Field {message}.{field} has unrecognised type id {type_id}")]
    UnsupportedFieldType {
        message: String,
        field: String,
        type_id: i32,
    },

    /// A mapping key does not name a field of the target type (strict mode).
    #[error("Message type '{message}' has no field called '{field}'")]
    UnknownField { message: String, field: String },

    /// An enum label is not declared by the field's enum type.
    #[error("Enum field '{field}' has no value named '{label}'")]
    UnknownEnumLabel { field: String, label: String },

    /// An enum ordinal is not declared by the enum type.
    #[error("Enum type '{enum_name}' has no value with number {number}")]
    UnknownEnumOrdinal { enum_name: String, number: i32 },

    /// A byte-string text value is not valid base64.
    #[error("Invalid base64 in field '{field}': {source}")]
    InvalidEncoding {
        field: String,
        #[source]
        source: base64::DecodeError,
    },

    /// A mapping value has the wrong JSON shape for its field.
    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A reflection operation on the message under construction failed.
    #[error("Reflection error: {0}")]
    Reflection(#[from] proto_core::ValueError),
}

/// Result type for dictionary conversions.
pub type Result<T> = std::result::Result<T, ConvertError>;
