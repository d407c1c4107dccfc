//! Descriptor model for schema-described messages.
//!
//! This module defines the descriptor types that describe message schemas:
//!
//! - `EnumDescriptor` / `EnumValueDescriptor` - enum metadata with
//!   bidirectional ordinal/label lookup
//! - `FieldDescriptor` - a single field's name, number, wire type and label
//! - `ExtensionDescriptor` - a field declared outside its message's own type
//! - `MessageDescriptor` - a message type with its fields and registered
//!   extensions
//! - `SchemaSet` - a named collection of message descriptors, loadable from
//!   YAML schema files
//!
//! Nested message and enum types are owned inline by the referencing field.
//! Cyclic message-type graphs are not supported.

use crate::types::{FieldLabel, WireType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading a schema file
    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Message type not found in the schema set
    #[error("Message type not found: {0}")]
    MessageNotFound(String),
}

// ============================================================================
// Enum Descriptors
// ============================================================================

/// A single declared enum value: symbolic label plus numeric ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    /// Symbolic label
    pub name: String,

    /// Numeric ordinal
    pub number: i32,
}

/// Enum type metadata with bidirectional ordinal/label lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Enum type name
    pub name: String,

    /// Declared values
    pub values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
    /// Create a new enum descriptor from (label, ordinal) pairs.
    pub fn new(name: impl Into<String>, values: Vec<(&str, i32)>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(name, number)| EnumValueDescriptor {
                    name: name.to_string(),
                    number,
                })
                .collect(),
        }
    }

    /// Look up the label declared for an ordinal.
    pub fn value_name(&self, number: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.number == number)
            .map(|v| v.name.as_str())
    }

    /// Look up the ordinal declared for a label.
    pub fn value_number(&self, name: &str) -> Option<i32> {
        self.values.iter().find(|v| v.name == name).map(|v| v.number)
    }
}

// ============================================================================
// Field and Message Descriptors
// ============================================================================

/// A single field of a message type.
///
/// For message-typed and enum-typed fields the nested type descriptor is
/// carried inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Unique field number within the owning message type
    pub number: u32,

    /// Wire type
    #[serde(rename = "type")]
    pub field_type: WireType,

    /// Singular or repeated
    #[serde(default)]
    pub label: FieldLabel,

    /// Nested message type, for message-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<Box<MessageDescriptor>>,

    /// Enum type, for enum-typed fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_type: Option<EnumDescriptor>,
}

impl FieldDescriptor {
    /// Create a new singular field descriptor.
    pub fn new(name: impl Into<String>, number: u32, field_type: WireType) -> Self {
        Self {
            name: name.into(),
            number,
            field_type,
            label: FieldLabel::Singular,
            message_type: None,
            enum_type: None,
        }
    }

    /// Create a new repeated field descriptor.
    pub fn repeated(name: impl Into<String>, number: u32, field_type: WireType) -> Self {
        Self {
            label: FieldLabel::Repeated,
            ..Self::new(name, number, field_type)
        }
    }

    /// Attach a nested message type. The wire type must be `Message`.
    pub fn with_message_type(mut self, message_type: MessageDescriptor) -> Self {
        self.message_type = Some(Box::new(message_type));
        self
    }

    /// Attach an enum type. The wire type must be `Enum`.
    pub fn with_enum_type(mut self, enum_type: EnumDescriptor) -> Self {
        self.enum_type = Some(enum_type);
        self
    }
}

/// A field declared outside its message's own type.
///
/// Extensions are addressed by field number rather than name, optionally
/// grouped under a named extending scope. The scope is metadata only: all
/// extensions of a message type share one number table, so lookup ignores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Name of the declaring scope, when the extension is nested in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// The extension field itself
    pub field: FieldDescriptor,
}

impl ExtensionDescriptor {
    /// Create a top-level extension.
    pub fn new(field: FieldDescriptor) -> Self {
        Self { scope: None, field }
    }

    /// Create an extension declared inside a named extending scope.
    pub fn scoped(scope: impl Into<String>, field: FieldDescriptor) -> Self {
        Self {
            scope: Some(scope.into()),
            field,
        }
    }
}

/// A message type: named, with its own fields plus registered extensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    /// Message type name
    pub name: String,

    /// Field descriptors declared by the type itself
    pub fields: Vec<FieldDescriptor>,

    /// Extensions registered against this type, addressed by number
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<ExtensionDescriptor>,
}

impl MessageDescriptor {
    /// Create a new message descriptor.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
            extensions: Vec::new(),
        }
    }

    /// Register extensions against this type.
    pub fn with_extensions(mut self, extensions: Vec<ExtensionDescriptor>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Get an own field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get an own field by number.
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Get a registered extension by number.
    pub fn extension_by_number(&self, number: u32) -> Option<&ExtensionDescriptor> {
        self.extensions.iter().find(|e| e.field.number == number)
    }

    /// All own field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

// ============================================================================
// Schema Sets
// ============================================================================

/// A named collection of message descriptors.
///
/// Schema sets can be built programmatically or loaded from YAML files:
///
/// ```yaml
/// messages:
///   - name: Person
///     fields:
///       - { name: id, number: 1, type: int64 }
///       - { name: email, number: 2, type: string }
///       - { name: avatar, number: 3, type: bytes }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaSet {
    /// Message descriptors in this set
    pub messages: Vec<MessageDescriptor>,
}

impl SchemaSet {
    /// Create a new schema set.
    pub fn new(messages: Vec<MessageDescriptor>) -> Self {
        Self { messages }
    }

    /// Parse a schema set from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a schema set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Get a message descriptor by name.
    pub fn get_message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Get a message descriptor by name, failing when absent.
    pub fn require_message(&self, name: &str) -> Result<&MessageDescriptor, SchemaError> {
        self.get_message(name)
            .ok_or_else(|| SchemaError::MessageNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_enum() -> EnumDescriptor {
        EnumDescriptor::new("Color", vec![("RED", 0), ("GREEN", 1), ("BLUE", 2)])
    }

    #[test]
    fn test_enum_lookup() {
        let e = color_enum();
        assert_eq!(e.value_name(1), Some("GREEN"));
        assert_eq!(e.value_name(9), None);
        assert_eq!(e.value_number("BLUE"), Some(2));
        assert_eq!(e.value_number("MEOW"), None);
    }

    #[test]
    fn test_message_field_lookup() {
        let desc = MessageDescriptor::new(
            "Person",
            vec![
                FieldDescriptor::new("id", 1, WireType::Int64),
                FieldDescriptor::repeated("tags", 2, WireType::String),
            ],
        );

        assert_eq!(desc.field_by_name("id").unwrap().number, 1);
        assert!(desc.field_by_name("missing").is_none());
        assert_eq!(desc.field_by_number(2).unwrap().name, "tags");
        assert_eq!(desc.field_names(), vec!["id", "tags"]);
        assert!(desc.field_by_number(2).unwrap().label.is_repeated());
    }

    #[test]
    fn test_extension_lookup_ignores_scope() {
        let desc = MessageDescriptor::new("Host", vec![]).with_extensions(vec![
            ExtensionDescriptor::new(FieldDescriptor::new("ext_a", 100, WireType::Double)),
            ExtensionDescriptor::scoped(
                "Nested",
                FieldDescriptor::new("ext_b", 101, WireType::Int32),
            ),
        ]);

        assert_eq!(desc.extension_by_number(100).unwrap().field.name, "ext_a");
        let nested = desc.extension_by_number(101).unwrap();
        assert_eq!(nested.scope.as_deref(), Some("Nested"));
        assert!(desc.extension_by_number(102).is_none());
    }

    #[test]
    fn test_schema_set_from_yaml() {
        let yaml = r#"
messages:
  - name: Person
    fields:
      - { name: id, number: 1, type: int64 }
      - { name: email, number: 2, type: string }
      - { name: tags, number: 3, type: string, label: repeated }
      - name: color
        number: 4
        type: enum
        enum_type:
          name: Color
          values:
            - { name: RED, number: 0 }
            - { name: BLUE, number: 2 }
"#;
        let set = SchemaSet::from_yaml_str(yaml).unwrap();
        let person = set.require_message("Person").unwrap();
        assert_eq!(person.field_by_name("id").unwrap().field_type, WireType::Int64);
        assert_eq!(person.field_by_name("tags").unwrap().label, FieldLabel::Repeated);
        assert_eq!(person.field_by_name("email").unwrap().label, FieldLabel::Singular);

        let color = person.field_by_name("color").unwrap();
        assert_eq!(color.field_type, WireType::Enum);
        assert_eq!(color.enum_type.as_ref().unwrap().value_number("BLUE"), Some(2));

        assert!(matches!(
            set.require_message("Pet"),
            Err(SchemaError::MessageNotFound(_))
        ));
    }

    #[test]
    fn test_nested_message_yaml() {
        let yaml = r#"
messages:
  - name: Outer
    fields:
      - name: inner
        number: 1
        type: message
        message_type:
          name: Inner
          fields:
            - { name: req, number: 1, type: string }
"#;
        let set = SchemaSet::from_yaml_str(yaml).unwrap();
        let outer = set.get_message("Outer").unwrap();
        let inner = outer.field_by_name("inner").unwrap();
        assert!(inner.field_type.is_message());
        assert_eq!(inner.message_type.as_ref().unwrap().name, "Inner");
    }
}
