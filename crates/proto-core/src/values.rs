//! Runtime values and the dynamic message container.
//!
//! This module defines `FieldValue`, the runtime representation of a single
//! field value, and `DynamicMessage`, a schema-described message instance
//! with presence-tracked field storage addressed by field number.

use crate::schema::{FieldDescriptor, MessageDescriptor};
use std::collections::BTreeMap;

/// Error type for dynamic message operations.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Field name not declared by the message type
    #[error("Message type '{message}' has no field named '{field}'")]
    NoSuchField { message: String, field: String },

    /// Extension number not registered against the message type
    #[error("Message type '{message}' has no extension with number {number}")]
    NoSuchExtension { message: String, number: u32 },

    /// Append on a singular field
    #[error("Field '{field}' is not repeated")]
    NotRepeated { field: String },

    /// Single-value assignment on a repeated field
    #[error("Field '{field}' is not singular")]
    NotSingular { field: String },

    /// Submessage access on a non-message field
    #[error("Field '{field}' is not message-typed")]
    NotAMessage { field: String },
}

/// A single runtime field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer (plain, zig-zag and fixed encodings)
    Int32(i32),

    /// 64-bit signed integer (plain, zig-zag and fixed encodings)
    Int64(i64),

    /// 32-bit unsigned integer
    UInt32(u32),

    /// 64-bit unsigned integer
    UInt64(u64),

    /// 32-bit floating point
    Float(f32),

    /// 64-bit floating point
    Double(f64),

    /// UTF-8 text
    String(String),

    /// Raw bytes
    Bytes(Vec<u8>),

    /// Enum ordinal
    Enum(i32),

    /// Nested message
    Message(DynamicMessage),
}

impl FieldValue {
    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            Self::Int32(i) => Some(*i as i64),
            _ => None,
        }
    }

    /// Try to get this value as a u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::UInt32(u) => Some(*u),
            _ => None,
        }
    }

    /// Try to get this value as a u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt64(u) => Some(*u),
            Self::UInt32(u) => Some(*u as u64),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(f) => Some(*f),
            Self::Float(f) => Some(*f as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as an enum ordinal.
    pub fn as_enum(&self) -> Option<i32> {
        match self {
            Self::Enum(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get this value as a nested message.
    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }
}

/// Storage cell behind one field number.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSlot {
    /// A singular field's value
    Single(FieldValue),

    /// A repeated field's ordered sequence
    Repeated(Vec<FieldValue>),
}

impl FieldSlot {
    /// The singular value, when this slot is singular.
    pub fn as_single(&self) -> Option<&FieldValue> {
        match self {
            Self::Single(v) => Some(v),
            _ => None,
        }
    }

    /// The sequence, when this slot is repeated.
    pub fn as_repeated(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Repeated(vs) => Some(vs),
            _ => None,
        }
    }
}

/// One present field of a message, as yielded by enumeration.
#[derive(Debug, Clone, Copy)]
pub struct PresentField<'a> {
    /// The field's descriptor (own field or extension field)
    pub descriptor: &'a FieldDescriptor,

    /// The field's stored value(s)
    pub slot: &'a FieldSlot,

    /// Whether the field is an extension
    pub is_extension: bool,
}

/// A schema-described message instance.
///
/// Fields are stored by number with explicit presence: a singular field is
/// present once set, a repeated field is present while it holds at least one
/// element. Extension fields share the same storage and are addressed by
/// their registered number.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    descriptor: MessageDescriptor,
    fields: BTreeMap<u32, FieldSlot>,
}

impl DynamicMessage {
    /// Create a new zero-valued instance of a message type.
    pub fn new(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            fields: BTreeMap::new(),
        }
    }

    /// The message type descriptor.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// Enumerate present fields in field-number order.
    ///
    /// Repeated fields with no elements are not present and are skipped.
    pub fn present_fields(&self) -> Vec<PresentField<'_>> {
        self.fields
            .iter()
            .filter(|(_, slot)| !matches!(slot, FieldSlot::Repeated(vs) if vs.is_empty()))
            .filter_map(|(number, slot)| {
                if let Some(fd) = self.descriptor.field_by_number(*number) {
                    Some(PresentField {
                        descriptor: fd,
                        slot,
                        is_extension: false,
                    })
                } else {
                    self.descriptor
                        .extension_by_number(*number)
                        .map(|ext| PresentField {
                            descriptor: &ext.field,
                            slot,
                            is_extension: true,
                        })
                }
            })
            .collect()
    }

    /// Get an own field's slot by name.
    pub fn get(&self, name: &str) -> Option<&FieldSlot> {
        let fd = self.descriptor.field_by_name(name)?;
        self.fields.get(&fd.number)
    }

    /// Get a singular own field's value by name.
    pub fn get_single(&self, name: &str) -> Option<&FieldValue> {
        self.get(name)?.as_single()
    }

    /// Get a repeated own field's elements by name.
    pub fn get_repeated(&self, name: &str) -> Option<&[FieldValue]> {
        self.get(name)?.as_repeated()
    }

    /// Get an extension field's slot by number.
    pub fn get_extension(&self, number: u32) -> Option<&FieldSlot> {
        self.descriptor.extension_by_number(number)?;
        self.fields.get(&number)
    }

    /// Whether an own field is present.
    pub fn has_field(&self, name: &str) -> bool {
        match self.get(name) {
            Some(FieldSlot::Repeated(vs)) => !vs.is_empty(),
            Some(FieldSlot::Single(_)) => true,
            None => false,
        }
    }

    /// Set a singular own field's value by name.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), ValueError> {
        let fd = self.own_field(name)?;
        if fd.label.is_repeated() {
            return Err(ValueError::NotSingular {
                field: name.to_string(),
            });
        }
        let number = fd.number;
        self.fields.insert(number, FieldSlot::Single(value));
        Ok(())
    }

    /// Append to a repeated own field's sequence by name.
    pub fn append(&mut self, name: &str, value: FieldValue) -> Result<(), ValueError> {
        let fd = self.own_field(name)?;
        if !fd.label.is_repeated() {
            return Err(ValueError::NotRepeated {
                field: name.to_string(),
            });
        }
        let number = fd.number;
        self.push_element(number, value);
        Ok(())
    }

    /// Set a singular extension field's value by number.
    pub fn set_extension(&mut self, number: u32, value: FieldValue) -> Result<(), ValueError> {
        let fd = self.extension_field(number)?;
        if fd.label.is_repeated() {
            return Err(ValueError::NotSingular {
                field: fd.name.clone(),
            });
        }
        self.fields.insert(number, FieldSlot::Single(value));
        Ok(())
    }

    /// Append to a repeated extension field's sequence by number.
    pub fn append_extension(&mut self, number: u32, value: FieldValue) -> Result<(), ValueError> {
        let fd = self.extension_field(number)?;
        if !fd.label.is_repeated() {
            return Err(ValueError::NotRepeated {
                field: fd.name.clone(),
            });
        }
        self.push_element(number, value);
        Ok(())
    }

    /// Auto-initializing access to a singular message-typed field's
    /// submessage, addressed by number. Resolves own fields and extensions
    /// alike.
    pub fn mutable_message_by_number(
        &mut self,
        number: u32,
    ) -> Result<&mut DynamicMessage, ValueError> {
        let fd = self.any_field(number)?;
        if fd.label.is_repeated() {
            return Err(ValueError::NotSingular {
                field: fd.name.clone(),
            });
        }
        let (name, message_type) = Self::message_type_of(fd)?;
        let slot = self
            .fields
            .entry(number)
            .or_insert_with(|| FieldSlot::Single(FieldValue::Message(DynamicMessage::new(message_type))));
        match slot {
            FieldSlot::Single(FieldValue::Message(m)) => Ok(m),
            _ => Err(ValueError::NotAMessage { field: name }),
        }
    }

    /// Append a new zero-valued submessage to a repeated message-typed
    /// field's sequence, addressed by number, and return it for population.
    /// Resolves own fields and extensions alike.
    pub fn append_message_by_number(
        &mut self,
        number: u32,
    ) -> Result<&mut DynamicMessage, ValueError> {
        let fd = self.any_field(number)?;
        if !fd.label.is_repeated() {
            return Err(ValueError::NotRepeated {
                field: fd.name.clone(),
            });
        }
        let (name, message_type) = Self::message_type_of(fd)?;
        self.push_element(number, FieldValue::Message(DynamicMessage::new(message_type)));
        match self.fields.get_mut(&number) {
            Some(FieldSlot::Repeated(vs)) => match vs.last_mut() {
                Some(FieldValue::Message(m)) => Ok(m),
                _ => Err(ValueError::NotAMessage { field: name }),
            },
            _ => Err(ValueError::NotAMessage { field: name }),
        }
    }

    /// Clear an own field by name, returning it to the unset state.
    pub fn clear(&mut self, name: &str) -> Result<(), ValueError> {
        let number = self.own_field(name)?.number;
        self.fields.remove(&number);
        Ok(())
    }

    fn own_field(&self, name: &str) -> Result<&FieldDescriptor, ValueError> {
        self.descriptor
            .field_by_name(name)
            .ok_or_else(|| ValueError::NoSuchField {
                message: self.descriptor.name.clone(),
                field: name.to_string(),
            })
    }

    fn extension_field(&self, number: u32) -> Result<&FieldDescriptor, ValueError> {
        self.descriptor
            .extension_by_number(number)
            .map(|e| &e.field)
            .ok_or_else(|| ValueError::NoSuchExtension {
                message: self.descriptor.name.clone(),
                number,
            })
    }

    fn any_field(&self, number: u32) -> Result<&FieldDescriptor, ValueError> {
        if let Some(fd) = self.descriptor.field_by_number(number) {
            return Ok(fd);
        }
        self.extension_field(number)
    }

    fn message_type_of(fd: &FieldDescriptor) -> Result<(String, MessageDescriptor), ValueError> {
        match &fd.message_type {
            Some(mt) => Ok((fd.name.clone(), (**mt).clone())),
            None => Err(ValueError::NotAMessage {
                field: fd.name.clone(),
            }),
        }
    }

    fn push_element(&mut self, number: u32, value: FieldValue) {
        match self
            .fields
            .entry(number)
            .or_insert_with(|| FieldSlot::Repeated(Vec::new()))
        {
            FieldSlot::Repeated(vs) => vs.push(value),
            slot => *slot = FieldSlot::Repeated(vec![value]),
        }
    }
}
