//! Core schema and value model for proto-dict.
//!
//! This crate provides the foundational types used across the proto-dict
//! workspace, including:
//!
//! - [`WireType`] / [`FieldLabel`] - the closed field type universe
//! - [`MessageDescriptor`] and friends - message, field, enum and extension
//!   metadata
//! - [`DynamicMessage`] - a schema-described message instance with
//!   presence-tracked fields
//! - [`SchemaSet`] - descriptor collections loaded from YAML
//!
//! # Architecture
//!
//! The proto-core crate sits at the foundation of the workspace:
//!
//! ```text
//! proto-core (this crate)
//!    │
//!    └─── dict-types  (converts DynamicMessage ⇄ JSON-safe mappings)
//! ```
//!
//! # Example
//!
//! ```rust
//! use proto_core::schema::{FieldDescriptor, MessageDescriptor};
//! use proto_core::types::WireType;
//! use proto_core::values::{DynamicMessage, FieldValue};
//!
//! let descriptor = MessageDescriptor::new(
//!     "Person",
//!     vec![FieldDescriptor::new("id", 1, WireType::Int64)],
//! );
//!
//! let mut person = DynamicMessage::new(descriptor);
//! person.set("id", FieldValue::Int64(42)).unwrap();
//! assert!(person.has_field("id"));
//! ```

pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use schema::{
    EnumDescriptor, EnumValueDescriptor, ExtensionDescriptor, FieldDescriptor, MessageDescriptor,
    SchemaError, SchemaSet,
};
pub use types::{FieldLabel, WireType};
pub use values::{DynamicMessage, FieldSlot, FieldValue, PresentField, ValueError};
