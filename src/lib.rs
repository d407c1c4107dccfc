//! proto-dict
//!
//! A library for converting schema-described structured messages to and from
//! a generic, JSON-safe nested mapping representation.
//!
//! # Features
//!
//! - Forward conversion: present fields of a message become mapping entries,
//!   with bytes base64-encoded and enums rendered as ordinals or labels
//! - Reverse conversion: mapping keys resolve against the target schema and
//!   rebuild a message, strictly or leniently
//! - Extension fields: grouped under one reserved key and addressed by field
//!   number for schema compatibility
//! - Synthetic schemas: descriptors are plain values, so test schemas build
//!   programmatically or load from YAML without a schema-compiler toolchain
//!
//! # Workspace Crates
//!
//! - `proto_core` - descriptors, wire types and the dynamic message model
//! - `dict_types` - the forward and reverse conversion engine
//!
//! # Example
//!
//! ```rust
//! use proto_dict::core::{DynamicMessage, FieldValue};
//! use proto_dict::dict::{dict_to_message, message_to_dict, ForwardConfig, ReverseConfig};
//!
//! let mut msg = DynamicMessage::new(proto_dict::testing::message_of_types());
//! msg.set("strng", FieldValue::String("hello".into())).unwrap();
//!
//! let dict = message_to_dict(&msg, &ForwardConfig::default()).unwrap();
//! assert_eq!(dict["strng"], serde_json::json!("hello"));
//!
//! let rebuilt = dict_to_message(msg.descriptor(), &dict, &ReverseConfig::default()).unwrap();
//! assert_eq!(msg, rebuilt);
//! ```

pub mod testing;

// Re-export the member crates for convenience
pub use dict_types as dict;
pub use proto_core as core;
