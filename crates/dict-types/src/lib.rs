//! Dictionary conversions for proto-core messages.
//!
//! This crate provides bidirectional conversions between schema-described
//! [`DynamicMessage`](proto_core::DynamicMessage) instances and JSON-safe
//! nested mappings.
//!
//! # Modules
//!
//! - [`forward`] - message → dictionary conversion
//! - [`reverse`] - dictionary → message conversion
//! - [`error`] - conversion error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use dict_types::{message_to_dict, dict_to_message, ForwardConfig, ReverseConfig};
//!
//! // Forward: message → dictionary
//! let dict = message_to_dict(&msg, &ForwardConfig::default())?;
//!
//! // Reverse: dictionary → message
//! let rebuilt = dict_to_message(msg.descriptor(), &dict, &ReverseConfig::default())?;
//! assert_eq!(msg, rebuilt);
//! ```
//!
//! Extension fields are grouped under one reserved mapping key
//! ([`DEFAULT_EXTENSION_KEY`]) and addressed by decimal field number, since
//! extension names are not globally stable across schema revisions.

pub mod error;
pub mod forward;
pub mod reverse;

/// Default reserved mapping key holding extension fields.
pub const DEFAULT_EXTENSION_KEY: &str = "___X";

pub use error::{ConvertError, Result};
pub use forward::{enum_label_name, message_to_dict, ForwardConfig, ForwardScalarFn};
pub use reverse::{
    dict_into_message, dict_to_message, enum_label_number, ReverseConfig, ReverseScalarFn,
};
