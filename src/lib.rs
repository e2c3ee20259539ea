//! Typed Provider SDK
//!
//! This crate translates between strongly-typed resource models and the flat,
//! dynamically-typed attribute state that a provider host persists. Resource
//! authors declare a struct whose fields carry attribute keys, and the SDK
//! decodes state into it, encodes it back, and reports which fields changed.
//!
//! # Overview
//!
//! The SDK provides:
//!
//! - **Tagged models**: [`typed_model!`] declares a struct with `#[tag("key")]` fields
//! - **Decoder / Encoder**: [`decode()`] and [`encode()`] move models to and from state
//! - **Change detection**: [`has_changes()`] answers "did this field change?"
//! - **Schema types**: attribute schemas, [`combine_schema`] and value validation
//! - **Resources**: the [`Resource`] trait, [`register`] and per-operation timeouts
//! - **Error types**: [`ModelError`], [`SchemaError`], [`StateError`], [`ProviderError`]
//! - **Logging**: Integration with `tracing` for structured logging
//!
//! # Quick Start
//!
//! ```
//! use typed_provider_sdk::{decode, encode, typed_model, MemoryState, NullLogger};
//!
//! typed_model! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Network {
//!         #[tag("name")]
//!         pub name: String,
//!         #[tag("address_space")]
//!         pub address_space: Vec<String>,
//!         #[tag("dns_servers")]
//!         pub dns_servers: Option<Vec<String>>,
//!     }
//! }
//!
//! let network = Network {
//!     name: "core".to_string(),
//!     address_space: vec!["10.0.0.0/16".to_string()],
//!     dns_servers: None,
//! };
//!
//! let mut state = MemoryState::new();
//! encode(&network, &mut state, &NullLogger).unwrap();
//!
//! let mut decoded = Network::default();
//! let warnings = decode(&mut decoded, &state, &NullLogger).unwrap();
//! assert!(warnings.is_empty());
//! assert_eq!(decoded, network);
//! ```
//!
//! # Supported Field Types
//!
//! `String`, `bool`, `i64`, `i32`, `f64`, `f32`, and `Vec<T>`, `Option<Vec<T>>`,
//! `HashMap<String, T>` and `Option<HashMap<String, T>>` where `T` is one of the
//! scalars or another model. Only the `Option` collections can tell "not
//! configured" apart from "configured as empty".

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod changes;
pub mod decode;
pub mod encode;
pub mod error;
pub mod logging;
pub mod model;
pub mod resource;
pub mod schema;
pub mod state;
pub mod testing;
pub mod validation;
pub mod value;

// Re-export main types at crate root
pub use changes::has_changes;
pub use decode::decode;
pub use encode::{encode, marshal};
pub use error::{ModelError, ProviderError, SchemaError, StateError};
pub use logging::{
    init_logging, init_logging_with_default, try_init_logging, Logger, NullLogger, TracingLogger,
};
pub use model::{validate, validate_model_object, Field, Kind, Model};
pub use resource::{
    register, RegisteredResource, Resource, ResourceMetaData, StateUpgradeFn, Timeouts,
};
pub use schema::{combine_schema, Attribute, AttributeMap, AttributeType, Diagnostic, Schema};
pub use state::{MemoryState, ResourceData, StateDiff, StateReader, StateWriter};
pub use validation::{is_valid, validate_json, validate_result};
pub use value::{Value, ValueSet};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
