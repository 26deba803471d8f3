//! # agm-schema — Structural Validation for Agent Manifests
//!
//! Provides runtime JSON Schema validation of agent manifests against
//! `agent-manifest.schema.json`.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] loads the schema document once, compiles it with
//! format checking enabled (e.g. `"format": "uri"`), and implements
//! [`agm_core::StructureValidator`] so the rule engine can consume it
//! without depending on `jsonschema` directly.
//!
//! ## Crate Policy
//!
//! - Depends only on `agm-core` internally.
//! - Validation never touches the network: external `$ref`s are rejected
//!   when the schema is compiled.
//! - Every violation is reported with the instance path, the schema
//!   keyword path, and a human-readable message.

pub mod validate;

pub use validate::{default_schema_path, SchemaError, SchemaValidator, SCHEMA_FILE_NAME};
