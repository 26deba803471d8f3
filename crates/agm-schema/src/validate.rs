//! # Schema Validation
//!
//! Runtime validation of agent manifests against the JSON Schema document
//! `agent-manifest.schema.json`.
//!
//! ## Draft Selection
//!
//! The draft is taken from the schema's `$schema` URI. Schemas without one
//! are compiled as Draft 7.
//!
//! ## Formats
//!
//! Format assertions are enabled, so `"format": "uri"` rejects strings that
//! are not URIs rather than treating the keyword as an annotation.
//!
//! ## Reference Resolution
//!
//! Internal `$ref`s of the form `#/definitions/<name>` are resolved by the
//! jsonschema crate natively. External references are refused by
//! [`OfflineRetriever`] so validation never performs network requests.

use std::fmt;
use std::path::{Path, PathBuf};

use agm_core::{StructuralError, StructuralOutcome, StructureValidator};
use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

/// Fixed file name of the manifest schema at the repository root.
pub const SCHEMA_FILE_NAME: &str = "agent-manifest.schema.json";

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema references are not resolved: {}", uri.as_str()).into())
    }
}

/// Error while loading or compiling the schema document.
///
/// These are run-level failures: without a schema no manifest can be
/// validated.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read or parsed.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoadError {
        /// Path to the schema file.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile schema {schema_id}: {reason}")]
    SchemaCompileError {
        /// The schema `$id` or path.
        schema_id: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// A compiled manifest schema.
///
/// The schema is compiled once at construction; each call to
/// [`StructureValidator::validate_structure`] reuses the compiled form.
pub struct SchemaValidator {
    /// Where the schema came from (file path or caller-supplied label).
    source: String,
    /// The parsed schema document.
    schema: Value,
    /// The compiled validator.
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("source", &self.source)
            .field("schema_id", &self.schema_id())
            .finish()
    }
}

impl SchemaValidator {
    /// Load and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoadError`] if the file cannot be read or
    /// is not valid JSON, and [`SchemaError::SchemaCompileError`] if it is
    /// not a valid schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SchemaError::SchemaLoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let schema: Value =
            serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoadError {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        Self::from_value(schema, path.display().to_string())
    }

    /// Compile an already-parsed schema document.
    ///
    /// `source` labels the schema in errors and logs.
    pub fn from_value(schema: Value, source: impl Into<String>) -> Result<Self, SchemaError> {
        let source = source.into();
        let draft = declared_draft(&schema).unwrap_or(Draft::Draft7);

        let validator = jsonschema::options()
            .with_draft(draft)
            .should_validate_formats(true)
            .with_retriever(OfflineRetriever)
            .build(&schema)
            .map_err(|e| SchemaError::SchemaCompileError {
                schema_id: schema
                    .get("$id")
                    .and_then(Value::as_str)
                    .unwrap_or(&source)
                    .to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(source = %source, ?draft, "compiled manifest schema");

        Ok(Self {
            source,
            schema,
            validator,
        })
    }

    /// Locate the schema under a repository root and load it.
    pub fn from_repo_root(root: &Path) -> Result<Self, SchemaError> {
        Self::from_file(default_schema_path(root))
    }

    /// Where the schema was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The schema's `$id`, if it declares one.
    pub fn schema_id(&self) -> Option<&str> {
        self.schema.get("$id").and_then(Value::as_str)
    }
}

impl StructureValidator for SchemaValidator {
    fn validate_structure(&self, manifest: &Value) -> StructuralOutcome {
        let errors: Vec<StructuralError> = self
            .validator
            .iter_errors(manifest)
            .map(|e| StructuralError {
                path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        StructuralOutcome::invalid(errors)
    }

    fn declared_default(&self, field: &str) -> Option<Value> {
        self.schema
            .get("properties")?
            .get(field)?
            .get("default")
            .cloned()
    }
}

/// Conventional schema location: `<root>/agent-manifest.schema.json`.
pub fn default_schema_path(root: &Path) -> PathBuf {
    root.join(SCHEMA_FILE_NAME)
}

/// Map a `$schema` URI to the draft it names.
fn declared_draft(schema: &Value) -> Option<Draft> {
    let uri = schema.get("$schema")?.as_str()?;
    if uri.contains("2020-12") {
        Some(Draft::Draft202012)
    } else if uri.contains("2019-09") {
        Some(Draft::Draft201909)
    } else if uri.contains("draft-07") {
        Some(Draft::Draft7)
    } else if uri.contains("draft-06") {
        Some(Draft::Draft6)
    } else if uri.contains("draft-04") {
        Some(Draft::Draft4)
    } else {
        None
    }
}
