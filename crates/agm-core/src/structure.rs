//! # Structural Validator Capability
//!
//! Structural (type/shape) validation is delegated to a schema engine. The
//! rest of the toolchain only sees this trait, so the content rule engine
//! can be tested against a stub and the real JSON Schema backend lives in
//! `agm-schema`.
//!
//! ## Contract
//!
//! - `validate_structure` never fails: a document that cannot be checked is
//!   reported as invalid with an explanatory [`StructuralError`].
//! - Every violation is collected, not just the first.
//! - `declared_default` exposes schema-level defaults (e.g. the default
//!   `deployment_status`) that content rules need to resolve effective
//!   values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One schema constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralError {
    /// JSON Pointer to the violating value in the manifest (`""` is the root).
    pub path: String,
    /// JSON Pointer to the schema keyword that was violated.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl StructuralError {
    /// Build a violation without a schema location.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            schema_path: String::new(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Verdict of structural validation for one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralOutcome {
    /// All violations found, in the order the validator reported them.
    pub errors: Vec<StructuralError>,
}

impl StructuralOutcome {
    /// An outcome with no violations.
    pub fn valid() -> Self {
        Self::default()
    }

    /// An outcome carrying the given violations.
    pub fn invalid(errors: Vec<StructuralError>) -> Self {
        Self { errors }
    }

    /// True when no violations were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A schema engine able to check a manifest's shape.
pub trait StructureValidator {
    /// Check `manifest` against the schema and report every violation.
    fn validate_structure(&self, manifest: &Value) -> StructuralOutcome;

    /// The schema's `default` for a top-level property, if it declares one.
    fn declared_default(&self, _field: &str) -> Option<Value> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_validity_follows_errors() {
        assert!(StructuralOutcome::valid().is_valid());
        let outcome = StructuralOutcome::invalid(vec![StructuralError::new("/name", "bad")]);
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_display_root_and_field() {
        let root = StructuralError::new("", r#""name" is a required property"#);
        assert!(root.to_string().starts_with("(root): "));

        let field = StructuralError::new("/repository_url", "is not a \"uri\"");
        assert_eq!(field.to_string(), "/repository_url: is not a \"uri\"");
    }

    #[test]
    fn test_serialization_omits_empty_schema_path() {
        let json = serde_json::to_value(StructuralError::new("/a", "m")).unwrap();
        assert!(json.get("schema_path").is_none());
        assert_eq!(json["path"], "/a");
    }

    struct Permissive;

    impl StructureValidator for Permissive {
        fn validate_structure(&self, _manifest: &Value) -> StructuralOutcome {
            StructuralOutcome::valid()
        }
    }

    #[test]
    fn test_default_declared_default_is_none() {
        assert_eq!(Permissive.declared_default("deployment_status"), None);
        let by_ref: &dyn StructureValidator = &Permissive;
        assert!(by_ref.validate_structure(&Value::Null).is_valid());
    }
}
