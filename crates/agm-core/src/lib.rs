//! # agm-core — Foundational Types for Agent Manifest Validation
//!
//! This crate defines the data model shared by every other `agm-*` crate:
//! the parsed [`Manifest`], the [`Diagnostic`] a failed check produces, the
//! per-manifest [`Report`], and the run-wide [`RunResult`]. It also defines
//! the [`StructureValidator`] capability through which schema validation is
//! injected into the rule engine.
//!
//! ## Key Design Principles
//!
//! 1. **Diagnostics, not exceptions.** Every manifest-level failure (load,
//!    schema, content) becomes a [`Diagnostic`]. Only the run-level verdict
//!    crosses manifest boundaries.
//!
//! 2. **Explicit aggregation.** The run verdict is a value returned to the
//!    caller ([`RunResult::has_error`]), never process-wide state.
//!
//! 3. **Injected schema capability.** Structural validation sits behind the
//!    [`StructureValidator`] trait so content rules can be exercised with a
//!    stub validator.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `agm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod structure;

// Re-export primary types for ergonomic imports.
pub use diagnostic::{Diagnostic, DiagnosticCategory, Report, RunResult};
pub use domain::{DeploymentStatus, LlmProvider};
pub use error::AgmError;
pub use manifest::{is_blank, significant_len, Manifest, MANIFEST_FILE_NAME};
pub use structure::{StructuralError, StructuralOutcome, StructureValidator};
